use std::io;

use super::api::{ ApiError, ConfigEndpoint };
use super::cache::LocalStore;
use crate::Model::Config::AppConfig;
use crate::utils::secret::PanelSecret;

/// Gate in front of the admin panel. This is the weak client-side check; the
/// service write is separately gated by its own secret.
#[derive(Debug, Default)]
pub struct AdminSession {
    signed_in: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        AdminSession::default()
    }

    pub fn sign_in(&mut self, attempt: &str, secret: &PanelSecret) -> bool {
        self.signed_in = secret.verify(attempt);
        self.signed_in
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Wrong service secret. The draft is retained untouched.
    #[error("config service rejected the publish")]
    Rejected,

    #[error(transparent)]
    Failed(ApiError),
}

/// Draft copy of the config with the two mutation paths the panel offers:
/// persist locally only, or publish through the service.
pub struct AdminPanel {
    draft: AppConfig,
    cache: LocalStore,
}

impl AdminPanel {
    pub fn open(cache: LocalStore, initial: AppConfig) -> Self {
        AdminPanel { draft: initial, cache }
    }

    pub fn draft(&self) -> &AppConfig {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AppConfig {
        &mut self.draft
    }

    /// Local-only edit: the whole draft goes to the local cache slot and
    /// nowhere else. Visible to this client only.
    pub fn save_local(&self) -> io::Result<()> {
        self.cache.write_config(&self.draft)
    }

    /// Published edit: the whole draft plus the service secret. On success
    /// the local cache is brought in line with the server.
    pub async fn publish(
        &self,
        endpoint: &dyn ConfigEndpoint,
        secret: &str,
    ) -> Result<(), PublishError> {
        match endpoint.publish(secret, &self.draft).await {
            Ok(()) => {
                if let Err(error) = self.cache.write_config(&self.draft) {
                    log::warn!("published but could not update local cache: {}", error);
                }
                Ok(())
            }
            Err(ApiError::Unauthorized) => Err(PublishError::Rejected),
            Err(error) => Err(PublishError::Failed(error)),
        }
    }
}
