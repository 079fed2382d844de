use std::sync::Arc;

use serde_json::Value;
use async_trait::async_trait;

pub mod mongo;
pub use mongo as Mongo;

pub mod github;
pub use github as GitHub;

pub mod memory;
pub use memory as Memory;

use crate::builtins::mongo::MongoDB;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The version token read before the write no longer matches the stored
    /// document. The caller decides whether to re-read and retry.
    #[error("config was modified upstream; version token is stale")]
    StaleToken,

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(error: impl ToString) -> Self {
        StoreError::Backend(error.to_string())
    }
}

/// Authoritative persistence for the single AppConfig document. The document
/// is schema-free at this layer and always replaced wholesale.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<Option<Value>, StoreError>;

    /// Insert `document` only if the store holds nothing, and return whatever
    /// document the store holds afterwards. Concurrent seeds must not leave
    /// the store holding more than one document.
    async fn seed(&self, document: &Value) -> Result<Value, StoreError>;

    /// Replace the stored document wholesale. No merge, no validation.
    async fn replace(&self, document: &Value) -> Result<(), StoreError>;
}

/// Opaque version token for compare-and-swap backends. `initial()` stands for
/// "no document yet"; writing with it creates the document.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionToken(Option<String>);

impl VersionToken {
    pub fn initial() -> Self {
        VersionToken(None)
    }

    pub fn of(token: impl Into<String>) -> Self {
        VersionToken(Some(token.into()))
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Compare-and-swap view of a config store: read a token alongside the
/// document, write only if the token still matches. Backends that version
/// their writes (the GitHub file backend) implement [`ConfigStore`] on top of
/// this, surfacing a mismatch as [`StoreError::StaleToken`] instead of
/// retrying.
#[async_trait]
pub trait VersionedStore: Send + Sync {
    async fn load_versioned(&self) -> Result<(Option<Value>, VersionToken), StoreError>;

    async fn replace_if_match(
        &self,
        document: &Value,
        token: &VersionToken,
    ) -> Result<(), StoreError>;
}

/// Load the stored document, seeding the built-in default on first read.
pub async fn load_or_seed(store: &dyn ConfigStore) -> Result<Value, StoreError> {
    if let Some(document) = store.load().await? {
        return Ok(document);
    }

    let default = crate::Model::Config::default_document();
    let document = serde_json::to_value(&default)
        .map_err(StoreError::backend)?;

    store.seed(&document).await
}

/// Pick the configured backend. `CONFIG_BACKEND=github` selects the committed
/// file variant, anything else the key-value store.
pub async fn from_env() -> anyhow::Result<Arc<dyn ConfigStore>> {
    let backend = std::env::var("CONFIG_BACKEND")
        .unwrap_or_else(|_| "mongo".to_string());

    match backend.as_str() {
        "github" => {
            let store = github::GitHubStore::from_env()?;
            Ok(Arc::new(store))
        }
        _ => {
            MongoDB.init().await?;
            Ok(Arc::new(mongo::MongoStore::new()))
        }
    }
}
