use serde_json::json;
use async_trait::async_trait;

use crate::Model::Config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("config service rejected the secret")]
    Unauthorized,

    #[error("config service answered with status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// The client's view of the config service: one read, one gated write.
#[async_trait]
pub trait ConfigEndpoint: Send + Sync {
    async fn fetch(&self) -> Result<AppConfig, ApiError>;

    async fn publish(&self, password: &str, config: &AppConfig) -> Result<(), ApiError>;
}

pub struct ConfigApi {
    http: reqwest::Client,
    base_url: String,
}

impl ConfigApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();

        ConfigApi {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/config", self.base_url)
    }
}

#[async_trait]
impl ConfigEndpoint for ConfigApi {
    async fn fetch(&self) -> Result<AppConfig, ApiError> {
        // Timestamp query plus no-cache header, so intermediate caches can
        // never answer for the service.
        let url = format!(
            "{}?t={}",
            self.endpoint(),
            chrono::Utc::now().timestamp_millis()
        );

        let response = self
            .http
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn publish(&self, password: &str, config: &AppConfig) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&json!({ "password": password, "config": config }))
            .send()
            .await?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            status if !(200..300).contains(&status) => Err(ApiError::Status(status)),
            _ => Ok(()),
        }
    }
}
