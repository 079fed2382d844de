use base64::Engine as _;
use async_trait::async_trait;
use serde_json::{ json, Value };
use base64::engine::general_purpose::STANDARD as BASE64;

use super::{ ConfigStore, StoreError, VersionToken, VersionedStore };

const DEFAULT_PATH: &str = "public/config.json";
const COMMIT_MESSAGE: &str = "Update app config from admin panel";

/// Committed-file backend: the AppConfig is a JSON file in a GitHub repo,
/// written through the contents API. Every write carries the sha read just
/// before it, so a commit that lands in between turns into a stale-token
/// failure instead of a lost update.
pub struct GitHubStore {
    http: reqwest::Client,
    owner: String,
    repo: String,
    path: String,
    token: String,
}

impl GitHubStore {
    pub fn from_env() -> Result<Self, StoreError> {
        let owner = require_env("GITHUB_OWNER")?;
        let repo = require_env("GITHUB_REPO")?;
        let token = require_env("GITHUB_TOKEN")?;

        let path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_PATH.to_string());

        let http = reqwest::Client::builder()
            .user_agent("adrdub-config")
            .build()
            .map_err(StoreError::backend)?;

        Ok(GitHubStore { http, owner, repo, path, token })
    }

    fn contents_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/contents/{}",
            self.owner, self.repo, self.path
        )
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.contents_url())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
    }
}

fn require_env(name: &str) -> Result<String, StoreError> {
    std::env::var(name)
        .map_err(|_| StoreError::Backend(format!("{name} is not set")))
}

// The contents API wraps the file in base64 with embedded line breaks.
fn parse_contents(body: &Value) -> Result<(Value, VersionToken), StoreError> {
    let sha = body["sha"].as_str().ok_or_else(|| {
        StoreError::Backend("contents response missing sha".to_string())
    })?;

    let encoded: String = body["content"]
        .as_str()
        .unwrap_or_default()
        .split_whitespace()
        .collect();

    let raw = BASE64.decode(encoded.as_bytes()).map_err(StoreError::backend)?;
    let document = serde_json::from_slice(&raw).map_err(StoreError::backend)?;

    Ok((document, VersionToken::of(sha)))
}

// GitHub reports a mismatched sha as 409, and some paths as 422.
fn stale_status(status: u16) -> bool {
    status == 409 || status == 422
}

#[async_trait]
impl VersionedStore for GitHubStore {
    async fn load_versioned(&self) -> Result<(Option<Value>, VersionToken), StoreError> {
        let response = self
            .request(reqwest::Method::GET)
            .send()
            .await
            .map_err(StoreError::backend)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok((None, VersionToken::initial()));
        }

        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "contents read failed with status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(StoreError::backend)?;
        let (document, token) = parse_contents(&body)?;

        Ok((Some(document), token))
    }

    async fn replace_if_match(
        &self,
        document: &Value,
        token: &VersionToken,
    ) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)
            .map_err(StoreError::backend)?;

        let mut body = json!({
            "message": COMMIT_MESSAGE,
            "content": BASE64.encode(content.as_bytes()),
        });
        if let Some(sha) = token.value() {
            body["sha"] = json!(sha);
        }

        let response = self
            .request(reqwest::Method::PUT)
            .json(&body)
            .send()
            .await
            .map_err(StoreError::backend)?;

        let status = response.status().as_u16();

        if stale_status(status) {
            return Err(StoreError::StaleToken);
        }
        if !(200..300).contains(&status) {
            return Err(StoreError::Backend(format!(
                "contents write failed with status {status}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ConfigStore for GitHubStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.load_versioned().await?.0)
    }

    async fn seed(&self, document: &Value) -> Result<Value, StoreError> {
        let (stored, token) = self.load_versioned().await?;

        if let Some(existing) = stored {
            return Ok(existing);
        }

        self.replace_if_match(document, &token).await?;
        Ok(document.clone())
    }

    async fn replace(&self, document: &Value) -> Result<(), StoreError> {
        // One attempt only; a stale token reaches the caller instead of
        // looping here.
        let (_, token) = self.load_versioned().await?;
        self.replace_if_match(document, &token).await
    }
}
