use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::api::ConfigEndpoint;
use super::cache::LocalStore;
use crate::Model::Config::AppConfig;

/// How often an open client re-asks the service, so admin pushes propagate
/// without a manual reload.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(30);

const BUNDLED_DEFAULT: &str = include_str!("../../assets/config.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Remote,
    Cache,
    Bundled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("all config sources failed")]
    Unavailable,
}

/// Ordered source selection: remote service first, then the local cache,
/// then the document bundled with the client. First success wins; a stage
/// failure falls through instead of surfacing.
pub struct ConfigResolver {
    remote: Arc<dyn ConfigEndpoint>,
    cache: LocalStore,
    bundled: String,
}

impl ConfigResolver {
    pub fn new(remote: Arc<dyn ConfigEndpoint>, cache: LocalStore) -> Self {
        Self::with_bundled(remote, cache, BUNDLED_DEFAULT)
    }

    pub fn with_bundled(
        remote: Arc<dyn ConfigEndpoint>,
        cache: LocalStore,
        bundled: impl Into<String>,
    ) -> Self {
        ConfigResolver {
            remote,
            cache,
            bundled: bundled.into(),
        }
    }

    pub async fn resolve(&self) -> Result<LoadedConfig, ResolveError> {
        match self.remote.fetch().await {
            Ok(config) => {
                if let Err(error) = self.cache.write_config(&config) {
                    log::warn!("could not cache remote config: {}", error);
                }

                return Ok(LoadedConfig {
                    config,
                    source: ConfigSource::Remote,
                });
            }
            Err(error) => {
                log::warn!("remote config fetch failed: {}", error);
            }
        }

        if let Some(config) = self.cache.read_config() {
            return Ok(LoadedConfig {
                config,
                source: ConfigSource::Cache,
            });
        }

        match serde_json::from_str(&self.bundled) {
            Ok(config) => Ok(LoadedConfig {
                config,
                source: ConfigSource::Bundled,
            }),
            Err(error) => {
                log::error!("bundled config unreadable: {}", error);
                Err(ResolveError::Unavailable)
            }
        }
    }
}

/// Running re-poll. Dropping the handle aborts the task, so the poll cannot
/// outlive the view that spawned it.
pub struct RefreshHandle {
    rx: watch::Receiver<Option<LoadedConfig>>,
    task: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    pub fn latest(&self) -> Option<LoadedConfig> {
        self.rx.borrow().clone()
    }

    /// Wait for the next successful resolution. `None` once the task is gone.
    pub async fn changed(&mut self) -> Option<LoadedConfig> {
        if self.rx.changed().await.is_err() {
            return None;
        }

        self.rx.borrow().clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn spawn_refresh(resolver: Arc<ConfigResolver>) -> RefreshHandle {
    spawn_refresh_every(resolver, REFRESH_PERIOD)
}

pub fn spawn_refresh_every(resolver: Arc<ConfigResolver>, period: Duration) -> RefreshHandle {
    let (tx, rx) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tick.tick().await;

            // A failed cycle keeps the last published value; the next tick
            // tries again.
            if let Ok(loaded) = resolver.resolve().await {
                if tx.send(Some(loaded)).is_err() {
                    break;
                }
            }
        }
    });

    RefreshHandle { rx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use async_trait::async_trait;
    use crate::client::api::ApiError;
    use crate::Model::Config::default_document;

    struct FakeRemote {
        config: Mutex<Option<AppConfig>>,
    }

    impl FakeRemote {
        fn healthy(config: AppConfig) -> Arc<Self> {
            Arc::new(FakeRemote { config: Mutex::new(Some(config)) })
        }

        fn down() -> Arc<Self> {
            Arc::new(FakeRemote { config: Mutex::new(None) })
        }
    }

    #[async_trait]
    impl ConfigEndpoint for FakeRemote {
        async fn fetch(&self) -> Result<AppConfig, ApiError> {
            match self.config.lock().unwrap().clone() {
                Some(config) => Ok(config),
                None => Err(ApiError::Status(503)),
            }
        }

        async fn publish(&self, _password: &str, _config: &AppConfig) -> Result<(), ApiError> {
            unimplemented!("resolver never publishes")
        }
    }

    fn sample(name: &str) -> AppConfig {
        let mut config = default_document();
        config.app_name = name.to_string();
        config
    }

    #[tokio::test]
    async fn healthy_remote_wins_and_fills_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalStore::open(dir.path()).unwrap();
        let expected = sample("remote copy");

        let resolver = ConfigResolver::new(FakeRemote::healthy(expected.clone()), cache);

        let loaded = resolver.resolve().await.unwrap();
        assert_eq!(loaded.source, ConfigSource::Remote);
        assert_eq!(loaded.config, expected);

        let cache = LocalStore::open(dir.path()).unwrap();
        assert_eq!(cache.read_config().unwrap(), expected);
    }

    #[tokio::test]
    async fn cache_answers_when_remote_is_down() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalStore::open(dir.path()).unwrap();
        let cached = sample("cached copy");
        cache.write_config(&cached).unwrap();

        // Unparseable bundled document: reaching stage three would error,
        // proving the cache stage answered first.
        let resolver = ConfigResolver::with_bundled(FakeRemote::down(), cache, "not json");

        let loaded = resolver.resolve().await.unwrap();
        assert_eq!(loaded.source, ConfigSource::Cache);
        assert_eq!(loaded.config, cached);
    }

    #[tokio::test]
    async fn bundled_default_is_the_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalStore::open(dir.path()).unwrap();

        let resolver = ConfigResolver::new(FakeRemote::down(), cache);

        let loaded = resolver.resolve().await.unwrap();
        assert_eq!(loaded.source, ConfigSource::Bundled);

        let bundled: AppConfig = serde_json::from_str(BUNDLED_DEFAULT).unwrap();
        assert_eq!(loaded.config, bundled);
    }

    #[tokio::test]
    async fn everything_down_surfaces_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalStore::open(dir.path()).unwrap();

        let resolver = ConfigResolver::with_bundled(FakeRemote::down(), cache, "not json");

        assert!(matches!(
            resolver.resolve().await,
            Err(ResolveError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn refresh_publishes_and_stops_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalStore::open(dir.path()).unwrap();
        let expected = sample("polled copy");

        let resolver = Arc::new(ConfigResolver::new(
            FakeRemote::healthy(expected.clone()),
            cache,
        ));

        let mut handle = spawn_refresh_every(resolver, Duration::from_millis(10));

        let loaded = handle.changed().await.unwrap();
        assert_eq!(loaded.config, expected);
        assert_eq!(handle.latest().unwrap().config, expected);

        handle.stop();
    }
}
