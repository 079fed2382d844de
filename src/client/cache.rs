use std::fs;
use std::io;
use std::path::PathBuf;

use crate::Model::Config::AppConfig;
use crate::Model::Downloads::DownloadRecord;

const CONFIG_SLOT: &str = "app_config.json";
const TOTAL_SLOT: &str = "total_downloads.json";
const HISTORY_SLOT: &str = "download_history.json";

/// Client-local persistence: one JSON file per slot under the platform data
/// directory. Reads are tolerant, a slot that is missing or does not parse
/// counts as absent.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(LocalStore { dir })
    }

    pub fn open_default() -> io::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no data directory for this platform")
        })?;

        Self::open(base.join("adrdub"))
    }

    fn slot(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_slot<T: serde::de::DeserializeOwned>(&self, name: &str) -> Option<T> {
        let raw = fs::read_to_string(self.slot(name)).ok()?;

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                log::warn!("discarding unreadable slot {}: {}", name, error);
                None
            }
        }
    }

    fn write_slot<T: serde::Serialize>(&self, name: &str, value: &T) -> io::Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(self.slot(name), raw)
    }

    pub fn read_config(&self) -> Option<AppConfig> {
        self.read_slot(CONFIG_SLOT)
    }

    pub fn write_config(&self, config: &AppConfig) -> io::Result<()> {
        self.write_slot(CONFIG_SLOT, config)
    }

    /* Admin "reset to defaults" */
    pub fn clear_config(&self) -> io::Result<()> {
        match fs::remove_file(self.slot(CONFIG_SLOT)) {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    pub fn read_total(&self) -> Option<i64> {
        self.read_slot(TOTAL_SLOT)
    }

    pub fn write_total(&self, total: i64) -> io::Result<()> {
        self.write_slot(TOTAL_SLOT, &total)
    }

    pub fn read_history(&self) -> Vec<DownloadRecord> {
        self.read_slot(HISTORY_SLOT).unwrap_or_default()
    }

    pub fn write_history(&self, history: &[DownloadRecord]) -> io::Result<()> {
        self.write_slot(HISTORY_SLOT, &history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model::Config::default_document;

    #[test]
    fn missing_slots_read_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        assert!(store.read_config().is_none());
        assert!(store.read_total().is_none());
        assert!(store.read_history().is_empty());
    }

    #[test]
    fn corrupt_slot_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        fs::write(dir.path().join(CONFIG_SLOT), "{not json").unwrap();
        fs::write(dir.path().join(HISTORY_SLOT), "{not json").unwrap();

        assert!(store.read_config().is_none());
        assert!(store.read_history().is_empty());
    }

    #[test]
    fn config_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let config = default_document();
        store.write_config(&config).unwrap();
        assert_eq!(store.read_config().unwrap(), config);

        store.clear_config().unwrap();
        assert!(store.read_config().is_none());

        // Clearing an already-empty slot is not an error.
        store.clear_config().unwrap();
    }
}
