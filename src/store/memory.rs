use std::sync::RwLock;

use serde_json::Value;
use async_trait::async_trait;

use super::{ ConfigStore, StoreError, VersionToken, VersionedStore };

/// In-memory store used by the tests. Implements the compare-and-swap trait
/// with a bump-on-write counter as the version token, so the CAS contract can
/// be exercised without a hosting platform behind it.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<Slot>,
}

#[derive(Default)]
struct Slot {
    document: Option<Value>,
    version: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        let slot = self.state.read().expect("memory store poisoned");
        Ok(slot.document.clone())
    }

    async fn seed(&self, document: &Value) -> Result<Value, StoreError> {
        let mut slot = self.state.write().expect("memory store poisoned");

        if let Some(existing) = &slot.document {
            return Ok(existing.clone());
        }

        slot.document = Some(document.clone());
        slot.version += 1;
        Ok(document.clone())
    }

    async fn replace(&self, document: &Value) -> Result<(), StoreError> {
        let mut slot = self.state.write().expect("memory store poisoned");
        slot.document = Some(document.clone());
        slot.version += 1;
        Ok(())
    }
}

#[async_trait]
impl VersionedStore for MemoryStore {
    async fn load_versioned(&self) -> Result<(Option<Value>, VersionToken), StoreError> {
        let slot = self.state.read().expect("memory store poisoned");

        let token = match slot.document {
            Some(_) => VersionToken::of(slot.version.to_string()),
            None => VersionToken::initial(),
        };

        Ok((slot.document.clone(), token))
    }

    async fn replace_if_match(
        &self,
        document: &Value,
        token: &VersionToken,
    ) -> Result<(), StoreError> {
        let mut slot = self.state.write().expect("memory store poisoned");

        let current = match slot.document {
            Some(_) => VersionToken::of(slot.version.to_string()),
            None => VersionToken::initial(),
        };

        if *token != current {
            return Err(StoreError::StaleToken);
        }

        slot.document = Some(document.clone());
        slot.version += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn seed_keeps_first_document() {
        let store = MemoryStore::new();

        let first = store.seed(&json!({ "appName": "first" })).await.unwrap();
        assert_eq!(first["appName"], "first");

        let second = store.seed(&json!({ "appName": "second" })).await.unwrap();
        assert_eq!(second["appName"], "first");
    }

    #[tokio::test]
    async fn stale_token_write_fails_and_mutates_nothing() {
        let store = MemoryStore::new();

        let (_, initial) = store.load_versioned().await.unwrap();
        store
            .replace_if_match(&json!({ "appName": "one" }), &initial)
            .await
            .unwrap();

        let (_, token) = store.load_versioned().await.unwrap();
        store
            .replace_if_match(&json!({ "appName": "two" }), &token)
            .await
            .unwrap();

        // `token` was consumed by the write above; reusing it must fail.
        let result = store
            .replace_if_match(&json!({ "appName": "three" }), &token)
            .await;
        assert!(matches!(result, Err(StoreError::StaleToken)));

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored["appName"], "two");
    }

    #[tokio::test]
    async fn fresh_token_write_succeeds_after_conflict() {
        let store = MemoryStore::new();
        store.replace(&json!({ "appName": "one" })).await.unwrap();

        let stale = VersionToken::initial();
        let result = store.replace_if_match(&json!({}), &stale).await;
        assert!(matches!(result, Err(StoreError::StaleToken)));

        let (_, fresh) = store.load_versioned().await.unwrap();
        store
            .replace_if_match(&json!({ "appName": "two" }), &fresh)
            .await
            .unwrap();

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored["appName"], "two");
    }
}
