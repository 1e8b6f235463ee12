//! In-memory CEP store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use cepario_core::{CepFields, CepRecord, CepStore, Error, Result};

/// Ephemeral CEP store holding records in a map.
///
/// Shares state across clones, so a handle can be passed to a resolver
/// while the test keeps another for inspection. Mirrors the SQLite
/// backend's contract, including the duplicate-code failure.
#[derive(Clone, Default)]
pub struct MemoryCepStore {
    records: Arc<Mutex<HashMap<String, CepRecord>>>,
}

impl MemoryCepStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl CepStore for MemoryCepStore {
    async fn get(&self, cep: &str) -> Result<Option<CepRecord>> {
        Ok(self.records.lock().await.get(cep).cloned())
    }

    async fn create(&self, fields: CepFields) -> Result<CepRecord> {
        let record = CepRecord::from_fields(fields)?;
        let mut records = self.records.lock().await;
        if records.contains_key(&record.cep) {
            return Err(Error::storage(format!("duplicate cep {}", record.cep)));
        }
        records.insert(record.cep.clone(), record.clone());
        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> CepFields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryCepStore::new();
        assert!(store.is_empty().await);

        let created = store
            .create(fields(json!({"cep": "01001000", "uf": "SP"})))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("01001000").await.unwrap(), Some(created));
        assert!(store.get("99999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_duplicate_cep_fails() {
        let store = MemoryCepStore::new();
        let data = fields(json!({"cep": "01001000"}));

        store.create(data.clone()).await.unwrap();
        assert!(store.create(data).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_shared_across_clones() {
        let store = MemoryCepStore::new();
        let clone = store.clone();

        clone
            .create(fields(json!({"cep": "01001000"})))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
    }
}
