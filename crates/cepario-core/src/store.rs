//! Persistence seam for CEP records.
//!
//! Backends implement [`CepStore`]; the resolver only ever reads one
//! record and creates one record per call. Records are created once and
//! never updated or deleted by this subsystem.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{CepFields, CepRecord, Error, Result};

/// Abstraction over CEP record persistence (SQLite, in-memory, etc.).
///
/// This trait allows swapping storage backends without changing resolver
/// code.
#[async_trait]
pub trait CepStore: Send + Sync {
    /// Fetch the record stored under `cep`, if any.
    async fn get(&self, cep: &str) -> Result<Option<CepRecord>>;

    /// Persist a new record built from `fields` and return the stored copy.
    ///
    /// The returned record is the canonical answer: backends may apply
    /// defaults or coercions, so callers must use it rather than the raw
    /// fields. Fails when the backend cannot persist (including a
    /// duplicate `cep`).
    async fn create(&self, fields: CepFields) -> Result<CepRecord>;
}

/// Mock store that keeps records in memory and records every call.
///
/// Useful for testing resolver behaviour without a database: tests can
/// pre-seed records, force `create` to fail, and assert on the exact
/// fields the resolver handed over.
#[derive(Clone, Default)]
pub struct MockCepStore {
    state: Arc<Mutex<MockStoreState>>,
}

#[derive(Default)]
struct MockStoreState {
    records: HashMap<String, CepRecord>,
    get_calls: Vec<String>,
    create_calls: Vec<CepFields>,
    fail_create: bool,
    fail_get: bool,
}

impl MockCepStore {
    /// Creates an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock store pre-seeded with `record`.
    pub async fn with_record(record: CepRecord) -> Self {
        let store = Self::new();
        store
            .state
            .lock()
            .await
            .records
            .insert(record.cep.clone(), record);
        store
    }

    /// Makes every subsequent `create` call fail.
    pub async fn fail_on_create(&self) {
        self.state.lock().await.fail_create = true;
    }

    /// Makes every subsequent `get` call fail.
    pub async fn fail_on_get(&self) {
        self.state.lock().await.fail_get = true;
    }

    /// The keys passed to `get`, in call order.
    pub async fn get_calls(&self) -> Vec<String> {
        self.state.lock().await.get_calls.clone()
    }

    /// The fields mappings passed to `create`, in call order.
    pub async fn create_calls(&self) -> Vec<CepFields> {
        self.state.lock().await.create_calls.clone()
    }
}

#[async_trait]
impl CepStore for MockCepStore {
    async fn get(&self, cep: &str) -> Result<Option<CepRecord>> {
        let mut state = self.state.lock().await;
        state.get_calls.push(cep.to_string());
        if state.fail_get {
            return Err(Error::storage("mock get failure"));
        }
        Ok(state.records.get(cep).cloned())
    }

    async fn create(&self, fields: CepFields) -> Result<CepRecord> {
        let mut state = self.state.lock().await;
        state.create_calls.push(fields.clone());
        if state.fail_create {
            return Err(Error::storage("mock create failure"));
        }
        let record = CepRecord::from_fields(fields)?;
        if state.records.contains_key(&record.cep) {
            return Err(Error::storage(format!("duplicate cep {}", record.cep)));
        }
        state.records.insert(record.cep.clone(), record.clone());
        Ok(record)
    }
}
