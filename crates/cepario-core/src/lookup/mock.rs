//! Mock remote lookup for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{CepFields, Error, Result};

use super::provider::CepLookup;

/// Mock lookup that returns canned per-code responses.
///
/// Useful for testing without making actual network calls. Codes without
/// a canned response resolve to a well-formed negative answer; the mock
/// can also be switched into a failing mode to simulate transport faults.
#[derive(Clone, Default)]
pub struct MockCepLookup {
    state: Arc<Mutex<MockLookupState>>,
}

#[derive(Default)]
struct MockLookupState {
    responses: HashMap<String, CepFields>,
    calls: Vec<String>,
    fail: bool,
}

impl MockCepLookup {
    /// Creates a mock lookup with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock lookup with a single canned response.
    pub async fn with_response(cep: impl Into<String>, fields: CepFields) -> Self {
        let lookup = Self::new();
        lookup.add_response(cep, fields).await;
        lookup
    }

    /// Adds a canned response for `cep`.
    pub async fn add_response(&self, cep: impl Into<String>, fields: CepFields) {
        self.state.lock().await.responses.insert(cep.into(), fields);
    }

    /// Makes every subsequent `fetch` call fail, simulating a transport
    /// fault.
    pub async fn fail_on_fetch(&self) {
        self.state.lock().await.fail = true;
    }

    /// The codes passed to `fetch`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }
}

#[async_trait]
impl CepLookup for MockCepLookup {
    async fn fetch(&self, cep: &str) -> Result<Option<CepFields>> {
        let mut state = self.state.lock().await;
        state.calls.push(cep.to_string());
        if state.fail {
            return Err(Error::lookup("mock transport failure"));
        }
        Ok(state.responses.get(cep).cloned())
    }
}
