//! Local-first CEP resolution with remote fallback and persist-on-fetch.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{CepFields, CepLookup, CepRecord, CepStore, Result};

/// Strip every character that is not an ASCII digit.
///
/// Idempotent: normalizing an already-normalized code is a no-op.
pub fn normalize_cep(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Resolves a CEP to its address record.
///
/// The pipeline is strictly sequential: at most one store read, one
/// network round-trip, and one store write per call. A store miss, an
/// upstream miss, and a persistence failure are each terminal — there are
/// no retries on this path. The resolver does not own the collaborators'
/// connections and adds no timeout or cancellation logic of its own.
pub struct CepResolver<S, L> {
    store: S,
    lookup: L,
}

impl<S: CepStore, L: CepLookup> CepResolver<S, L> {
    /// Creates a resolver over the given collaborators.
    pub fn new(store: S, lookup: L) -> Self {
        Self { store, lookup }
    }

    /// Resolve `raw` to a record, or `None` when resolution fails.
    ///
    /// Every failure mode collapses into `None`: invalid input, a miss in
    /// both the store and the upstream, an unreachable upstream, and a
    /// persistence failure after a successful fetch. Callers that need
    /// the cause must look at the logs; the public surface is a
    /// two-outcome contract.
    pub async fn resolve(&self, raw: &str) -> Option<CepRecord> {
        let cep = normalize_cep(raw);
        if cep.len() != 8 {
            warn!(input = raw, normalized = %cep, "invalid CEP, expected 8 digits");
            return None;
        }

        match self.store.get(&cep).await {
            Ok(Some(record)) => {
                debug!(%cep, "CEP found in local store");
                return Some(record);
            }
            Ok(None) => debug!(%cep, "CEP not in local store"),
            // The store contract collapses internal faults to absent, so
            // a failed read is a miss and the upstream gets its chance.
            Err(e) => warn!(%cep, error = %e, "store read failed, treating as miss"),
        }

        let fields = match self.lookup.fetch(&cep).await {
            Ok(Some(fields)) => fields,
            Ok(None) => {
                info!(%cep, "CEP not found upstream");
                return None;
            }
            Err(e) => {
                warn!(%cep, error = %e, "remote lookup failed");
                return None;
            }
        };

        // Containment boundary: a fetched CEP that cannot be normalized
        // or persisted is an overall miss, never a propagated error.
        match self.persist(fields).await {
            Ok(record) => {
                info!(%cep, "CEP fetched and persisted");
                Some(record)
            }
            Err(e) => {
                error!(%cep, error = %e, "failed to persist fetched CEP");
                None
            }
        }
    }

    /// Normalize and filter the fetched fields, then create the record.
    ///
    /// The upstream may deliver the code with punctuation or omit it
    /// entirely; a missing code becomes the empty string. Keys outside
    /// the declared attribute set never reach the store.
    async fn persist(&self, mut fields: CepFields) -> Result<CepRecord> {
        let raw_cep = fields
            .get("cep")
            .and_then(Value::as_str)
            .unwrap_or_default();
        fields.insert("cep".to_string(), Value::String(normalize_cep(raw_cep)));
        fields.retain(|key, _| CepRecord::is_field(key));

        self.store.create(fields).await
    }
}
