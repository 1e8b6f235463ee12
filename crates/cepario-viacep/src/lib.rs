//! ViaCEP remote lookup client.
//!
//! Implements [`CepLookup`] against the public ViaCEP API
//! (`https://viacep.com.br/ws/{cep}/json/`). ViaCEP answers an unknown
//! but well-formed CEP with HTTP 200 and the body `{"erro": true}`; both
//! that and a non-2xx status map to an absent result.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use cepario_core::{CepFields, CepLookup, Error, Result};

/// Public ViaCEP endpoint.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

/// Remote lookup using the ViaCEP HTTP API.
pub struct ViaCepClient {
    base_url: String,
    client: reqwest::Client,
}

impl ViaCepClient {
    /// Creates a client against `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ViaCepClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CepLookup for ViaCepClient {
    async fn fetch(&self, cep: &str) -> Result<Option<CepFields>> {
        let url = format!("{}/{}/json/", self.base_url.trim_end_matches('/'), cep);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::lookup_with_source("failed to call ViaCEP", e))?;

        // ViaCEP answers a syntactically invalid code with 400; any
        // non-2xx is an upstream miss as far as the resolver is concerned.
        if !response.status().is_success() {
            warn!(%cep, status = %response.status(), "ViaCEP returned non-success status");
            return Ok(None);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::lookup_with_source("failed to parse ViaCEP response", e))?;

        debug!(%cep, "ViaCEP response received");
        body_to_fields(body)
    }
}

/// Interpret a 2xx ViaCEP body.
///
/// `{"erro": true}` (older deployments send the string `"true"`) is the
/// well-formed negative answer for an unknown CEP.
fn body_to_fields(body: Value) -> Result<Option<CepFields>> {
    match body {
        Value::Object(map) => {
            let not_found = map
                .get("erro")
                .is_some_and(|v| v.as_bool() == Some(true) || v.as_str() == Some("true"));
            if not_found {
                Ok(None)
            } else {
                Ok(Some(map))
            }
        }
        other => Err(Error::lookup(format!(
            "unexpected ViaCEP response shape: {other}"
        ))),
    }
}
