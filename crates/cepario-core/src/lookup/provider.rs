//! Remote lookup abstraction.

use async_trait::async_trait;

use crate::{CepFields, Result};

/// Abstraction over remote CEP lookup services (ViaCEP, test doubles).
///
/// This trait allows swapping the upstream transport without changing
/// resolver code.
#[async_trait]
pub trait CepLookup: Send + Sync {
    /// Fetch the raw address fields for `cep` from the upstream service.
    ///
    /// `Ok(None)` means the upstream gave a well-formed negative answer.
    /// Transport and protocol failures surface as errors; the resolver
    /// treats both outcomes as an upstream miss.
    async fn fetch(&self, cep: &str) -> Result<Option<CepFields>>;
}
