//! Remote lookup abstractions and the mock implementation.

mod mock;
mod provider;

pub use mock::MockCepLookup;
pub use provider::CepLookup;
