//! Cepário core — record model, collaborator traits, and the resolver.
//!
//! This crate provides the foundational types used across all Cepário
//! crates. It has no internal Cepário dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`record`]: The canonical CEP record and the untyped fields mapping
//! - [`store`]: Persistence seam ([`CepStore`]) and its mock
//! - [`lookup`]: Remote lookup seam ([`CepLookup`]) and its mock
//! - [`resolver`]: The local-first, fetch-and-persist resolution pipeline

pub mod error;
pub mod lookup;
pub mod record;
pub mod resolver;
pub mod store;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use lookup::{CepLookup, MockCepLookup};
pub use record::{CepFields, CepRecord};
pub use resolver::{normalize_cep, CepResolver};
pub use store::{CepStore, MockCepStore};
