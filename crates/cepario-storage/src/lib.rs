//! Storage backends for Cepário.
//!
//! Two [`CepStore`](cepario_core::CepStore) implementations:
//!
//! - [`SqliteCepStore`]: the production backend, one SQLite table keyed
//!   by the 8-digit code
//! - [`MemoryCepStore`]: an ephemeral backend for tests and demos
//!
//! Both honour the store contract: `get` returns the stored record or
//! absent, `create` persists exactly once and returns the stored copy,
//! and a duplicate code is a persistence failure, not an update.

mod memory;
mod sqlite;

pub use memory::MemoryCepStore;
pub use sqlite::SqliteCepStore;
