//! Error types for Cepário operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used
//! across all Cepário crates. Uses `thiserror` for derive macros.

use thiserror::Error;

/// Boxed source error carried by storage and lookup failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur in Cepário operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence fault in a [`CepStore`](crate::CepStore) backend.
    #[error("Storage error: {message}")]
    Storage {
        /// What the store was doing when it failed.
        message: String,
        /// Underlying driver error, when one exists.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Transport or protocol fault in a [`CepLookup`](crate::CepLookup) backend.
    #[error("Lookup error: {message}")]
    Lookup {
        /// What the lookup was doing when it failed.
        message: String,
        /// Underlying transport error, when one exists.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a storage error wrapping a driver error.
    pub fn storage_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a lookup error.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a lookup error wrapping a transport error.
    pub fn lookup_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Lookup {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

/// Result type alias using Cepário's Error type.
pub type Result<T> = std::result::Result<T, Error>;
