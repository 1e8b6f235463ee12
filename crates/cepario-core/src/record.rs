//! The canonical CEP record and the untyped remote-lookup fields mapping.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Untyped fields mapping as returned by a remote lookup.
///
/// May contain a superset or subset of [`CepRecord`]'s attributes, keys
/// that are not record attributes at all, and a `cep` value that still
/// carries punctuation (e.g. `"01001-000"`).
pub type CepFields = serde_json::Map<String, serde_json::Value>;

/// The canonical stored representation of one CEP's address data.
///
/// Field names follow the ViaCEP wire format, so a filtered lookup
/// response deserializes into a record without renaming. Every field
/// besides `cep` is optional free text or a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CepRecord {
    /// 8-digit postal code, the unique key.
    ///
    /// Defaults to empty when the source mapping has no `cep` key; the
    /// resolver tolerates that rather than failing (lenient by design).
    #[serde(default)]
    pub cep: String,

    /// Street.
    pub logradouro: Option<String>,

    /// Address complement.
    pub complemento: Option<String>,

    /// Unit.
    pub unidade: Option<String>,

    /// Neighborhood.
    pub bairro: Option<String>,

    /// City.
    pub localidade: Option<String>,

    /// Two-letter state code.
    pub uf: Option<String>,

    /// State name.
    pub estado: Option<String>,

    /// Region.
    pub regiao: Option<String>,

    /// IBGE municipality code.
    pub ibge: Option<String>,

    /// GIA code.
    pub gia: Option<String>,

    /// Telephone area code.
    pub ddd: Option<String>,

    /// SIAFI code.
    pub siafi: Option<String>,
}

/// Declared attribute set, used for set-membership field filtering.
static FIELD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CepRecord::FIELD_NAMES.into_iter().collect());

impl CepRecord {
    /// The declared attribute names, in wire order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "cep",
        "logradouro",
        "complemento",
        "unidade",
        "bairro",
        "localidade",
        "uf",
        "estado",
        "regiao",
        "ibge",
        "gia",
        "ddd",
        "siafi",
    ];

    /// Whether `name` is a declared record attribute.
    pub fn is_field(name: &str) -> bool {
        FIELD_SET.contains(name)
    }

    /// Build a record from a fields mapping.
    ///
    /// Keys that are not record attributes are ignored; a missing `cep`
    /// key becomes the empty string. Fails only when a present value has
    /// the wrong shape (e.g. a non-string `logradouro`).
    pub fn from_fields(fields: CepFields) -> Result<Self> {
        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| Error::invalid_data(format!("fields do not form a CEP record: {e}")))
    }
}
