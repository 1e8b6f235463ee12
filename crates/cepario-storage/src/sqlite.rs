//! SQLite-backed CEP store.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use cepario_core::{CepFields, CepRecord, CepStore, Error, Result};

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS cep (
    cep         TEXT PRIMARY KEY,
    logradouro  TEXT,
    complemento TEXT,
    unidade     TEXT,
    bairro      TEXT,
    localidade  TEXT,
    uf          TEXT,
    estado      TEXT,
    regiao      TEXT,
    ibge        TEXT,
    gia         TEXT,
    ddd         TEXT,
    siafi       TEXT
)";

const SELECT_BY_CEP: &str = "\
SELECT cep, logradouro, complemento, unidade, bairro, localidade,
       uf, estado, regiao, ibge, gia, ddd, siafi
FROM cep WHERE cep = ?1";

const INSERT_RECORD: &str = "\
INSERT INTO cep (cep, logradouro, complemento, unidade, bairro, localidade,
                 uf, estado, regiao, ibge, gia, ddd, siafi)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

/// CEP store backed by a single SQLite table.
///
/// The `cep` column is the primary key, so concurrent creates for the
/// same code cannot produce duplicates: the losing insert fails and
/// surfaces as a persistence error.
pub struct SqliteCepStore {
    pool: SqlitePool,
}

impl SqliteCepStore {
    /// Open (or create) the database at `url`, e.g. `sqlite://cepario.db`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::storage_with_source("invalid database url", e))?
            .create_if_missing(true);

        // One resolve call in flight per handle; a single connection is
        // all this store needs (and keeps in-memory databases alive).
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| Error::storage_with_source("failed to open database", e))?;

        Ok(Self { pool })
    }

    /// Create the `cep` table when it does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage_with_source("failed to create schema", e))?;
        debug!("cep table ready");
        Ok(())
    }
}

#[async_trait]
impl CepStore for SqliteCepStore {
    async fn get(&self, cep: &str) -> Result<Option<CepRecord>> {
        sqlx::query_as::<_, CepRecord>(SELECT_BY_CEP)
            .bind(cep)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::storage_with_source(format!("failed to read cep {cep}"), e))
    }

    async fn create(&self, fields: CepFields) -> Result<CepRecord> {
        let record = CepRecord::from_fields(fields)?;

        sqlx::query(INSERT_RECORD)
            .bind(&record.cep)
            .bind(&record.logradouro)
            .bind(&record.complemento)
            .bind(&record.unidade)
            .bind(&record.bairro)
            .bind(&record.localidade)
            .bind(&record.uf)
            .bind(&record.estado)
            .bind(&record.regiao)
            .bind(&record.ibge)
            .bind(&record.gia)
            .bind(&record.ddd)
            .bind(&record.siafi)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::storage_with_source(format!("failed to insert cep {}", record.cep), e)
            })?;

        // Return the stored copy, not the input: the database is the
        // canonical representation.
        self.get(&record.cep).await?.ok_or_else(|| {
            Error::storage(format!("cep {} missing after insert", record.cep))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store() -> SqliteCepStore {
        let store = SqliteCepStore::connect("sqlite::memory:").await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    fn fields(value: serde_json::Value) -> CepFields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let store = store().await;
        store.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_get_miss() {
        let store = store().await;
        assert!(store.get("01001000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = store().await;

        let created = store
            .create(fields(json!({
                "cep": "01001000",
                "logradouro": "Praça da Sé",
                "bairro": "Sé",
                "localidade": "São Paulo",
                "uf": "SP",
                "ddd": "11",
            })))
            .await
            .unwrap();

        assert_eq!(created.cep, "01001000");
        assert_eq!(created.logradouro.as_deref(), Some("Praça da Sé"));
        assert!(created.estado.is_none());

        let read_back = store.get("01001000").await.unwrap();
        assert_eq!(read_back, Some(created));
    }

    #[tokio::test]
    async fn test_create_duplicate_cep_fails() {
        let store = store().await;
        let data = fields(json!({"cep": "01001000", "uf": "SP"}));

        store.create(data.clone()).await.unwrap();
        let result = store.create(data).await;
        assert!(matches!(result, Err(Error::Storage { .. })));
    }

    #[tokio::test]
    async fn test_create_without_cep_is_lenient() {
        // A missing code persists as an empty string; the store does not
        // second-guess the resolver's lenient normalization.
        let store = store().await;
        let created = store
            .create(fields(json!({"logradouro": "Rua Sem Código"})))
            .await
            .unwrap();
        assert_eq!(created.cep, "");
        assert_eq!(store.get("").await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_fields() {
        let store = store().await;
        let result = store
            .create(fields(json!({"cep": "01001000", "logradouro": 42})))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cepario.db");
        let url = format!("sqlite://{}", path.display());

        let store = SqliteCepStore::connect(&url).await.unwrap();
        store.init_schema().await.unwrap();
        store
            .create(fields(json!({"cep": "70040010", "uf": "DF"})))
            .await
            .unwrap();

        assert!(path.exists());
    }
}
