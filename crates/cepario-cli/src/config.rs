//! Configuration for the Cepário CLI.
//!
//! Loads from TOML files, environment variables, and defaults using the
//! `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `CEPARIO_CONFIG` environment variable
//! 3. XDG default: `~/.config/cepario/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};

use cepario_core::{Error, Result};

/// Main configuration for the Cepário CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CeparioConfig {
    /// Database configuration.
    pub database: DatabaseConfig,

    /// ViaCEP upstream configuration.
    pub viacep: ViaCepConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    pub url: String,
}

/// ViaCEP upstream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepConfig {
    /// Base URL of the ViaCEP API.
    pub base_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://cepario.db".to_string(),
        }
    }
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: cepario_viacep::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl CeparioConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("CEPARIO");
        env_opts.add_section("database");
        env_opts.add_section("viacep");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG
    /// default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("CEPARIO_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cepario").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// RAII guard for env var manipulation in tests.
    struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self {
                key: key.to_string(),
                prev,
            }
        }

        fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            std::env::remove_var(key);
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(ref val) = self.prev {
                std::env::set_var(&self.key, val);
            } else {
                std::env::remove_var(&self.key);
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = CeparioConfig::default();
        assert_eq!(config.database.url, "sqlite://cepario.db");
        assert_eq!(config.viacep.base_url, "https://viacep.com.br/ws");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [database]
            url = "sqlite:///var/lib/cepario/cep.db"

            [viacep]
            base_url = "https://viacep.example/ws"
        "#;

        let config: CeparioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database.url, "sqlite:///var/lib/cepario/cep.db");
        assert_eq!(config.viacep.base_url, "https://viacep.example/ws");
    }

    #[test]
    fn test_config_to_toml_round_trip() {
        let config = CeparioConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[viacep]"));

        let parsed: CeparioConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.database.url, config.database.url);
        assert_eq!(parsed.viacep.base_url, config.viacep.base_url);
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [database]
                url = "sqlite://from-file.db"
            "#,
        )
        .unwrap();

        let config = CeparioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.database.url, "sqlite://from-file.db");
        // Unset sections fall back to defaults.
        assert_eq!(config.viacep.base_url, "https://viacep.com.br/ws");
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let config = CeparioConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.database.url, "sqlite://cepario.db");
    }

    #[test]
    fn test_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [viacep]
                base_url = "https://file.example/ws"
            "#,
        )
        .unwrap();

        let _guard = EnvGuard::new("CEPARIO_VIACEP_BASE_URL", "https://env.example/ws");
        let config = CeparioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.viacep.base_url, "https://env.example/ws");
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = CeparioConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _guard = EnvGuard::new("CEPARIO_CONFIG", "/env/config.toml");
        let path = CeparioConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _guard = EnvGuard::remove("CEPARIO_CONFIG");
        let path = CeparioConfig::resolve_config_path(None);
        let p = path.unwrap();
        assert!(p.to_str().unwrap().contains("cepario"));
        assert!(p.to_str().unwrap().ends_with("config.toml"));
    }
}
