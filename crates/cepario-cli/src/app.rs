//! Command dispatch for the Cepário CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cepario_core::{CepRecord, CepResolver, Error, Result};
use cepario_storage::SqliteCepStore;
use cepario_viacep::ViaCepClient;

use crate::cli::{CliArgs, Command, ConfigAction};
use crate::config::CeparioConfig;

/// The CLI application: loaded configuration plus command handlers.
pub struct CeparioApp {
    config: CeparioConfig,
}

impl CeparioApp {
    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    fn init_logging(verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(args: CliArgs) -> Result<ExitCode> {
        Self::init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Lookup { cep, json }) => {
                let config = CeparioConfig::load(args.config.as_deref())?;
                let app = CeparioApp { config };
                let found = app.lookup(&cep, json).await?;
                Ok(if found {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Some(Command::Version) => {
                println!("cepario {}", env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Config(config_cmd)) => {
                handle_config_command(args.config.as_deref(), config_cmd.command)?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!(
                    "cepario {} — use --help for usage",
                    env!("CARGO_PKG_VERSION")
                );
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    /// Resolve a CEP and print the result.
    ///
    /// "Not found" is not an error: it prints a message and reports
    /// `false`, which `run` turns into a nonzero exit code.
    async fn lookup(&self, raw: &str, json: bool) -> Result<bool> {
        let store = SqliteCepStore::connect(&self.config.database.url).await?;
        store.init_schema().await?;
        let client = ViaCepClient::new(self.config.viacep.base_url.as_str());
        let resolver = CepResolver::new(store, client);

        match resolver.resolve(raw).await {
            Some(record) => {
                if json {
                    let out = serde_json::to_string_pretty(&record)
                        .map_err(|e| Error::invalid_data(e.to_string()))?;
                    println!("{out}");
                } else {
                    print_record(&record);
                }
                Ok(true)
            }
            None => {
                println!("No address found for '{raw}'");
                Ok(false)
            }
        }
    }
}

/// Print a record as labeled fields.
fn print_record(record: &CepRecord) {
    let field = |v: &Option<String>| v.as_deref().unwrap_or("-").to_string();

    println!("CEP:         {}", record.cep);
    println!("Logradouro:  {}", field(&record.logradouro));
    println!("Complemento: {}", field(&record.complemento));
    println!("Bairro:      {}", field(&record.bairro));
    println!("Localidade:  {}", field(&record.localidade));
    println!("UF:          {}", field(&record.uf));
    println!("Estado:      {}", field(&record.estado));
    println!("Região:      {}", field(&record.regiao));
    println!("IBGE:        {}", field(&record.ibge));
    println!("GIA:         {}", field(&record.gia));
    println!("DDD:         {}", field(&record.ddd));
    println!("SIAFI:       {}", field(&record.siafi));
}

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because these
/// commands work before a config file exists.
fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
    }
}

/// Show the resolved config file path.
fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match CeparioConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist — run `cepario config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Create a default configuration file.
fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => CeparioConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("{}: {e}", parent.display())))?;
    }

    let toml_str = CeparioConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str)
        .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;

    println!("Config file created at {}", path.display());
    Ok(())
}
