//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "cepario", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "CEPARIO_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a CEP to its address record.
    Lookup {
        /// The CEP to resolve; punctuation is tolerated ("01001-000").
        cep: String,

        /// Print the record as JSON instead of labeled fields.
        #[arg(long)]
        json: bool,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["cepario"]);
        assert!(args.config.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_flags() {
        let args = CliArgs::parse_from(["cepario", "--verbose"]);
        assert!(args.verbose);

        let args = CliArgs::parse_from(["cepario", "--quiet"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["cepario", "--config", "/path/config.toml"]);
        assert_eq!(args.config.as_deref(), Some("/path/config.toml"));
    }

    #[test]
    fn test_lookup_command() {
        let args = CliArgs::parse_from(["cepario", "lookup", "01001-000"]);
        match args.command {
            Some(Command::Lookup { cep, json }) => {
                assert_eq!(cep, "01001-000");
                assert!(!json);
            }
            _ => panic!("Expected Lookup command"),
        }
    }

    #[test]
    fn test_lookup_command_json() {
        let args = CliArgs::parse_from(["cepario", "lookup", "01001000", "--json"]);
        match args.command {
            Some(Command::Lookup { json, .. }) => assert!(json),
            _ => panic!("Expected Lookup command with json"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = CliArgs::parse_from(["cepario", "version"]);
        assert!(matches!(args.command, Some(Command::Version)));
    }

    #[test]
    fn test_config_path_command() {
        let args = CliArgs::parse_from(["cepario", "config", "path"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Path,
            })) => {}
            _ => panic!("Expected Config Path command"),
        }
    }

    #[test]
    fn test_config_init_command() {
        let args = CliArgs::parse_from(["cepario", "config", "init", "--force"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
