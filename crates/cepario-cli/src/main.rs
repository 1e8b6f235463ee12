//! Cepário — resolve Brazilian CEPs with local persistence and ViaCEP
//! fallback.

mod app;
mod cli;
mod config;

use std::process::ExitCode;

use clap::Parser;

use crate::app::CeparioApp;
use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    match CeparioApp::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
