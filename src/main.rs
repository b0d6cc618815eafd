mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::commands::io_helpers::build_service;
use crate::cli::{Cli, Commands};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the selected command. `Ok(false)` means "completed, but exit non-zero".
fn run(args: &Cli) -> Result<bool> {
    let config = AppConfig::load(args.config.as_deref())?;

    match &args.command {
        Commands::Passphrase { words } => {
            cli::commands::passphrase::execute(&config, *words).map(|_| true)
        }
        Commands::Keygen { output } => {
            let service = build_service(&config)?;
            cli::commands::keygen::execute(&service, output.as_deref()).map(|_| true)
        }
        Commands::Encrypt {
            recipients,
            recipients_files,
            passphrase,
            output,
            input,
        } => {
            let service = build_service(&config)?;
            cli::commands::encrypt::execute(
                &service,
                recipients,
                recipients_files,
                passphrase.as_deref(),
                output.as_deref(),
                input.as_deref(),
            )
            .map(|_| true)
        }
        Commands::Decrypt {
            identities,
            identity_files,
            passphrase,
            output,
            input,
        } => {
            let service = build_service(&config)?;
            cli::commands::decrypt::execute(
                &service,
                identities,
                identity_files,
                passphrase.as_deref(),
                output.as_deref(),
                input.as_deref(),
            )
            .map(|_| true)
        }
        Commands::Handle { path, body } => {
            let service = build_service(&config)?;
            cli::commands::handle::execute(service, path, body.as_deref())
        }
    }
}

fn main() {
    let args = Cli::parse();
    cli::context::init(args.quiet, args.verbose);
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::debug!(kind = %e.kind(), "command failed");
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    }
}
