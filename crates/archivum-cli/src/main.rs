mod cli;
mod commands;
mod logging;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use archivum::{contract, resolve_config, UnknownFields, ValidationOptions};

use cli::{Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())
        .context("failed to load configuration")?;
    let log_format = cli
        .log_format
        .map(Into::into)
        .unwrap_or(config.logging.format);
    logging::init(&config.logging, log_format, cli.verbose)?;

    info!("Starting archivum v{}", env!("CARGO_PKG_VERSION"));

    let success = match cli.command {
        Command::Validate {
            paths,
            format,
            reject_unknown,
            status_coherence,
            workers,
        } => {
            let mut options = ValidationOptions::from(&config.validation);
            if reject_unknown {
                options.unknown_fields = UnknownFields::Reject;
            }
            options.status_coherence |= status_coherence;

            commands::validate(
                &paths,
                options,
                workers.unwrap_or(config.workers.count),
                format,
                std::io::stdin().lock(),
                &mut std::io::stdout().lock(),
            )?
        }
        Command::Schema => {
            println!("{}", contract::schema_json().trim_end());
            true
        }
        Command::Transition { from, to } => {
            commands::transition(&from, &to, &mut std::io::stdout().lock())?
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
