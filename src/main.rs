//! Casegen CLI entry point.

use clap::Parser;

use casegen::cli::commands::{files, run, session};
use casegen::cli::{handle_error, Cli, Commands};
use casegen::{ConfigLoader, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = loaded.unwrap_or_else(|err| handle_error(err, cli.json));

    let _logger = LoggerImpl::init(&config.logging).unwrap_or_else(|err| handle_error(err, cli.json));

    let result = match cli.command {
        Commands::Files(args) => files::execute(args, &config, cli.json).await,
        Commands::Run(args) => run::execute(args, &config, cli.json).await,
        Commands::Session(args) => session::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
