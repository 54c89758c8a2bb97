//! Top-level argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::files::FilesArgs;
use crate::cli::commands::run::RunArgs;
use crate::cli::commands::session::SessionArgs;

#[derive(Parser, Debug)]
#[command(name = "casegen")]
#[command(about = "Casegen - generate test cases for a repository and open them as a pull request", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of .casegen/config.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files of a repository
    Files(FilesArgs),

    /// Load, select, summarise and optionally generate and submit in one pass
    Run(RunArgs),

    /// Drive the workflow interactively
    Session(SessionArgs),
}
