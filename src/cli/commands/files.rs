//! `casegen files`: list a repository's files.

use anyhow::Result;
use clap::Args;

use crate::cli::display::output;
use crate::cli::models::ListingView;
use crate::cli::output::with_spinner;
use crate::domain::models::Config;

use super::build_engine;

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Repository URL
    pub repository: String,
}

pub async fn execute(args: FilesArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = build_engine(config)?;

    let files = with_spinner(
        "Fetching files from the repository...",
        !json_mode,
        engine.load_listing(&args.repository),
    )
    .await?;

    output(
        &ListingView::new(args.repository.trim(), &files, &[]),
        json_mode,
    );
    Ok(())
}
