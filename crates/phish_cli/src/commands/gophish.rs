//! Gophish command - Render the Gophish stack template.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use phish_stacks::{GophishConfig, GophishStack};

use super::{emit, ConfigArg};

#[derive(Args)]
pub struct GophishArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(args: GophishArgs) -> Result<()> {
    info!("Rendering Gophish stack from {:?}", args.config.config);

    let config = GophishConfig::from_file(&args.config.config)
        .with_context(|| format!("Failed to load config {:?}", args.config.config))?;

    let document = GophishStack::render(&config)?;
    emit(&document, args.output.as_deref())
}
