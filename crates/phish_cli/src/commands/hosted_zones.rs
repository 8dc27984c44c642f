//! Hosted-zones command - Render the hosted-zone template.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use phish_stacks::{HostedZonesConfig, HostedZonesStack};

use super::{emit, ConfigArg};

#[derive(Args)]
pub struct HostedZonesArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(args: HostedZonesArgs) -> Result<()> {
    info!("Rendering hosted zones from {:?}", args.config.config);

    let config = HostedZonesConfig::from_file(&args.config.config)
        .with_context(|| format!("Failed to load config {:?}", args.config.config))?;

    let document = HostedZonesStack::render(&config.domains)?;
    emit(&document, args.output.as_deref())
}
