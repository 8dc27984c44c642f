//! Render command - Write every deployment document into a directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use phish_stacks::{Deployment, GophishConfig};

use super::ConfigArg;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Directory to write the templates into
    #[arg(short = 'd', long, default_value = "templates")]
    out_dir: PathBuf,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    info!("Rendering deployment from {:?}", args.config.config);

    let config = GophishConfig::from_file(&args.config.config)
        .with_context(|| format!("Failed to load config {:?}", args.config.config))?;

    let rendered = Deployment::render(&config)?;
    let written = rendered.write_to(&args.out_dir)?;

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
