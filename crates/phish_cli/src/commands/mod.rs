//! CLI command definitions.
//!
//! Each subcommand renders or checks one part of the Gophish deployment.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

pub mod gophish;
pub mod hosted_zones;
pub mod render;
pub mod validate;

/// phish - CloudFormation templates for a Gophish deployment
#[derive(Parser)]
#[command(name = "phish")]
#[command(version, about = "Render CloudFormation templates for a Gophish deployment")]
#[command(long_about = r#"
Renders the CloudFormation templates of a Gophish phishing-simulation
deployment from one configuration file (YAML, JSON or TOML).

COMMANDS:
  hosted-zones → Hosted zone per domain, zone ids exported
  gophish      → Load balancer, auto-scaling group, certificates, DNS
  render       → Both templates plus the parameter file, into a directory
  validate     → Build both templates and run local checks

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or configuration
  3 - Validation failure
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the hosted-zone template
    #[command(name = "hosted-zones")]
    HostedZones(hosted_zones::HostedZonesArgs),

    /// Render the Gophish stack template
    Gophish(gophish::GophishArgs),

    /// Render every document into a directory
    Render(render::RenderArgs),

    /// Build both templates and run local validation
    Validate(validate::ValidateArgs),
}

/// Write a document to `output`, or to stdout when absent.
pub(crate) fn emit(document: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, document).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => println!("{}", document),
    }
    Ok(())
}

/// Config file argument shared by every command.
#[derive(clap::Args)]
pub struct ConfigArg {
    /// Stack configuration file (.yaml, .yml, .json or .toml)
    #[arg(short, long, env = "PHISH_CONFIG")]
    pub config: PathBuf,
}
