//! phish CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or configuration
//! - 3: Validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use phish_cfn::CfnError;
use phish_stacks::StackError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_CONFIG: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "phish=debug,phish_stacks=debug,phish_cfn=debug,warn"
    } else if cli.quiet {
        "warn"
    } else {
        "phish=info,phish_stacks=info,phish_cfn=info,warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Already initialized is fine
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Commands::HostedZones(args) => commands::hosted_zones::execute(args),
        Commands::Gophish(args) => commands::gophish::execute(args),
        Commands::Render(args) => commands::render::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Map an error to its exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<commands::validate::ValidationFailed>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    if e.downcast_ref::<CfnError>().is_some() {
        return ExitCodes::TEMPLATE_ERROR;
    }

    match e.downcast_ref::<StackError>() {
        Some(StackError::Template(_)) => ExitCodes::TEMPLATE_ERROR,
        Some(StackError::Io(_)) => ExitCodes::GENERAL_ERROR,
        Some(_) => ExitCodes::INVALID_CONFIG,
        None => ExitCodes::GENERAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::validate::ValidationFailed;

    #[test]
    fn test_config_errors_map_to_invalid_config() {
        let err = anyhow::Error::from(StackError::NoDomains).context("Failed to render");
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_CONFIG);
    }

    #[test]
    fn test_template_errors_map_to_template_error() {
        let err = anyhow::Error::from(CfnError::UnknownExport("GophishHostedZoneId0".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::TEMPLATE_ERROR);

        let nested = anyhow::Error::from(StackError::from(CfnError::UnknownParameter("Bogus".to_string())));
        assert_eq!(categorize_error(&nested), ExitCodes::TEMPLATE_ERROR);
    }

    #[test]
    fn test_validation_failure_maps_to_validation_code() {
        let err = anyhow::Error::from(ValidationFailed { failed: 1 });
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }
}
