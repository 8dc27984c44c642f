//! Validate command - Build both templates and run local checks.

use anyhow::{Context, Result};
use clap::Args;
use thiserror::Error;
use tracing::info;

use phish_cfn::{CfnResult, Template, TemplateValidator, ValidationReport};
use phish_stacks::{GophishConfig, GophishStack, HostedZonesStack};

use super::ConfigArg;

/// Raised when at least one check failed.
#[derive(Error, Debug)]
#[error("Template validation failed: {failed} check(s) did not pass")]
pub struct ValidationFailed {
    pub failed: usize,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    config: ConfigArg,

    /// Skip the hosted-zone template
    #[arg(long)]
    skip_hosted_zones: bool,
}

fn print_report(name: &str, report: &ValidationReport) {
    println!("{}:", name);
    for check in &report.checks {
        let mark = if check.passed { "ok  " } else { "FAIL" };
        println!("   [{}] {}: {}", mark, check.name, check.message);
    }
}

/// Template checks for the Gophish stack. `ec2UserData` tokens are covered
/// by the template's own `sub` check.
fn gophish_report(config: &GophishConfig, stack: &Template) -> CfnResult<ValidationReport> {
    let mut report = TemplateValidator::validate(stack);

    if !config.parameters.is_empty() {
        let missing = config.parameters.check(stack)?;
        let message = if missing.is_empty() {
            "Every parameter without default has a value".to_string()
        } else {
            format!("Supplied at deploy time: {}", missing.join(", "))
        };
        report.add_check("parameters", true, &message);
    }
    Ok(report)
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating templates for {:?}", args.config.config);

    let config = GophishConfig::from_file(&args.config.config)
        .with_context(|| format!("Failed to load config {:?}", args.config.config))?;

    let (zones_template, zones) = HostedZonesStack::build(&config.domains)?;
    let stack = GophishStack::build(&config, &zones)?;

    let mut failed = 0;

    if !args.skip_hosted_zones {
        let report = TemplateValidator::validate(&zones_template);
        print_report("Hosted zones", &report);
        failed += report.failures().count();
    }

    let report = gophish_report(&config, &stack)?;
    print_report("Gophish", &report);
    failed += report.failures().count();

    println!();
    if failed > 0 {
        if report.failures().any(|c| c.name == "sub") {
            println!("Escape literal ${{...}} in ec2UserData as ${{!Name}}");
        }
        return Err(ValidationFailed { failed }.into());
    }

    println!("All checks passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phish_stacks::{DomainList, IngressRules};

    fn report_for(user_data: &str) -> ValidationReport {
        let mut config = GophishConfig::new(DomainList::new(["a.com"]), IngressRules::default(), user_data);
        config.parameters.insert("VpcId", "vpc-123");
        let (_, zones) = HostedZonesStack::build(&config.domains).unwrap();
        let stack = GophishStack::build(&config, &zones).unwrap();
        gophish_report(&config, &stack).unwrap()
    }

    #[test]
    fn test_user_data_tokens_resolve() {
        let report = report_for("echo ${AdminPort} ${AWS::Region} ${!HOME}");
        assert!(report.passed, "{:?}", report.checks);
        assert!(report.checks.iter().any(|c| c.name == "parameters"));
    }

    #[test]
    fn test_unknown_user_data_token_fails_once() {
        let report = report_for("echo ${HOME}");
        let failures: Vec<_> = report.failures().collect();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "sub");
        assert!(failures[0].message.contains("HOME"));
    }
}
