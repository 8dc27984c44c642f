//! Gophish stack generation.
//!
//! One linear pass: parameters, network, compute, then one group of
//! resources per domain.

mod certificates;
mod compute;
mod network;
pub mod parameters;

use tracing::{debug, info};

use phish_cfn::Template;

use crate::config::GophishConfig;
use crate::error::{StackError, StackResult};
use crate::hosted_zones::{HostedZoneExports, HostedZonesStack};

pub use network::{instance_ingress, load_balancer_ingress, IngressRule};

pub const DESCRIPTION: &str = "Gophish Phishing EC2 & Cloudfront with TLS";

pub const SG_INSTANCE: &str = "SGGophish";
pub const SG_ALB: &str = "SGAlb";
pub const ALB: &str = "ALBGophish";
pub const HTTP_LISTENER: &str = "ALBListenerHttp";
pub const HTTPS_LISTENER: &str = "ALBListenerHttps";
pub const TARGET_GROUP: &str = "TGGophishLanding";
pub const INSTANCE_ROLE: &str = "EC2InstanceRole";
pub const INSTANCE_PROFILE: &str = "EC2InstanceProfile";
pub const ASG: &str = "ASGGophish";
pub const LAUNCH_CONFIGURATION: &str = "LCGophish";

/// Generator for the Gophish compute, network, certificate and DNS stack.
pub struct GophishStack;

impl GophishStack {
    /// Build the stack, importing hosted zone ids from `zones`.
    ///
    /// Fails before emitting anything if the domain list is empty or does
    /// not match the list the zones were exported for.
    pub fn build(config: &GophishConfig, zones: &HostedZoneExports) -> StackResult<Template> {
        if config.domains.is_empty() {
            return Err(StackError::NoDomains);
        }
        zones.check_alignment(&config.domains)?;

        let mut template = Template::new(DESCRIPTION);

        parameters::declare(&mut template)?;
        network::declare(&mut template, &config.ingress_rules)?;
        compute::declare(&mut template, &config.ec2_user_data)?;

        for entry in config.domains.entries() {
            debug!("Declaring resources for domain {} ({})", entry.index, entry.name);
            certificates::declare(&mut template, entry, zones.zone_id(entry.index)?)?;
        }

        info!(
            "Built Gophish stack: {} domains, {} resources",
            config.domains.len(),
            template.resources.len()
        );
        Ok(template)
    }

    /// Render the stack as JSON, deriving the zone exports from the same
    /// domain list.
    pub fn render(config: &GophishConfig) -> StackResult<String> {
        let (_, zones) = HostedZonesStack::build(&config.domains)?;
        Ok(Self::build(config, &zones)?.to_json()?)
    }
}
