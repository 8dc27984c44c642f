//! Hosted-zone stack generation.

use tracing::info;

use phish_cfn::{intrinsic, ExportedValue, Output, Resource, ResourceType, StackExports, Template};

use crate::domains::{hosted_zone_export_name, hosted_zone_logical_id, DomainList};
use crate::error::{StackError, StackResult};

pub const DESCRIPTION: &str = "Gophish Phishing Platform Hosted Zones";

/// Hosted zone ids exported by the hosted-zone stack, together with the
/// domain list they were exported for.
///
/// The Gophish stack imports zone ids only through this record, which lets
/// it refuse a domain list that does not line up with the zones.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedZoneExports {
    domains: DomainList,
    exports: StackExports,
}

impl HostedZoneExports {
    pub fn domains(&self) -> &DomainList {
        &self.domains
    }

    pub fn exports(&self) -> &StackExports {
        &self.exports
    }

    /// Check that `domains` is exactly the list these zones were exported
    /// for, in the same order.
    pub fn check_alignment(&self, domains: &DomainList) -> StackResult<()> {
        if domains.len() != self.domains.len() {
            return Err(StackError::DomainCountMismatch {
                stack: domains.len(),
                zones: self.domains.len(),
            });
        }

        for (stack, zone) in domains.entries().zip(self.domains.entries()) {
            if stack.name != zone.name {
                return Err(StackError::DomainMismatch {
                    index: stack.index,
                    stack: stack.name.to_string(),
                    zone: zone.name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// `Fn::ImportValue` of the hosted zone id for domain `index`.
    pub fn zone_id(&self, index: usize) -> StackResult<serde_json::Value> {
        Ok(self.exports.import(&hosted_zone_export_name(index))?)
    }
}

/// Generator for the per-domain hosted-zone stack.
pub struct HostedZonesStack;

impl HostedZonesStack {
    /// Declare one hosted zone and one exported zone id per domain.
    pub fn build(domains: &DomainList) -> StackResult<(Template, HostedZoneExports)> {
        let mut template = Template::new(DESCRIPTION);
        let mut exports = StackExports::new();

        for entry in domains.entries() {
            let zone_id = hosted_zone_logical_id(entry.index);
            let export_name = hosted_zone_export_name(entry.index);
            let description = format!("Hosted zone ID for {}", entry.name);

            template.add_resource(
                zone_id.as_str(),
                Resource::new(ResourceType::HostedZone).with("Name", entry.name),
            )?;

            template.add_output(
                export_name.as_str(),
                Output::new(intrinsic::reference(zone_id.as_str()))
                    .with_description(description.as_str())
                    .exported_as(export_name.as_str()),
            )?;

            exports.add(ExportedValue {
                name: export_name.clone(),
                output_id: export_name,
                description: Some(description),
            })?;
        }

        info!("Built hosted-zone stack for {} domains", domains.len());

        let exports = HostedZoneExports {
            domains: domains.clone(),
            exports,
        };
        Ok((template, exports))
    }

    /// Render the hosted-zone template as JSON.
    pub fn render(domains: &DomainList) -> StackResult<String> {
        let (template, _) = Self::build(domains)?;
        Ok(template.to_json()?)
    }
}
