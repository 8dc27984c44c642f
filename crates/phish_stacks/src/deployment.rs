//! Rendering both stacks from one configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::GophishConfig;
use crate::error::StackResult;
use crate::gophish::GophishStack;
use crate::hosted_zones::HostedZonesStack;

pub const HOSTED_ZONES_FILE: &str = "hosted-zones.json";
pub const GOPHISH_FILE: &str = "gophish.json";
pub const GOPHISH_PARAMETERS_FILE: &str = "gophish.parameters.json";

/// Both rendered templates, plus the Gophish parameter file when the
/// configuration carries parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDeployment {
    pub hosted_zones: String,
    pub gophish: String,
    pub gophish_parameters: Option<String>,
}

impl RenderedDeployment {
    /// Write every document into `dir`, returning the written paths.
    pub fn write_to(&self, dir: &Path) -> StackResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut files = vec![
            (dir.join(HOSTED_ZONES_FILE), &self.hosted_zones),
            (dir.join(GOPHISH_FILE), &self.gophish),
        ];
        if let Some(parameters) = &self.gophish_parameters {
            files.push((dir.join(GOPHISH_PARAMETERS_FILE), parameters));
        }

        let mut written = Vec::new();
        for (path, content) in files {
            fs::write(&path, content)?;
            info!("Wrote {:?}", path);
            written.push(path);
        }
        Ok(written)
    }
}

/// Renders the hosted-zone and Gophish stacks together.
pub struct Deployment;

impl Deployment {
    /// Generate both templates from one domain list.
    pub fn render(config: &GophishConfig) -> StackResult<RenderedDeployment> {
        let (zones_template, zones) = HostedZonesStack::build(&config.domains)?;
        let gophish_template = GophishStack::build(config, &zones)?;

        let gophish_parameters = if config.parameters.is_empty() {
            None
        } else {
            let missing = config.parameters.check(&gophish_template)?;
            if !missing.is_empty() {
                warn!("No value for parameters without default: {}", missing.join(", "));
            }
            Some(config.parameters.to_parameter_file(&gophish_template)?)
        };

        Ok(RenderedDeployment {
            hosted_zones: zones_template.to_json()?,
            gophish: gophish_template.to_json()?,
            gophish_parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngressRules;
    use crate::domains::DomainList;
    use crate::error::StackError;
    use phish_cfn::CfnError;
    use tempfile::tempdir;

    fn config() -> GophishConfig {
        GophishConfig::new(
            DomainList::new(["a.com", "b.com"]),
            IngressRules::default(),
            "#!/bin/bash",
        )
    }

    #[test]
    fn test_render_without_parameters() {
        let rendered = Deployment::render(&config()).unwrap();
        assert!(rendered.gophish_parameters.is_none());
        assert!(rendered.hosted_zones.contains("GophishHostedZoneId1"));
        assert!(rendered.gophish.contains("\"Fn::ImportValue\": \"GophishHostedZoneId1\""));
    }

    #[test]
    fn test_render_with_parameters() {
        let mut cfg = config();
        cfg.parameters.insert("VpcId", "vpc-123");

        let rendered = Deployment::render(&cfg).unwrap();
        assert!(rendered.gophish_parameters.unwrap().contains("vpc-123"));
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let mut cfg = config();
        cfg.parameters.insert("Bogus", "1");

        assert!(matches!(
            Deployment::render(&cfg),
            Err(StackError::Template(CfnError::UnknownParameter(_)))
        ));
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempdir().unwrap();
        let mut cfg = config();
        cfg.parameters.insert("VpcId", "vpc-123");

        let written = Deployment::render(&cfg).unwrap().write_to(&dir.path().join("out")).unwrap();

        assert_eq!(written.len(), 3);
        assert!(dir.path().join("out").join(HOSTED_ZONES_FILE).exists());
        assert!(dir.path().join("out").join(GOPHISH_FILE).exists());
        assert!(dir.path().join("out").join(GOPHISH_PARAMETERS_FILE).exists());
    }
}
