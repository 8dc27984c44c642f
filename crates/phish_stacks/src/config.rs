//! Generator configuration.
//!
//! One file configures both stacks:
//!
//! ```yaml
//! domains:
//!   - phish.example
//! ingressRules:
//!   adminConsole:
//!     - 203.0.113.0/24
//!   landingPages:
//!     - 0.0.0.0/0
//! ec2UserData: |
//!   #!/bin/bash
//!   echo ${AWS::StackName}
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use phish_cfn::ParameterValues;

use crate::domains::DomainList;
use crate::error::{StackError, StackResult};

/// CIDR allow-lists for the instance and the load balancer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressRules {
    /// Sources allowed SSH and admin console access to the instances.
    pub admin_console: Vec<String>,
    /// Sources allowed HTTP and HTTPS access to the landing pages.
    pub landing_pages: Vec<String>,
}

/// Configuration of the Gophish stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GophishConfig {
    pub ingress_rules: IngressRules,
    /// Boot script; may carry `${...}` substitution tokens.
    pub ec2_user_data: String,
    pub domains: DomainList,
    /// Values for the stack's template parameters.
    #[serde(default, skip_serializing_if = "ParameterValues::is_empty")]
    pub parameters: ParameterValues,
}

impl GophishConfig {
    pub fn new(domains: DomainList, ingress_rules: IngressRules, ec2_user_data: impl Into<String>) -> Self {
        Self {
            ingress_rules,
            ec2_user_data: ec2_user_data.into(),
            domains,
            parameters: ParameterValues::new(),
        }
    }

    /// Load from a YAML, JSON or TOML file.
    pub fn from_file(path: &Path) -> StackResult<Self> {
        load(path)
    }

    /// Hosted-zone configuration over the same domain list.
    pub fn hosted_zones(&self) -> HostedZonesConfig {
        HostedZonesConfig {
            domains: self.domains.clone(),
        }
    }
}

/// Configuration of the hosted-zone stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedZonesConfig {
    pub domains: DomainList,
}

impl HostedZonesConfig {
    pub fn from_file(path: &Path) -> StackResult<Self> {
        load(path)
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> StackResult<T> {
    debug!("Reading config from {:?}", path);
    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "json" => Ok(serde_json::from_str(&content)?),
        "toml" => Ok(toml::from_str(&content)?),
        _ => Err(StackError::UnsupportedFormat(path.to_path_buf())),
    }
}
