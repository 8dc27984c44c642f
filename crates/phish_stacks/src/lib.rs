//! # phish_stacks
//!
//! CloudFormation generators for a Gophish phishing-simulation deployment.
//!
//! Two stacks are generated from one configuration:
//!
//! - **Hosted zones**: one Route 53 zone per domain, each zone id exported
//!   as `GophishHostedZoneId{index}`
//! - **Gophish**: security groups, an internet-facing load balancer that
//!   redirects HTTP to HTTPS, an auto-scaling group of instances, and per
//!   domain a DNS-validated certificate and alias records
//!
//! The Gophish stack imports zone ids through [`HostedZoneExports`], so a
//! domain list that does not match the hosted zones is rejected at
//! generation time instead of at deploy time.
//!
//! ## Example
//!
//! ```rust
//! use phish_stacks::{DomainList, GophishConfig, GophishStack, HostedZonesStack, IngressRules};
//!
//! let config = GophishConfig::new(
//!     DomainList::new(["phish.example"]),
//!     IngressRules {
//!         admin_console: vec!["203.0.113.0/24".to_string()],
//!         landing_pages: vec!["0.0.0.0/0".to_string()],
//!     },
//!     "#!/bin/bash\n",
//! );
//!
//! let (zones_template, zones) = HostedZonesStack::build(&config.domains).unwrap();
//! let stack = GophishStack::build(&config, &zones).unwrap();
//!
//! let zones_json = zones_template.to_json().unwrap();
//! let stack_json = stack.to_json().unwrap();
//! assert!(zones_json.contains("GophishHostedZoneId0"));
//! assert!(stack_json.contains("ACMAlbCertificate0"));
//! ```

pub mod config;
pub mod deployment;
pub mod domains;
pub mod error;
pub mod gophish;
pub mod hosted_zones;
pub mod policy;

pub use config::{GophishConfig, HostedZonesConfig, IngressRules};
pub use deployment::{Deployment, RenderedDeployment};
pub use domains::{DomainEntry, DomainList};
pub use error::{StackError, StackResult};
pub use gophish::GophishStack;
pub use hosted_zones::{HostedZoneExports, HostedZonesStack};
pub use policy::{association_policy, CertificateAssociation};
