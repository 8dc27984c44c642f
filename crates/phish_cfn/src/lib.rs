//! # phish_cfn
//!
//! CloudFormation template model for the Gophish deployment stacks.
//!
//! Templates are plain resource graphs: parameters, resources and outputs
//! keyed by logical name, linked to one another only through intrinsic
//! functions. Nothing here talks to AWS.
//!
//! ## Features
//!
//! - Typed parameters, resources, outputs and exports
//! - Intrinsic function helpers (`Ref`, `Fn::GetAtt`, `Fn::Sub`, ...)
//! - Checked cross-template imports through [`StackExports`]
//! - Parameter files for `aws cloudformation deploy`
//! - Local validation of references and section limits
//!
//! ## Example
//!
//! ```rust
//! use phish_cfn::{intrinsic, Output, Resource, ResourceType, StackExports, Template};
//!
//! let mut zones = Template::new("Zones");
//! zones
//!     .add_resource("Domain0", Resource::new(ResourceType::HostedZone).with("Name", "example.com"))
//!     .unwrap();
//! zones
//!     .add_output(
//!         "ZoneId0",
//!         Output::new(intrinsic::reference("Domain0")).exported_as("ZoneId0"),
//!     )
//!     .unwrap();
//!
//! let exports = StackExports::from_template(&zones).unwrap();
//! let zone_id = exports.import("ZoneId0").unwrap();
//! assert_eq!(zone_id["Fn::ImportValue"], "ZoneId0");
//! ```

pub mod error;
pub mod intrinsic;
pub mod linker;
pub mod parameter;
pub mod resource;
pub mod template;
pub mod validator;

pub use error::{CfnError, CfnResult};
pub use linker::{ExportedValue, ParameterValue, ParameterValues, StackExports};
pub use parameter::{Parameter, ParameterType};
pub use resource::{AutoScalingTag, Resource, ResourceType, Tag};
pub use template::{Export, Output, Template, FORMAT_VERSION};
pub use validator::{TemplateValidator, ValidationCheck, ValidationReport};
