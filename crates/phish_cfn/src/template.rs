//! Template document and serialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::debug;

use crate::error::{CfnError, CfnResult};
use crate::parameter::Parameter;
use crate::resource::{Resource, ResourceType};

/// The only template format version CloudFormation accepts.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// Exported name of an output, importable from other stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    #[serde(rename = "Name")]
    pub name: String,
}

/// A named value derived from the template, optionally exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

impl Output {
    pub fn new(value: Value) -> Self {
        Self {
            description: None,
            value,
            export: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn exported_as(mut self, name: impl Into<String>) -> Self {
        self.export = Some(Export { name: name.into() });
        self
    }

    pub fn export_name(&self) -> Option<&str> {
        self.export.as_ref().map(|e| e.name.as_str())
    }
}

/// A CloudFormation template: parameters, resources and outputs keyed by
/// logical name.
///
/// Sections are ordered by logical name so that serialization is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Parameters")]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Resource>,
    #[serde(rename = "Outputs")]
    pub outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            description: description.into(),
            parameters: BTreeMap::new(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Declare a parameter. Parameters and resources share one namespace.
    pub fn add_parameter(&mut self, id: impl Into<String>, parameter: Parameter) -> CfnResult<()> {
        let id = id.into();
        if self.parameters.contains_key(&id) || self.resources.contains_key(&id) {
            return Err(CfnError::DuplicateLogicalId { section: "Parameters", id });
        }
        debug!("Declared parameter {}", id);
        self.parameters.insert(id, parameter);
        Ok(())
    }

    /// Declare a resource.
    pub fn add_resource(&mut self, id: impl Into<String>, resource: Resource) -> CfnResult<()> {
        let id = id.into();
        if self.resources.contains_key(&id) || self.parameters.contains_key(&id) {
            return Err(CfnError::DuplicateLogicalId { section: "Resources", id });
        }
        debug!("Declared resource {} ({})", id, resource.resource_type);
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Declare an output.
    pub fn add_output(&mut self, id: impl Into<String>, output: Output) -> CfnResult<()> {
        let id = id.into();
        if self.outputs.contains_key(&id) {
            return Err(CfnError::DuplicateLogicalId { section: "Outputs", id });
        }
        self.outputs.insert(id, output);
        Ok(())
    }

    pub fn parameter(&self, id: &str) -> Option<&Parameter> {
        self.parameters.get(id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn output(&self, id: &str) -> Option<&Output> {
        self.outputs.get(id)
    }

    /// Resources of one kind, in logical-name order.
    pub fn resources_of_type(&self, kind: ResourceType) -> Vec<(&str, &Resource)> {
        self.resources
            .iter()
            .filter(|(_, r)| r.resource_type == kind)
            .map(|(id, r)| (id.as_str(), r))
            .collect()
    }

    pub fn count_of_type(&self, kind: ResourceType) -> usize {
        self.resources.values().filter(|r| r.resource_type == kind).count()
    }

    /// Whether a name resolves as a `Ref` target in this template.
    pub fn declares(&self, id: &str) -> bool {
        self.parameters.contains_key(id) || self.resources.contains_key(id)
    }

    pub fn to_value(&self) -> CfnResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to the JSON document, keys sorted and indented by four
    /// spaces.
    pub fn to_json(&self) -> CfnResult<String> {
        let value = self.to_value()?;
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intrinsic::reference;
    use crate::parameter::ParameterType;
    use serde_json::json;

    fn sample() -> Template {
        let mut t = Template::new("Sample");
        t.add_parameter("VpcId", Parameter::new(ParameterType::VpcId, "VPC"))
            .unwrap();
        t.add_resource(
            "Zone",
            Resource::new(ResourceType::HostedZone).with("Name", "a.com"),
        )
        .unwrap();
        t.add_output(
            "ZoneId",
            Output::new(reference("Zone")).exported_as("ZoneId"),
        )
        .unwrap();
        t
    }

    #[test]
    fn test_top_level_schema() {
        let value = sample().to_value().unwrap();
        assert_eq!(value["AWSTemplateFormatVersion"], json!("2010-09-09"));
        assert_eq!(value["Description"], json!("Sample"));
        assert_eq!(value["Resources"]["Zone"]["Type"], json!("AWS::Route53::HostedZone"));
        assert_eq!(value["Outputs"]["ZoneId"]["Export"]["Name"], json!("ZoneId"));
    }

    #[test]
    fn test_empty_sections_still_emitted() {
        let value = Template::new("Empty").to_value().unwrap();
        assert_eq!(value["Parameters"], json!({}));
        assert_eq!(value["Outputs"], json!({}));
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let mut t = sample();
        let err = t
            .add_resource("Zone", Resource::new(ResourceType::HostedZone))
            .unwrap_err();
        assert!(matches!(err, CfnError::DuplicateLogicalId { section: "Resources", .. }));
    }

    #[test]
    fn test_resource_cannot_shadow_parameter() {
        let mut t = sample();
        assert!(t
            .add_resource("VpcId", Resource::new(ResourceType::SecurityGroup))
            .is_err());
        assert!(t
            .add_parameter("Zone", Parameter::new(ParameterType::String, "x"))
            .is_err());
    }

    #[test]
    fn test_json_is_stable_and_indented() {
        let first = sample().to_json().unwrap();
        let second = sample().to_json().unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\n    \"AWSTemplateFormatVersion\": \"2010-09-09\""));
    }

    #[test]
    fn test_keys_sorted() {
        let json = sample().to_json().unwrap();
        let outputs = json.find("\"Outputs\"").unwrap();
        let params = json.find("\"Parameters\"").unwrap();
        let resources = json.find("\"Resources\"").unwrap();
        assert!(outputs < params && params < resources);
    }

    #[test]
    fn test_count_of_type() {
        let t = sample();
        assert_eq!(t.count_of_type(ResourceType::HostedZone), 1);
        assert_eq!(t.count_of_type(ResourceType::Certificate), 0);
        assert!(t.declares("VpcId"));
        assert!(t.declares("Zone"));
        assert!(!t.declares("ZoneId"));
    }
}
