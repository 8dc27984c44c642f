//! Template parameter definitions.

use serde::{Deserialize, Serialize};

/// CloudFormation parameter types used by the Gophish stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    Number,
    #[serde(rename = "AWS::EC2::VPC::Id")]
    VpcId,
    #[serde(rename = "List<AWS::EC2::Subnet::Id>")]
    SubnetIdList,
    #[serde(rename = "AWS::EC2::KeyPair::KeyName")]
    KeyPairName,
    #[serde(rename = "AWS::SSM::Parameter::Value<AWS::EC2::Image::Id>")]
    SsmImageId,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
            ParameterType::Number => "Number",
            ParameterType::VpcId => "AWS::EC2::VPC::Id",
            ParameterType::SubnetIdList => "List<AWS::EC2::Subnet::Id>",
            ParameterType::KeyPairName => "AWS::EC2::KeyPair::KeyName",
            ParameterType::SsmImageId => "AWS::SSM::Parameter::Value<AWS::EC2::Image::Id>",
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed input placeholder, declared once and referenced by logical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(rename = "Type")]
    pub param_type: ParameterType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_echo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_description: Option<String>,
}

impl Parameter {
    pub fn new(param_type: ParameterType, description: impl Into<String>) -> Self {
        Self {
            param_type,
            description: description.into(),
            default: None,
            no_echo: None,
            constraint_description: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mask the value in console output and API responses.
    pub fn no_echo(mut self) -> Self {
        self.no_echo = Some(true);
        self
    }

    pub fn with_constraint_description(mut self, text: impl Into<String>) -> Self {
        self.constraint_description = Some(text.into());
        self
    }

    pub fn is_secret(&self) -> bool {
        self.no_echo.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_serializes_aws_type() {
        let param = Parameter::new(ParameterType::VpcId, "VPC to deploy template in")
            .with_constraint_description("Must be the ID of an existing VPC.");

        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "Type": "AWS::EC2::VPC::Id",
                "Description": "VPC to deploy template in",
                "ConstraintDescription": "Must be the ID of an existing VPC."
            })
        );
    }

    #[test]
    fn test_no_echo_only_emitted_when_set() {
        let plain = serde_json::to_value(Parameter::new(ParameterType::String, "x")).unwrap();
        assert!(plain.get("NoEcho").is_none());

        let secret = Parameter::new(ParameterType::String, "x").no_echo();
        assert!(secret.is_secret());
        assert_eq!(serde_json::to_value(&secret).unwrap()["NoEcho"], json!(true));
    }

    #[test]
    fn test_type_display() {
        assert_eq!(ParameterType::SubnetIdList.to_string(), "List<AWS::EC2::Subnet::Id>");
        assert_eq!(ParameterType::SsmImageId.to_string(), "AWS::SSM::Parameter::Value<AWS::EC2::Image::Id>");
    }
}
