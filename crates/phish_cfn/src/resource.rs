//! Resource declarations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CfnResult;

/// Resource kinds declared by the Gophish stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "AWS::EC2::SecurityGroup")]
    SecurityGroup,
    #[serde(rename = "AWS::ElasticLoadBalancingV2::LoadBalancer")]
    LoadBalancer,
    #[serde(rename = "AWS::ElasticLoadBalancingV2::Listener")]
    Listener,
    #[serde(rename = "AWS::ElasticLoadBalancingV2::ListenerCertificate")]
    ListenerCertificate,
    #[serde(rename = "AWS::ElasticLoadBalancingV2::TargetGroup")]
    TargetGroup,
    #[serde(rename = "AWS::IAM::Role")]
    Role,
    #[serde(rename = "AWS::IAM::InstanceProfile")]
    InstanceProfile,
    #[serde(rename = "AWS::AutoScaling::LaunchConfiguration")]
    LaunchConfiguration,
    #[serde(rename = "AWS::AutoScaling::AutoScalingGroup")]
    AutoScalingGroup,
    #[serde(rename = "AWS::CertificateManager::Certificate")]
    Certificate,
    #[serde(rename = "AWS::Route53::RecordSetGroup")]
    RecordSetGroup,
    #[serde(rename = "AWS::Route53::HostedZone")]
    HostedZone,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::SecurityGroup => "AWS::EC2::SecurityGroup",
            ResourceType::LoadBalancer => "AWS::ElasticLoadBalancingV2::LoadBalancer",
            ResourceType::Listener => "AWS::ElasticLoadBalancingV2::Listener",
            ResourceType::ListenerCertificate => "AWS::ElasticLoadBalancingV2::ListenerCertificate",
            ResourceType::TargetGroup => "AWS::ElasticLoadBalancingV2::TargetGroup",
            ResourceType::Role => "AWS::IAM::Role",
            ResourceType::InstanceProfile => "AWS::IAM::InstanceProfile",
            ResourceType::LaunchConfiguration => "AWS::AutoScaling::LaunchConfiguration",
            ResourceType::AutoScalingGroup => "AWS::AutoScaling::AutoScalingGroup",
            ResourceType::Certificate => "AWS::CertificateManager::Certificate",
            ResourceType::RecordSetGroup => "AWS::Route53::RecordSetGroup",
            ResourceType::HostedZone => "AWS::Route53::HostedZone",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared cloud object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: ResourceType,
    #[serde(rename = "Properties")]
    pub properties: Map<String, Value>,
}

impl Resource {
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            properties: Map::new(),
        }
    }

    /// Set a property, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A `{Key, Value}` resource tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: Value,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Auto-scaling group tag, copied onto the instances it launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingTag {
    pub key: String,
    pub value: Value,
    pub propagate_at_launch: bool,
}

impl AutoScalingTag {
    pub fn propagated(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            propagate_at_launch: true,
        }
    }
}

/// Serialize a list of tags into a property value.
pub fn tags<T: Serialize>(tags: &[T]) -> CfnResult<Value> {
    Ok(serde_json::to_value(tags)?)
}
