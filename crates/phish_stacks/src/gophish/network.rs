//! Security groups, load balancer, listeners and target group.

use serde::Serialize;
use serde_json::{json, Value};

use phish_cfn::intrinsic::{reference, sub};
use phish_cfn::resource::tags;
use phish_cfn::{Resource, ResourceType, Tag, Template};

use super::parameters::{VPC_ID, VPC_SUBNETS};
use super::{ALB, HTTPS_LISTENER, HTTP_LISTENER, SG_ALB, SG_INSTANCE, TARGET_GROUP};
use crate::config::IngressRules;
use crate::domains::certificate_logical_id;
use crate::error::StackResult;

/// Web traffic from the load balancer to the instances.
pub const LANDING_PORT: u16 = 80;
pub const SSH_PORT: u16 = 22;
pub const ADMIN_CONSOLE_PORT: u16 = 8080;
pub const HTTP_PORT: u16 = 80;
pub const HTTPS_PORT: u16 = 443;

/// One inbound TCP rule of a security group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IngressRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_security_group_id: Option<Value>,
    pub from_port: u16,
    pub to_port: u16,
    pub ip_protocol: &'static str,
    pub description: String,
}

impl IngressRule {
    pub fn from_cidr(cidr: &str, port: u16, description: String) -> Self {
        Self {
            cidr_ip: Some(cidr.to_string()),
            source_security_group_id: None,
            from_port: port,
            to_port: port,
            ip_protocol: "tcp",
            description,
        }
    }

    pub fn from_security_group(group: Value, port: u16, description: impl Into<String>) -> Self {
        Self {
            cidr_ip: None,
            source_security_group_id: Some(group),
            from_port: port,
            to_port: port,
            ip_protocol: "tcp",
            description: description.into(),
        }
    }
}

/// Instance rules: landing traffic from the load balancer, then SSH and the
/// admin console for every admin CIDR.
pub fn instance_ingress(rules: &IngressRules) -> Vec<IngressRule> {
    let mut ingress = vec![IngressRule::from_security_group(
        reference(SG_ALB),
        LANDING_PORT,
        "Landing page web traffic",
    )];
    for cidr in &rules.admin_console {
        ingress.push(IngressRule::from_cidr(cidr, SSH_PORT, format!("SSH from {}", cidr)));
        ingress.push(IngressRule::from_cidr(
            cidr,
            ADMIN_CONSOLE_PORT,
            format!("Admin Console from {}", cidr),
        ));
    }
    ingress
}

/// Load balancer rules: HTTP and HTTPS for every landing-page CIDR.
pub fn load_balancer_ingress(rules: &IngressRules) -> Vec<IngressRule> {
    rules
        .landing_pages
        .iter()
        .flat_map(|cidr| {
            [
                IngressRule::from_cidr(cidr, HTTP_PORT, format!("HTTP Port from {}", cidr)),
                IngressRule::from_cidr(cidr, HTTPS_PORT, format!("HTTPS Port from {}", cidr)),
            ]
        })
        .collect()
}

fn security_group(description: &str, ingress: &[IngressRule]) -> StackResult<Resource> {
    Ok(Resource::new(ResourceType::SecurityGroup)
        .with("GroupDescription", description)
        .with("VpcId", reference(VPC_ID))
        .with("SecurityGroupIngress", serde_json::to_value(ingress)?))
}

pub(super) fn declare(template: &mut Template, rules: &IngressRules) -> StackResult<()> {
    template.add_resource(
        SG_INSTANCE,
        security_group("Security Group for EC2 Instance", &instance_ingress(rules))?,
    )?;
    template.add_resource(
        SG_ALB,
        security_group(
            "Security Group for Application LoadBalancer",
            &load_balancer_ingress(rules),
        )?,
    )?;

    template.add_resource(
        ALB,
        Resource::new(ResourceType::LoadBalancer)
            .with("Name", sub("${AWS::StackName}-ALB"))
            .with("Scheme", "internet-facing")
            .with("Subnets", reference(VPC_SUBNETS))
            .with("SecurityGroups", json!([reference(SG_ALB)]))
            .with("Tags", tags(&[Tag::new("PublicResource", "Yes")])?),
    )?;

    // #{...} placeholders are expanded by the load balancer, not CloudFormation
    template.add_resource(
        HTTP_LISTENER,
        Resource::new(ResourceType::Listener)
            .with("LoadBalancerArn", reference(ALB))
            .with("Port", HTTP_PORT)
            .with("Protocol", "HTTP")
            .with(
                "DefaultActions",
                json!([{
                    "Type": "redirect",
                    "Order": 1,
                    "RedirectConfig": {
                        "Protocol": "HTTPS",
                        "Host": "#{host}",
                        "Query": "#{query}",
                        "Path": "/#{path}",
                        "Port": HTTPS_PORT.to_string(),
                        "StatusCode": "HTTP_301"
                    }
                }]),
            ),
    )?;

    template.add_resource(
        HTTPS_LISTENER,
        Resource::new(ResourceType::Listener)
            .with(
                "Certificates",
                json!([{ "CertificateArn": reference(certificate_logical_id(0)) }]),
            )
            .with("LoadBalancerArn", reference(ALB))
            .with("Port", HTTPS_PORT)
            .with("Protocol", "HTTPS")
            .with(
                "DefaultActions",
                json!([{ "Type": "forward", "TargetGroupArn": reference(TARGET_GROUP) }]),
            ),
    )?;

    template.add_resource(
        TARGET_GROUP,
        Resource::new(ResourceType::TargetGroup)
            .with("VpcId", reference(VPC_ID))
            .with("Protocol", "HTTP")
            .with("Port", LANDING_PORT)
            .with("TargetType", "instance")
            .with("HealthCheckProtocol", "HTTP")
            .with("HealthCheckPath", "/")
            .with("HealthCheckTimeoutSeconds", 5)
            .with("HealthCheckIntervalSeconds", 30)
            .with("HealthyThresholdCount", 2)
            .with("UnhealthyThresholdCount", 3)
            .with("Matcher", json!({ "HttpCode": "200,404" })),
    )?;

    Ok(())
}
