//! Instance role, launch configuration and auto-scaling group.

use serde_json::{json, Value};

use phish_cfn::intrinsic::{base64, reference, sub};
use phish_cfn::resource::tags;
use phish_cfn::{AutoScalingTag, Resource, ResourceType, Template};

use super::parameters::{
    CLUSTER_DESIRED_SIZE, CLUSTER_MAX_SIZE, CLUSTER_MIN_SIZE, EC2_KEYNAME, GRACE_PERIOD, IMAGE_ID,
    INSTANCE_TYPE, VPC_SUBNETS,
};
use super::{ASG, INSTANCE_PROFILE, INSTANCE_ROLE, LAUNCH_CONFIGURATION, SG_INSTANCE, TARGET_GROUP};
use crate::error::StackResult;

const POLICY_VERSION: &str = "2012-10-17";

fn assume_role_policy() -> Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [{
            "Effect": "Allow",
            "Principal": { "Service": "ec2.amazonaws.com" },
            "Action": "sts:AssumeRole"
        }]
    })
}

/// Read-only discovery the instances need to find their own security group.
fn discovery_policy() -> Value {
    json!({
        "PolicyName": sub("${AWS::StackName}-Gophish-Policy"),
        "PolicyDocument": {
            "Version": POLICY_VERSION,
            "Statement": [{
                "Sid": "SecurityGroupDiscovery",
                "Action": ["ec2:DescribeInstances", "ec2:DescribeSecurityGroups"],
                "Effect": "Allow",
                "Resource": "*"
            }]
        }
    })
}

pub(super) fn declare(template: &mut Template, user_data: &str) -> StackResult<()> {
    template.add_resource(
        INSTANCE_ROLE,
        Resource::new(ResourceType::Role)
            .with("AssumeRolePolicyDocument", assume_role_policy())
            .with("Policies", json!([discovery_policy()])),
    )?;

    template.add_resource(
        INSTANCE_PROFILE,
        Resource::new(ResourceType::InstanceProfile)
            .with("Path", "/basic/")
            .with("Roles", json!([reference(INSTANCE_ROLE)])),
    )?;

    template.add_resource(
        ASG,
        Resource::new(ResourceType::AutoScalingGroup)
            .with("Cooldown", reference(GRACE_PERIOD))
            .with("LaunchConfigurationName", reference(LAUNCH_CONFIGURATION))
            .with("MinSize", reference(CLUSTER_MIN_SIZE))
            .with("MaxSize", reference(CLUSTER_MAX_SIZE))
            .with("DesiredCapacity", reference(CLUSTER_DESIRED_SIZE))
            .with("HealthCheckGracePeriod", reference(GRACE_PERIOD))
            .with("HealthCheckType", "EC2")
            .with(
                "Tags",
                tags(&[AutoScalingTag::propagated("Name", sub("Gophish (${AWS::StackName})"))])?,
            )
            .with("TargetGroupARNs", json!([reference(TARGET_GROUP)]))
            .with("TerminationPolicies", json!(["OldestInstance", "Default"]))
            .with("VPCZoneIdentifier", reference(VPC_SUBNETS)),
    )?;

    template.add_resource(
        LAUNCH_CONFIGURATION,
        Resource::new(ResourceType::LaunchConfiguration)
            .with("IamInstanceProfile", reference(INSTANCE_PROFILE))
            .with("InstanceType", reference(INSTANCE_TYPE))
            .with("ImageId", reference(IMAGE_ID))
            .with("KeyName", reference(EC2_KEYNAME))
            .with("SecurityGroups", json!([reference(SG_INSTANCE)]))
            .with("UserData", base64(sub(user_data))),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_substituted_then_encoded() {
        let mut template = Template::new("t");
        declare(&mut template, "#!/bin/bash\necho ${AdminPort}").unwrap();

        let lc = template.resource(LAUNCH_CONFIGURATION).unwrap();
        assert_eq!(
            lc.property("UserData"),
            Some(&json!({ "Fn::Base64": { "Fn::Sub": "#!/bin/bash\necho ${AdminPort}" } }))
        );
    }

    #[test]
    fn test_asg_prefers_oldest_instance() {
        let mut template = Template::new("t");
        declare(&mut template, "").unwrap();

        let asg = template.resource(ASG).unwrap();
        assert_eq!(asg.property("TerminationPolicies"), Some(&json!(["OldestInstance", "Default"])));
        assert_eq!(asg.property("HealthCheckType"), Some(&json!("EC2")));
        assert_eq!(asg.property("TargetGroupARNs"), Some(&json!([{ "Ref": TARGET_GROUP }])));
        assert_eq!(asg.property("Tags").unwrap()[0]["PropagateAtLaunch"], json!(true));
    }

    #[test]
    fn test_role_grants_read_only_discovery() {
        let mut template = Template::new("t");
        declare(&mut template, "").unwrap();

        let role = template.resource(INSTANCE_ROLE).unwrap();
        let statement = &role.property("Policies").unwrap()[0]["PolicyDocument"]["Statement"][0];
        assert_eq!(
            statement["Action"],
            json!(["ec2:DescribeInstances", "ec2:DescribeSecurityGroups"])
        );
        assert_eq!(
            role.property("AssumeRolePolicyDocument").unwrap()["Statement"][0]["Principal"]["Service"],
            json!("ec2.amazonaws.com")
        );
    }
}
