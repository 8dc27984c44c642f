//! Input parameters of the Gophish stack.

use phish_cfn::{Parameter, ParameterType, Template};

use crate::error::StackResult;

pub const VPC_ID: &str = "VpcId";
pub const VPC_SUBNETS: &str = "VpcSubnets";
pub const INITIAL_ADMIN_PASSWORD: &str = "InitialAdminPassword";
pub const ADMIN_PORT: &str = "AdminPort";
pub const INSTANCE_TYPE: &str = "InstanceType";
pub const IMAGE_ID: &str = "ImageId";
pub const EC2_KEYNAME: &str = "Ec2Keyname";
pub const CLUSTER_MAX_SIZE: &str = "ClusterMaxSize";
pub const CLUSTER_MIN_SIZE: &str = "ClusterMinSize";
pub const CLUSTER_DESIRED_SIZE: &str = "ClusterDesiredSize";
pub const GRACE_PERIOD: &str = "GracePeriod";

/// Latest Amazon Linux 2 image, resolved through SSM at deploy time.
pub const DEFAULT_IMAGE: &str = "/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2";

pub(super) fn declare(template: &mut Template) -> StackResult<()> {
    template.add_parameter(
        VPC_ID,
        Parameter::new(ParameterType::VpcId, "VPC to deploy template in")
            .with_constraint_description("Must be the ID of an existing VPC."),
    )?;
    template.add_parameter(
        VPC_SUBNETS,
        Parameter::new(ParameterType::SubnetIdList, "VPC Workload Subnets to deploy instance in"),
    )?;
    template.add_parameter(
        INITIAL_ADMIN_PASSWORD,
        Parameter::new(ParameterType::String, "Initial admin console password").no_echo(),
    )?;
    template.add_parameter(
        ADMIN_PORT,
        Parameter::new(ParameterType::Number, "Admin Console Port"),
    )?;
    template.add_parameter(
        INSTANCE_TYPE,
        Parameter::new(ParameterType::String, "EC2 instance Type"),
    )?;
    template.add_parameter(
        IMAGE_ID,
        Parameter::new(ParameterType::SsmImageId, "AMI image to create FromPort")
            .with_default(DEFAULT_IMAGE),
    )?;
    template.add_parameter(
        EC2_KEYNAME,
        Parameter::new(ParameterType::KeyPairName, "EC2 SSH Key Pair"),
    )?;
    template.add_parameter(
        CLUSTER_MAX_SIZE,
        Parameter::new(ParameterType::String, "Maximum Cluster size of Web Server instances")
            .with_default("2"),
    )?;
    template.add_parameter(
        CLUSTER_MIN_SIZE,
        Parameter::new(ParameterType::String, "Minimum Cluster size of Web Server instances")
            .with_default("1"),
    )?;
    template.add_parameter(
        CLUSTER_DESIRED_SIZE,
        Parameter::new(ParameterType::String, "Desired Cluster size of Web Server instances")
            .with_default("1"),
    )?;
    template.add_parameter(
        GRACE_PERIOD,
        Parameter::new(ParameterType::String, "Autoscaling Grace period").with_default("300"),
    )?;
    Ok(())
}
