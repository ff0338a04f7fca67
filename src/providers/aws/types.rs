use aws_sdk_ec2::types::{Instance, MonitoringState};

use crate::resource::{BlockDeviceMapping, Resource};

/// Converts a described EC2 instance into the shape the comparator expects.
///
/// Security groups are identified by group id, the IAM profile by ARN.
/// Block devices without a device name are skipped; devices without an EBS
/// volume keep an empty volume id.
pub fn instance_to_resource(instance: &Instance) -> Resource {
    let security_groups = instance
        .security_groups()
        .iter()
        .filter_map(|group| group.group_id())
        .map(str::to_string)
        .collect();

    let tags = instance
        .tags()
        .iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
        .collect();

    let block_device_mappings = instance
        .block_device_mappings()
        .iter()
        .filter_map(|mapping| {
            let device_name = mapping.device_name()?;
            let volume_id = mapping
                .ebs()
                .and_then(|ebs| ebs.volume_id())
                .unwrap_or_default();
            Some(BlockDeviceMapping::new(device_name, volume_id))
        })
        .collect();

    let monitoring = matches!(
        instance.monitoring().and_then(|m| m.state()),
        Some(MonitoringState::Enabled)
    );

    Resource {
        instance_id: text(instance.instance_id()),
        instance_type: text(instance.instance_type().map(|t| t.as_str())),
        image_id: text(instance.image_id()),
        key_name: text(instance.key_name()),
        state: text(
            instance
                .state()
                .and_then(|state| state.name())
                .map(|name| name.as_str()),
        ),
        availability_zone: text(
            instance
                .placement()
                .and_then(|placement| placement.availability_zone()),
        ),
        private_ip_address: text(instance.private_ip_address()),
        public_ip_address: text(instance.public_ip_address()),
        subnet_id: text(instance.subnet_id()),
        vpc_id: text(instance.vpc_id()),
        security_groups,
        tags,
        block_device_mappings,
        iam_instance_profile: text(
            instance
                .iam_instance_profile()
                .and_then(|profile| profile.arn()),
        ),
        monitoring,
        architecture: text(instance.architecture().map(|a| a.as_str())),
        virtualization_type: text(instance.virtualization_type().map(|v| v.as_str())),
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use aws_sdk_ec2::types::{
        ArchitectureValues, EbsInstanceBlockDevice, GroupIdentifier, IamInstanceProfile,
        InstanceBlockDeviceMapping, InstanceState, InstanceStateName, InstanceType, Monitoring,
        Placement, Tag, VirtualizationType,
    };

    use super::*;

    fn described_instance() -> Instance {
        Instance::builder()
            .instance_id("i-0846f159803a92a1a")
            .instance_type(InstanceType::from("t3.micro"))
            .image_id("ami-123")
            .key_name("deployer")
            .subnet_id("subnet-1")
            .vpc_id("vpc-1")
            .private_ip_address("10.0.0.4")
            .security_groups(GroupIdentifier::builder().group_id("sg-2").group_name("web").build())
            .security_groups(GroupIdentifier::builder().group_id("sg-1").build())
            .tags(Tag::builder().key("Name").value("web").build())
            .tags(Tag::builder().key("Env").value("prod").build())
            .block_device_mappings(
                InstanceBlockDeviceMapping::builder()
                    .device_name("/dev/xvda")
                    .ebs(EbsInstanceBlockDevice::builder().volume_id("vol-1").build())
                    .build(),
            )
            .iam_instance_profile(
                IamInstanceProfile::builder()
                    .arn("arn:aws:iam::123456789012:instance-profile/web")
                    .build(),
            )
            .monitoring(
                Monitoring::builder()
                    .state(MonitoringState::from("enabled"))
                    .build(),
            )
            .architecture(ArchitectureValues::from("x86_64"))
            .virtualization_type(VirtualizationType::from("hvm"))
            .placement(Placement::builder().availability_zone("us-east-1a").build())
            .state(
                InstanceState::builder()
                    .name(InstanceStateName::from("running"))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_instance_to_resource_maps_fields() {
        let resource = instance_to_resource(&described_instance());

        assert_eq!(resource.instance_id, "i-0846f159803a92a1a");
        assert_eq!(resource.instance_type, "t3.micro");
        assert_eq!(resource.image_id, "ami-123");
        assert_eq!(resource.key_name, "deployer");
        assert_eq!(resource.subnet_id, "subnet-1");
        assert_eq!(resource.vpc_id, "vpc-1");
        assert_eq!(resource.private_ip_address, "10.0.0.4");
        assert_eq!(resource.security_groups, vec!["sg-2", "sg-1"]);
        assert_eq!(resource.tags["Name"], "web");
        assert_eq!(resource.tags["Env"], "prod");
        assert_eq!(
            resource.block_device_mappings,
            vec![BlockDeviceMapping::new("/dev/xvda", "vol-1")]
        );
        assert_eq!(
            resource.iam_instance_profile,
            "arn:aws:iam::123456789012:instance-profile/web"
        );
        assert!(resource.monitoring);
        assert_eq!(resource.architecture, "x86_64");
        assert_eq!(resource.virtualization_type, "hvm");
        assert_eq!(resource.availability_zone, "us-east-1a");
        assert_eq!(resource.state, "running");
    }

    #[test]
    fn test_instance_to_resource_empty_instance() {
        let resource = instance_to_resource(&Instance::builder().instance_id("i-1").build());

        assert_eq!(resource, Resource::new("i-1"));
    }

    #[test]
    fn test_monitoring_disabled() {
        let instance = Instance::builder()
            .monitoring(
                Monitoring::builder()
                    .state(MonitoringState::from("disabled"))
                    .build(),
            )
            .build();
        assert!(!instance_to_resource(&instance).monitoring);
    }

    #[test]
    fn test_block_device_without_name_skipped() {
        let instance = Instance::builder()
            .block_device_mappings(
                InstanceBlockDeviceMapping::builder()
                    .ebs(EbsInstanceBlockDevice::builder().volume_id("vol-orphan").build())
                    .build(),
            )
            .block_device_mappings(
                InstanceBlockDeviceMapping::builder()
                    .device_name("/dev/sdb")
                    .build(),
            )
            .build();

        assert_eq!(
            instance_to_resource(&instance).block_device_mappings,
            vec![BlockDeviceMapping::new("/dev/sdb", "")]
        );
    }

    #[test]
    fn test_incomplete_tags_skipped() {
        let instance = Instance::builder()
            .tags(Tag::builder().key("OnlyKey").build())
            .tags(Tag::builder().key("Team").value("infra").build())
            .build();

        let tags = instance_to_resource(&instance).tags;
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["Team"], "infra");
    }
}
