use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One EC2 instance as seen by either side of a drift check.
///
/// Absent values are represented by their zero value (empty string, empty
/// collection, `false`), so a live instance and its Terraform declaration
/// always have the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Resource {
    pub instance_id: String,
    pub instance_type: String,
    pub image_id: String,
    pub key_name: String,
    pub state: String,
    pub availability_zone: String,
    pub private_ip_address: String,
    pub public_ip_address: String,
    pub subnet_id: String,
    pub vpc_id: String,
    pub security_groups: Vec<String>,
    pub tags: BTreeMap<String, String>,
    pub block_device_mappings: Vec<BlockDeviceMapping>,
    pub iam_instance_profile: String,
    pub monitoring: bool,
    pub architecture: String,
    pub virtualization_type: String,
}

impl Resource {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDeviceMapping {
    pub device_name: String,
    pub volume_id: String,
}

impl BlockDeviceMapping {
    pub fn new(device_name: impl Into<String>, volume_id: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            volume_id: volume_id.into(),
        }
    }
}

/// What to fetch from the live provider.
#[derive(Debug, Clone, Default)]
pub struct FetchConfig {
    pub instance_ids: Vec<String>,
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_new_uses_zero_values() {
        let resource = Resource::new("i-123");
        assert_eq!(resource.instance_id, "i-123");
        assert!(resource.instance_type.is_empty());
        assert!(resource.tags.is_empty());
        assert!(resource.security_groups.is_empty());
        assert!(!resource.monitoring);
    }

    #[test]
    fn test_resource_serialization_snake_case() {
        let mut resource = Resource::new("i-abc");
        resource.instance_type = "t3.micro".to_string();
        resource.block_device_mappings = vec![BlockDeviceMapping::new("/dev/xvda", "vol-1")];

        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("instance_id"));
        assert!(json.contains("block_device_mappings"));
        assert!(json.contains("device_name"));
        assert!(!json.contains("instanceId"));
    }

    #[test]
    fn test_resource_deep_clone_is_independent() {
        let mut original = Resource::new("i-123");
        original.tags.insert("Name".to_string(), "test".to_string());
        original.security_groups = vec!["sg-1".to_string()];

        let mut clone = original.clone();
        clone.tags.insert("Name".to_string(), "changed".to_string());
        clone.security_groups[0] = "sg-x".to_string();

        assert_eq!(original.tags["Name"], "test");
        assert_eq!(original.security_groups[0], "sg-1");
    }
}
