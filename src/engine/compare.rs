use crate::resource::{BlockDeviceMapping, Resource};

use super::attribute::{compare_map, compare_scalar, compare_set};
use super::diff::{Differences, DriftResult};
use super::filter::{
    ARCHITECTURE, BLOCK_DEVICE_MAPPINGS, FieldFilter, IAM_INSTANCE_PROFILE, IMAGE_ID,
    INSTANCE_TYPE, KEY_NAME, MONITORING, SECURITY_GROUPS, SUBNET_ID, TAGS, VIRTUALIZATION_TYPE,
    VPC_ID,
};

/// Compares one observed instance against its declaration.
///
/// The result carries the observed instance id. Fields are independent, so
/// evaluation order does not affect the outcome.
pub fn compare(observed: &Resource, declared: &Resource, filter: &FieldFilter) -> DriftResult {
    let mut out = Differences::new();

    let scalars = [
        (INSTANCE_TYPE, &observed.instance_type, &declared.instance_type),
        (IMAGE_ID, &observed.image_id, &declared.image_id),
        (KEY_NAME, &observed.key_name, &declared.key_name),
        (SUBNET_ID, &observed.subnet_id, &declared.subnet_id),
        (VPC_ID, &observed.vpc_id, &declared.vpc_id),
        (
            IAM_INSTANCE_PROFILE,
            &observed.iam_instance_profile,
            &declared.iam_instance_profile,
        ),
        (ARCHITECTURE, &observed.architecture, &declared.architecture),
        (
            VIRTUALIZATION_TYPE,
            &observed.virtualization_type,
            &declared.virtualization_type,
        ),
    ];
    for (field, a, b) in scalars {
        compare_scalar(field, a.as_str(), b.as_str(), filter, &mut out);
    }
    compare_scalar(
        MONITORING,
        observed.monitoring,
        declared.monitoring,
        filter,
        &mut out,
    );

    compare_map(TAGS, &observed.tags, &declared.tags, filter, &mut out);
    compare_set(
        SECURITY_GROUPS,
        &observed.security_groups,
        &declared.security_groups,
        filter,
        &mut out,
    );
    compare_set(
        BLOCK_DEVICE_MAPPINGS,
        &flatten_block_devices(&observed.block_device_mappings),
        &flatten_block_devices(&declared.block_device_mappings),
        filter,
        &mut out,
    );

    DriftResult::from_differences(observed.instance_id.clone(), out)
}

/// Flattens each mapping to `"<device_name>|<volume_id>"`.
pub fn flatten_block_devices(devices: &[BlockDeviceMapping]) -> Vec<String> {
    devices
        .iter()
        .map(|d| format!("{}|{}", d.device_name, d.volume_id))
        .collect()
}
