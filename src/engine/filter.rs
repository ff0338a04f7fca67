use std::collections::BTreeSet;

pub const INSTANCE_TYPE: &str = "instance_type";
pub const IMAGE_ID: &str = "image_id";
pub const KEY_NAME: &str = "key_name";
pub const SUBNET_ID: &str = "subnet_id";
pub const VPC_ID: &str = "vpc_id";
pub const IAM_INSTANCE_PROFILE: &str = "iam_instance_profile";
pub const MONITORING: &str = "monitoring";
pub const ARCHITECTURE: &str = "architecture";
pub const VIRTUALIZATION_TYPE: &str = "virtualization_type";
pub const TAGS: &str = "tags";
pub const SECURITY_GROUPS: &str = "security_groups";
pub const BLOCK_DEVICE_MAPPINGS: &str = "block_device_mappings";

/// Every field the comparator knows about.
pub const SCHEMA_FIELDS: &[&str] = &[
    INSTANCE_TYPE,
    IMAGE_ID,
    KEY_NAME,
    SUBNET_ID,
    VPC_ID,
    IAM_INSTANCE_PROFILE,
    MONITORING,
    ARCHITECTURE,
    VIRTUALIZATION_TYPE,
    TAGS,
    SECURITY_GROUPS,
    BLOCK_DEVICE_MAPPINGS,
];

// NOTE: vpc_id is left out because aws_instance state never records it.
pub const DEFAULT_DRIFT_ATTRIBUTES: &[&str] = &[
    INSTANCE_TYPE,
    TAGS,
    SECURITY_GROUPS,
    SUBNET_ID,
    IMAGE_ID,
    KEY_NAME,
    MONITORING,
    IAM_INSTANCE_PROFILE,
    ARCHITECTURE,
    VIRTUALIZATION_TYPE,
    BLOCK_DEVICE_MAPPINGS,
];

/// Set of field names a comparison is restricted to.
///
/// An empty filter is unrestricted: every schema field is compared. Names are
/// matched exactly; names outside the schema are kept but never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    fields: BTreeSet<String>,
}

impl FieldFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn defaults() -> Self {
        Self::from_names(DEFAULT_DRIFT_ATTRIBUTES.iter().copied())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, field: &str) -> bool {
        self.fields.is_empty() || self.fields.contains(field)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names in the filter that no comparison will ever match.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(String::as_str)
            .filter(|name| !SCHEMA_FIELDS.contains(name))
            .collect()
    }
}
