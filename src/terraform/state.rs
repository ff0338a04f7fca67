use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::resource::{BlockDeviceMapping, Resource};

const AWS_INSTANCE: &str = "aws_instance";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid Terraform state: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no resources found in Terraform state")]
    NoResources,
}

/// Terraform state parser for drift detection.
///
/// Reads tfstate (v4 layout) and keeps the `aws_instance` resources as
/// declared instances.
#[derive(Debug, Clone, PartialEq)]
pub struct TerraformState {
    version: Option<u64>,
    instances: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct StateDocument {
    #[serde(default)]
    version: Option<u64>,
    #[serde(default)]
    resources: Vec<StateResource>,
}

#[derive(Debug, Deserialize)]
struct StateResource {
    #[serde(default)]
    mode: Option<String>,
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    instances: Vec<StateInstance>,
}

#[derive(Debug, Deserialize)]
struct StateInstance {
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl StateResource {
    fn is_managed_instance(&self) -> bool {
        self.type_ == AWS_INSTANCE && self.mode.as_deref().is_none_or(|mode| mode == "managed")
    }
}

impl TerraformState {
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let content = std::fs::read_to_string(path).map_err(|source| StateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let state = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            count = state.instances.len(),
            "Terraform state loaded"
        );
        Ok(state)
    }

    pub fn parse(content: &str) -> Result<Self, StateError> {
        let document: StateDocument = serde_json::from_str(content)?;

        if document.resources.is_empty() {
            return Err(StateError::NoResources);
        }

        let instances = document
            .resources
            .iter()
            .filter(|resource| resource.is_managed_instance())
            .flat_map(|resource| {
                tracing::debug!(name = %resource.name, "reading aws_instance");
                resource.instances.iter()
            })
            .map(|instance| instance_from_attributes(&instance.attributes))
            .collect();

        Ok(Self {
            version: document.version,
            instances,
        })
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn instances(&self) -> &[Resource] {
        &self.instances
    }

    pub fn into_instances(self) -> Vec<Resource> {
        self.instances
    }
}

fn instance_from_attributes(attrs: &Map<String, Value>) -> Resource {
    let mut block_device_mappings = block_devices(attrs.get("root_block_device"));
    block_device_mappings.extend(block_devices(attrs.get("ebs_block_device")));

    Resource {
        instance_id: string_attr(attrs, "id"),
        instance_type: string_attr(attrs, "instance_type"),
        image_id: string_attr(attrs, "ami"),
        key_name: string_attr(attrs, "key_name"),
        state: string_attr(attrs, "instance_state"),
        availability_zone: string_attr(attrs, "availability_zone"),
        private_ip_address: string_attr(attrs, "private_ip"),
        public_ip_address: string_attr(attrs, "public_ip"),
        subnet_id: string_attr(attrs, "subnet_id"),
        vpc_id: String::new(),
        security_groups: string_list(attrs.get("vpc_security_group_ids")),
        tags: string_map(attrs.get("tags")),
        block_device_mappings,
        iam_instance_profile: string_attr(attrs, "iam_instance_profile"),
        monitoring: attrs.get("monitoring").and_then(Value::as_bool).unwrap_or(false),
        architecture: string_attr(attrs, "architecture"),
        virtualization_type: string_attr(attrs, "virtualization_type"),
    }
}

// NOTE: Wrongly-typed or missing attributes fall back to zero values.
fn string_attr(attrs: &Map<String, Value>, key: &str) -> String {
    attrs
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(display_value).collect())
        .unwrap_or_default()
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), display_value(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn block_devices(value: Option<&Value>) -> Vec<BlockDeviceMapping> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|device| {
                    BlockDeviceMapping::new(
                        string_attr(device, "device_name"),
                        string_attr(device, "volume_id"),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
