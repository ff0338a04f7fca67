use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Field name used when an observed instance has no Terraform counterpart.
pub const MISSING_DECLARED_FIELD: &str = "terraform_state";

pub type Differences = BTreeMap<String, FieldDiff>;

/// A compared value in its natural representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    /// Sorted, so two sets with the same members always render the same.
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FieldValue::Map(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) if text.is_empty() => f.write_str("(empty)"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(flag) => write!(f, "{flag}"),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
            FieldValue::Map(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

/// Observed and declared values of one field that did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    #[serde(rename = "aws")]
    pub observed: FieldValue,
    #[serde(rename = "terraform")]
    pub declared: FieldValue,
}

impl FieldDiff {
    pub fn new(observed: impl Into<FieldValue>, declared: impl Into<FieldValue>) -> Self {
        Self {
            observed: observed.into(),
            declared: declared.into(),
        }
    }
}

/// Outcome of comparing one instance.
///
/// Drift is derived from the differences map and cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftResult {
    instance_id: String,
    differences: Differences,
}

impl DriftResult {
    pub fn from_differences(instance_id: impl Into<String>, differences: Differences) -> Self {
        Self {
            instance_id: instance_id.into(),
            differences,
        }
    }

    /// Forced drift for an instance that Terraform does not know about.
    pub fn missing_declared(instance_id: impl Into<String>) -> Self {
        let mut differences = Differences::new();
        differences.insert(
            MISSING_DECLARED_FIELD.to_string(),
            FieldDiff::new("exists", "missing"),
        );
        Self::from_differences(instance_id, differences)
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn drift_detected(&self) -> bool {
        !self.differences.is_empty()
    }

    pub fn differences(&self) -> &Differences {
        &self.differences
    }

    pub fn drifted_fields(&self) -> impl Iterator<Item = &str> {
        self.differences.keys().map(String::as_str)
    }
}

impl Serialize for DriftResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DriftResult", 3)?;
        state.serialize_field("instance_id", &self.instance_id)?;
        state.serialize_field("drift_detected", &self.drift_detected())?;
        state.serialize_field("differences", &self.differences)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_flag_follows_differences() {
        let clean = DriftResult::from_differences("i-1", Differences::new());
        assert!(!clean.drift_detected());

        let mut differences = Differences::new();
        differences.insert("instance_type".to_string(), FieldDiff::new("a", "b"));
        let drifted = DriftResult::from_differences("i-1", differences);
        assert!(drifted.drift_detected());
    }

    #[test]
    fn test_missing_declared_has_single_synthetic_diff() {
        let result = DriftResult::missing_declared("i-2");
        assert_eq!(result.instance_id(), "i-2");
        assert!(result.drift_detected());
        assert_eq!(result.differences().len(), 1);

        let diff = &result.differences()[MISSING_DECLARED_FIELD];
        assert_eq!(diff.observed, FieldValue::from("exists"));
        assert_eq!(diff.declared, FieldValue::from("missing"));
    }

    #[test]
    fn test_serialization_uses_report_keys() {
        let result = DriftResult::missing_declared("i-9");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["instance_id"], "i-9");
        assert_eq!(value["drift_detected"], true);
        assert_eq!(value["differences"]["terraform_state"]["aws"], "exists");
        assert_eq!(value["differences"]["terraform_state"]["terraform"], "missing");
    }

    #[test]
    fn test_field_value_natural_json() {
        let list = FieldValue::from(vec!["sg-1".to_string(), "sg-2".to_string()]);
        assert_eq!(serde_json::to_value(&list).unwrap(), serde_json::json!(["sg-1", "sg-2"]));
        assert_eq!(
            serde_json::to_value(FieldValue::from(true)).unwrap(),
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_field_value_display() {
        let mut tags = BTreeMap::new();
        tags.insert("Env".to_string(), "prod".to_string());
        tags.insert("Name".to_string(), "web".to_string());

        assert_eq!(FieldValue::from(tags).to_string(), "{Env=prod, Name=web}");
        assert_eq!(
            FieldValue::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a, b]"
        );
        assert_eq!(FieldValue::from("").to_string(), "(empty)");
        assert_eq!(FieldValue::from(false).to_string(), "false");
    }
}
