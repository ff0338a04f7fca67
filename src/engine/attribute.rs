//! Field-level equality checks.
//!
//! Each function writes an entry into `out` only when the field passes the
//! filter and the two values differ.

use std::collections::BTreeMap;

use super::diff::{Differences, FieldDiff, FieldValue};
use super::filter::FieldFilter;

pub fn compare_scalar<T>(
    field: &str,
    observed: T,
    declared: T,
    filter: &FieldFilter,
    out: &mut Differences,
) where
    T: PartialEq + Into<FieldValue>,
{
    if !filter.allows(field) {
        return;
    }

    if observed != declared {
        out.insert(field.to_string(), FieldDiff::new(observed, declared));
    }
}

pub fn compare_map(
    field: &str,
    observed: &BTreeMap<String, String>,
    declared: &BTreeMap<String, String>,
    filter: &FieldFilter,
    out: &mut Differences,
) {
    if !filter.allows(field) {
        return;
    }

    if observed != declared {
        out.insert(
            field.to_string(),
            FieldDiff::new(observed.clone(), declared.clone()),
        );
    }
}

/// Order-independent comparison. The recorded diff holds the sorted forms.
pub fn compare_set(
    field: &str,
    observed: &[String],
    declared: &[String],
    filter: &FieldFilter,
    out: &mut Differences,
) {
    if !filter.allows(field) {
        return;
    }

    let observed = sorted(observed);
    let declared = sorted(declared);

    if observed != declared {
        out.insert(field.to_string(), FieldDiff::new(observed, declared));
    }
}

fn sorted(items: &[String]) -> Vec<String> {
    let mut items = items.to_vec();
    items.sort();
    items
}
