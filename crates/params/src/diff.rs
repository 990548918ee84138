//! Key-by-key comparison of two parameter mappings.

use std::collections::BTreeSet;

use crate::value::{ParamMap, Value};

/// How a key differs between two mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Present only in the second mapping.
    Added,
    /// Present only in the first mapping.
    Removed,
    /// Present in both with different values.
    Changed,
}

/// One difference between two parameter mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub key: String,
    pub kind: DiffKind,
    /// Value in the first mapping, if present.
    pub value_a: Option<Value>,
    /// Value in the second mapping, if present.
    pub value_b: Option<Value>,
}

/// Compare two mappings and return their differences sorted by key.
///
/// Numbers compare by value, so `300` and `300.0` are not a change.
pub fn diff_parameters(a: &ParamMap, b: &ParamMap) -> Vec<DiffEntry> {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let (kind, value_a, value_b) = match (a.get(key), b.get(key)) {
                (Some(va), None) => (DiffKind::Removed, Some(va.clone()), None),
                (None, Some(vb)) => (DiffKind::Added, None, Some(vb.clone())),
                (Some(va), Some(vb)) if !va.loosely_eq(vb) => {
                    (DiffKind::Changed, Some(va.clone()), Some(vb.clone()))
                }
                _ => return None,
            };
            Some(DiffEntry {
                key: key.clone(),
                kind,
                value_a,
                value_b,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, Value)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn identical_mappings_have_no_diff() {
        let a = map(&[("x", Value::Int(1)), ("y", Value::from("a"))]);
        assert!(diff_parameters(&a, &a.clone()).is_empty());
    }

    #[test]
    fn added_removed_changed() {
        let a = map(&[("keep", Value::Int(1)), ("gone", Value::Int(2)), ("mod", Value::Int(3))]);
        let b = map(&[("keep", Value::Int(1)), ("mod", Value::Int(4)), ("new", Value::Int(5))]);

        let diffs = diff_parameters(&a, &b);
        assert_eq!(diffs.len(), 3);

        assert_eq!(diffs[0].key, "gone");
        assert_eq!(diffs[0].kind, DiffKind::Removed);
        assert_eq!(diffs[0].value_a, Some(Value::Int(2)));
        assert_eq!(diffs[0].value_b, None);

        assert_eq!(diffs[1].key, "mod");
        assert_eq!(diffs[1].kind, DiffKind::Changed);
        assert_eq!(diffs[1].value_a, Some(Value::Int(3)));
        assert_eq!(diffs[1].value_b, Some(Value::Int(4)));

        assert_eq!(diffs[2].key, "new");
        assert_eq!(diffs[2].kind, DiffKind::Added);
        assert_eq!(diffs[2].value_b, Some(Value::Int(5)));
    }

    #[test]
    fn int_and_float_with_same_number_are_equal() {
        let a = map(&[("dt", Value::Int(300))]);
        let b = map(&[("dt", Value::Float(300.0))]);
        assert!(diff_parameters(&a, &b).is_empty());
    }

    #[test]
    fn list_element_change_is_detected() {
        let a = map(&[("n", Value::from(vec![41, 80, 16]))]);
        let b = map(&[("n", Value::from(vec![41, 80, 32]))]);
        let diffs = diff_parameters(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiffKind::Changed);
    }

    #[test]
    fn both_empty() {
        assert!(diff_parameters(&ParamMap::new(), &ParamMap::new()).is_empty());
    }
}
