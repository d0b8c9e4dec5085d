//! Module: value
//! Responsibility: comparison, coercion, and text projection over raw
//! JSON values.
//! Does not own: record shapes or store semantics.

use serde_json::Value;
use std::cmp::Ordering;

/// Canonical ordering rank per JSON variant. Mixed-variant comparisons
/// are rank-only so the comparator stays total and deterministic.
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total canonical comparator used by sorting and grouping surfaces.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Strings compare lexicographically even when they hold digits; sorting
/// never coerces a numeric string into a number.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => canonical_cmp_list(a, b),
        (Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
        _ => Ordering::Equal,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

/// Numeric coercion with a zero fallback: numbers pass through, numeric
/// strings parse, booleans map to 1/0, everything else is 0. This is the
/// coercion every aggregation reduction runs on.
#[must_use]
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Plain-text projection of a value: strings pass through unquoted,
/// nulls go blank, everything else renders as JSON.
#[must_use]
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Whether a value counts as "not provided" for required checks:
/// missing, explicit null, or the empty string.
#[must_use]
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Stable grouping key for a value: the display text for scalars, the
/// JSON rendering otherwise. Groups formed before and after reference
/// enrichment both go through this projection.
#[must_use]
pub fn group_key(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), display_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_sort_lexicographically() {
        // "9" > "10" as text; the comparator must not coerce.
        assert_eq!(
            canonical_cmp(&json!("9"), &json!("10")),
            Ordering::Greater
        );
        assert_eq!(canonical_cmp(&json!(9), &json!(10)), Ordering::Less);
    }

    #[test]
    fn mixed_variants_order_by_rank() {
        assert_eq!(canonical_cmp(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(canonical_cmp(&json!(5), &json!("5")), Ordering::Less);
        assert_eq!(canonical_cmp(&json!("z"), &json!([1])), Ordering::Less);
    }

    #[test]
    fn coercion_matches_loose_numeric_rules() {
        assert_eq!(coerce_number(&json!(85000)), 85000.0);
        assert_eq!(coerce_number(&json!("72.5")), 72.5);
        assert_eq!(coerce_number(&json!("not a number")), 0.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn empty_values_are_missing_null_or_blank() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&json!(null))));
        assert!(is_empty_value(Some(&json!(""))));
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!(false))));
    }

    #[test]
    fn display_text_unquotes_strings_only() {
        assert_eq!(display_text(&json!("Engineering")), "Engineering");
        assert_eq!(display_text(&json!(72500)), "72500");
        assert_eq!(display_text(&json!(null)), "");
    }
}
