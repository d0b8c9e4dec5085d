//! Module: validate
//! Responsibility: record-shape checks against declared fields, and the
//! form-rule validator shared by tables, forms, and wizards.
//! Does not own: config-structure validation (a schema-crate concern) or
//! deciding which rules apply to which component.
//!
//! Form validation is data, not failure: it returns a field → message
//! map and the caller decides whether submission proceeds. Record-shape
//! checks, by contrast, guard the store and fail hard.

use crate::{
    error::EngineError,
    record::Record,
    value::is_empty_value,
};
use panelkit_schema::{FieldType, ResourceDef, ValidationRule};
use serde_json::Value;
use std::collections::BTreeMap;
use time::{Date, format_description::well_known::Iso8601};

/// Field → human message. Empty means the submission may proceed.
pub type FieldErrors = BTreeMap<String, String>;

/// Check a record's present fields against the resource's declared
/// types. Undeclared fields pass untouched (generated seed data carries
/// denormalized extras), and `required` stays a form-layer concern so
/// partial update patches stay valid.
pub fn check_record_types(
    resource_name: &str,
    resource: &ResourceDef,
    record: &Record,
) -> Result<(), EngineError> {
    for (field, def) in &resource.fields {
        let Some(value) = record.get(field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        if let Some(expected) = type_mismatch(def.kind, value) {
            return Err(EngineError::schema_violation(
                resource_name,
                field,
                format!("expected {expected}, got {}", type_name(value)),
            ));
        }
    }

    Ok(())
}

// The declared type a value fails to satisfy, if any.
fn type_mismatch(kind: FieldType, value: &Value) -> Option<&'static str> {
    let ok = match kind {
        FieldType::Text | FieldType::Select => value.is_string(),
        FieldType::Number => value.is_number() || parses_as_number(value),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Date => value.as_str().is_some_and(is_iso_date),
        // Reference keys are id-shaped: strings in every generated
        // config, numbers tolerated for hand-written seeds.
        FieldType::Reference => value.is_string() || value.is_number(),
    };

    if ok {
        None
    } else {
        Some(match kind {
            FieldType::Text => "text",
            FieldType::Number => "a number",
            FieldType::Boolean => "a boolean",
            FieldType::Date => "an ISO date",
            FieldType::Select => "a select value",
            FieldType::Reference => "a reference key",
        })
    }
}

// Number fields tolerate numeric strings; form inputs submit them.
fn parses_as_number(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|text| text.trim().parse::<f64>().is_ok())
}

fn is_iso_date(text: &str) -> bool {
    Date::parse(text, &Iso8601::DEFAULT).is_ok()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply one validation rule to one field value, in rule order:
/// required, then (for non-empty strings) minLength, maxLength, pattern.
/// Later failures overwrite earlier messages, keeping one message per
/// field.
#[must_use]
pub fn check_rule(
    label: &str,
    rule: &ValidationRule,
    value: Option<&Value>,
) -> Option<String> {
    let mut message = None;

    if rule.required && is_empty_value(value) {
        message = Some(format!("{label} is required"));
    }

    // Length and pattern rules only see non-empty string values, and a
    // zero/empty rule entry means "no rule".
    if let Some(Value::String(text)) = value
        && !text.is_empty()
    {
        if let Some(min) = rule.min_length.filter(|&n| n > 0)
            && text.chars().count() < min
        {
            message = Some(format!("{label} must be at least {min} characters"));
        }

        if let Some(max) = rule.max_length.filter(|&n| n > 0)
            && text.chars().count() > max
        {
            message = Some(format!("{label} must be at most {max} characters"));
        }

        if let Some(pattern) = rule.pattern.as_deref().filter(|p| !p.is_empty())
            // An uncompilable pattern disables the rule; the load-time
            // config report is where bad patterns get surfaced.
            && let Ok(regex) = regex::Regex::new(pattern)
            && !regex.is_match(text)
        {
            message = Some(format!("{label} has an invalid format"));
        }
    }

    message
}

/// Validate a whole value map against per-field rules, producing the
/// field → message map the form surfaces inline.
#[must_use]
pub fn check_rules(
    rules: &BTreeMap<String, ValidationRule>,
    labels: &BTreeMap<String, String>,
    values: &Record,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (field, rule) in rules {
        let label = labels.get(field).map_or(field.as_str(), String::as_str);
        if let Some(message) = check_rule(label, rule, values.get(field)) {
            errors.insert(field.clone(), message);
        }
    }

    errors
}
