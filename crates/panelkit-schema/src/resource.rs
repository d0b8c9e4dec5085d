//! Module: resource
//! Responsibility: declarative resource definitions (fields, actions,
//! permissions, seed data).
//! Does not own: record storage, permission evaluation, or validation of
//! live records against these declarations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// ResourceDef
///
/// One named record collection: its declared field shapes, the CRUD verbs
/// it supports, a role → allowed-actions matrix, and seed records loaded
/// at store construction.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ResourceDef {
    #[serde(default)]
    pub actions: Vec<CrudAction>,
    #[serde(default)]
    pub permissions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl ResourceDef {
    /// Declared definition for one field, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }
}

///
/// CrudAction
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CrudAction {
    GetList,
    GetOne,
    Create,
    Update,
    Delete,
}

///
/// FieldDef
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldDef {
    /// Shorthand for a bare field of the given type.
    #[must_use]
    pub const fn of(kind: FieldType) -> Self {
        Self {
            kind,
            required: false,
            options: None,
            reference: None,
            pattern: None,
            min: None,
            max: None,
        }
    }
}

///
/// FieldType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    Select,
    Reference,
}

///
/// ReferenceDef
///
/// A foreign-key-shaped relation: the stored value is expected to equal
/// some record's `value_field` in the named resource, and display surfaces
/// substitute that record's `display_field`. `value_field` defaults to
/// `id`, which is what every generated config uses in practice.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDef {
    pub resource: String,
    pub display_field: String,
    #[serde(default = "default_value_field")]
    pub value_field: String,
}

fn default_value_field() -> String {
    "id".to_string()
}

///
/// SelectOption
///
/// Options come in two spellings: a bare string, or a `{label, value}`
/// pair when the stored value and the shown label differ.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SelectOption {
    Plain(String),
    Labeled { label: String, value: String },
}

impl SelectOption {
    /// The stored value side of this option.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Labeled { value, .. } => value,
        }
    }

    /// The human-facing side of this option.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Labeled { label, .. } => label,
        }
    }
}
