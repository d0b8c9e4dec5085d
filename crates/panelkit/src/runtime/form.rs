//! Module: runtime::form
//! Responsibility: the SimpleForm component — mount-time value seeding,
//! eager reference loading, required-field validation, and submission.
//! Does not own: wizard stepping (its own module) or store semantics.

use crate::runtime::{Runtime, default_label};
use panelkit_core::{
    error::EngineError,
    query::ListParams,
    record::{self, Record},
    reference::ReferenceIndex,
    store::ResourceBackend,
    validate::FieldErrors,
    value::is_empty_value,
};
use panelkit_schema::{FormFieldDef, SimpleFormProps, SubmitAction};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// FormOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormOutcome {
    /// Submission went through; carry the configured redirect, if any.
    Submitted { redirect: Option<String> },
    /// Field validation failed; the errors map says where.
    Invalid,
    /// The store rejected the write; a form-level error is set.
    Failed,
}

///
/// SimpleForm
///
/// A mounted flat form. In update mode the record is loaded up front; in
/// create mode declared defaults seed the values. Reference fields load
/// their option lists eagerly on mount.
///

#[derive(Clone, Debug)]
pub struct SimpleForm {
    props: SimpleFormProps,
    pub values: Record,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
    pub submitting: bool,
    reference_options: BTreeMap<String, Vec<(Value, Value)>>,
}

impl SimpleForm {
    /// Mount the form: seed values, and load reference option lists.
    #[must_use]
    pub fn mount(runtime: &Runtime, props: SimpleFormProps) -> Self {
        let mut form_error = None;

        let values = match initial_record(runtime, &props) {
            Ok(values) => values,
            Err(_) => {
                form_error = Some("Failed to load data".to_string());
                Record::new()
            }
        };

        let reference_options = load_reference_options(runtime, props.fields.iter());

        Self {
            props,
            values,
            errors: FieldErrors::new(),
            form_error,
            submitting: false,
            reference_options,
        }
    }

    #[must_use]
    pub const fn props(&self) -> &SimpleFormProps {
        &self.props
    }

    /// Option pairs `(value, label)` for one reference field's dropdown.
    #[must_use]
    pub fn reference_options(&self, field: &str) -> &[(Value, Value)] {
        self.reference_options
            .get(field)
            .map_or(&[], Vec::as_slice)
    }

    /// Change one field, clearing its error.
    pub fn change(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
        self.errors.remove(name);
    }

    /// Required-field validation across every field.
    pub fn validate(&mut self) -> bool {
        self.errors = required_errors(self.props.fields.iter(), &self.values);
        self.errors.is_empty()
    }

    /// Submit: validation failure leaves the form annotated, a store
    /// rejection sets the form-level error, success hands back the
    /// configured redirect.
    pub fn submit(&mut self, runtime: &mut Runtime) -> FormOutcome {
        if !self.validate() {
            return FormOutcome::Invalid;
        }

        self.submitting = true;
        let written = write_record(
            runtime,
            &self.props.resource,
            self.props.submit_action,
            &self.values,
        );
        self.submitting = false;

        if written.is_err() {
            self.form_error = Some("Failed to submit form".to_string());
            return FormOutcome::Failed;
        }

        FormOutcome::Submitted {
            redirect: self.props.redirect_path.clone(),
        }
    }
}

// Update mode loads the record named by the initial values; create mode
// layers initial values over declared defaults.
fn initial_record(runtime: &Runtime, props: &SimpleFormProps) -> Result<Record, EngineError> {
    if props.submit_action == SubmitAction::Update
        && let Some(Value::String(id)) = props.initial_values.get("id")
    {
        return runtime.store().get_one(&props.resource, id);
    }

    let mut values = Record::new();
    for field in &props.fields {
        if let Some(default) = &field.default_value {
            values.insert(field.name.clone(), default.clone());
        }
    }
    for (key, value) in &props.initial_values {
        values.insert(key.clone(), value.clone());
    }

    Ok(values)
}

/// Load `(value, label)` dropdown pairs for every reference field, one
/// fetch per referenced resource. A failed fetch leaves that field's
/// options empty rather than failing the mount.
pub(crate) fn load_reference_options<'a>(
    runtime: &Runtime,
    fields: impl Iterator<Item = &'a FormFieldDef>,
) -> BTreeMap<String, Vec<(Value, Value)>> {
    let mut fetched: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    let mut options = BTreeMap::new();

    for field in fields {
        let Some(reference) = &field.reference else {
            continue;
        };

        let records = fetched
            .entry(reference.resource.clone())
            .or_insert_with(|| {
                runtime
                    .store()
                    .get_list(&reference.resource, &ListParams::match_all())
                    .map(|result| result.data)
                    .unwrap_or_default()
            });

        options.insert(
            field.name.clone(),
            ReferenceIndex::option_pairs(reference, records),
        );
    }

    options
}

/// Required-only validation shared by SimpleForm and wizard steps.
pub(crate) fn required_errors<'a>(
    fields: impl Iterator<Item = &'a FormFieldDef>,
    values: &Record,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in fields {
        if field.required && is_empty_value(values.get(&field.name)) {
            let label = field
                .label
                .clone()
                .unwrap_or_else(|| default_label(&field.name));
            errors.insert(field.name.clone(), format!("{label} is required"));
        }
    }

    errors
}

/// Dispatch a create/update write. An update without an id in the
/// values is a quiet no-op, matching the submit flow this runtime
/// inherits.
pub(crate) fn write_record(
    runtime: &mut Runtime,
    resource: &str,
    action: SubmitAction,
    values: &Record,
) -> Result<(), EngineError> {
    match action {
        SubmitAction::Create => runtime
            .store_mut()
            .create(resource, values.clone())
            .map(|_| ()),
        SubmitAction::Update => {
            if let Some(id) = record::record_id(values).map(str::to_string) {
                runtime
                    .store_mut()
                    .update(resource, &id, values)
                    .map(|_| ())
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_fixtures;
    use serde_json::json;

    fn props(json: &str) -> SimpleFormProps {
        serde_json::from_str(json).unwrap()
    }

    const CREATE_FORM: &str = r#"{
        "resource": "employees",
        "submitAction": "create",
        "fields": [
            {"name": "name", "label": "Name", "type": "text", "required": true},
            {"name": "email", "label": "Email", "type": "text", "required": true},
            {"name": "department_id", "label": "Department", "type": "reference",
             "reference": {"resource": "departments", "displayField": "name", "valueField": "id"}},
            {"name": "salary", "label": "Salary", "type": "number", "defaultValue": 50000},
            {"name": "active", "label": "Active", "type": "boolean", "defaultValue": true}
        ],
        "redirectPath": "/employees"
    }"#;

    #[test]
    fn create_mode_seeds_declared_defaults() {
        let runtime = test_fixtures::runtime();
        let form = SimpleForm::mount(&runtime, props(CREATE_FORM));

        assert_eq!(form.values.get("salary"), Some(&json!(50000)));
        assert_eq!(form.values.get("active"), Some(&json!(true)));
        assert!(form.values.get("name").is_none());
    }

    #[test]
    fn reference_fields_load_their_options_eagerly() {
        let runtime = test_fixtures::runtime();
        let form = SimpleForm::mount(&runtime, props(CREATE_FORM));

        let options = form.reference_options("department_id");
        assert_eq!(options.len(), 3);
        assert_eq!(options[0], (json!("1"), json!("Engineering")));
    }

    #[test]
    fn required_fields_block_submission() {
        let mut runtime = test_fixtures::runtime();
        let mut form = SimpleForm::mount(&runtime, props(CREATE_FORM));

        assert_eq!(form.submit(&mut runtime), FormOutcome::Invalid);
        assert_eq!(form.errors.get("name").unwrap(), "Name is required");
        assert_eq!(form.errors.get("email").unwrap(), "Email is required");

        form.change("name", json!("Dana Scully"));
        assert!(form.errors.get("name").is_none());
        form.change("email", json!("dana@example.com"));

        let outcome = form.submit(&mut runtime);
        assert_eq!(outcome, FormOutcome::Submitted {
            redirect: Some("/employees".to_string())
        });

        let listed = runtime
            .store()
            .get_list("employees", &ListParams::unfiltered())
            .unwrap();
        assert_eq!(listed.total, 6);
    }

    #[test]
    fn update_mode_loads_the_record_on_mount() {
        let mut runtime = test_fixtures::runtime();
        let mut form = SimpleForm::mount(
            &runtime,
            props(
                r#"{
                    "resource": "employees",
                    "submitAction": "update",
                    "initialValues": {"id": "2"},
                    "fields": [
                        {"name": "name", "label": "Name", "type": "text", "required": true},
                        {"name": "salary", "label": "Salary", "type": "number"}
                    ]
                }"#,
            ),
        );

        assert_eq!(form.values.get("name"), Some(&json!("Jane Smith")));

        form.change("salary", json!(80000));
        assert_eq!(form.submit(&mut runtime), FormOutcome::Submitted {
            redirect: None
        });
        assert_eq!(
            runtime.store().get_one("employees", "2").unwrap()["salary"],
            json!(80000)
        );
    }

    #[test]
    fn update_mount_of_a_missing_record_sets_the_form_error() {
        let runtime = test_fixtures::runtime();
        let form = SimpleForm::mount(
            &runtime,
            props(
                r#"{
                    "resource": "employees",
                    "submitAction": "update",
                    "initialValues": {"id": "999"},
                    "fields": [{"name": "name", "type": "text"}]
                }"#,
            ),
        );

        assert_eq!(form.form_error.as_deref(), Some("Failed to load data"));
        assert!(form.values.is_empty());
    }

    #[test]
    fn store_rejection_sets_the_submit_error() {
        let mut runtime = test_fixtures::runtime();
        let mut form = SimpleForm::mount(&runtime, props(CREATE_FORM));

        form.change("name", json!("Dana"));
        form.change("email", json!("dana@example.com"));
        form.change("salary", json!("lots"));

        assert_eq!(form.submit(&mut runtime), FormOutcome::Failed);
        assert_eq!(form.form_error.as_deref(), Some("Failed to submit form"));
    }
}
