//! Module: runtime::wizard
//! Responsibility: the WizardForm component — a linear step machine over
//! the shared form plumbing.
//!
//! Stepping rules: `next` advances only when the current step's required
//! fields pass; `previous` is always allowed and never validates; there
//! is no skip-ahead. Submission validates the final step once more.

use crate::runtime::{
    Runtime,
    form::{FormOutcome, load_reference_options, required_errors, write_record},
};
use panelkit_core::{
    record::Record,
    store::ResourceBackend,
    validate::FieldErrors,
};
use panelkit_schema::{SubmitAction, WizardFormProps, WizardStep};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// WizardForm
///

#[derive(Clone, Debug)]
pub struct WizardForm {
    props: WizardFormProps,
    pub step: usize,
    pub values: Record,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
    pub submitting: bool,
    reference_options: BTreeMap<String, Vec<(Value, Value)>>,
}

impl WizardForm {
    /// Mount the wizard at step 0: load the record in update mode and
    /// every step's reference options eagerly.
    #[must_use]
    pub fn mount(runtime: &Runtime, props: WizardFormProps) -> Self {
        let mut form_error = None;

        let values = if props.submit_action == SubmitAction::Update
            && let Some(Value::String(id)) = props.initial_values.get("id")
        {
            match runtime.store().get_one(&props.resource, id) {
                Ok(record) => record,
                Err(_) => {
                    form_error = Some("Failed to load data".to_string());
                    Record::new()
                }
            }
        } else {
            props.initial_values.clone().into_iter().collect()
        };

        let reference_options = load_reference_options(
            runtime,
            props.steps.iter().flat_map(|step| step.fields.iter()),
        );

        Self {
            props,
            step: 0,
            values,
            errors: FieldErrors::new(),
            form_error,
            submitting: false,
            reference_options,
        }
    }

    #[must_use]
    pub const fn props(&self) -> &WizardFormProps {
        &self.props
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&WizardStep> {
        self.props.steps.get(self.step)
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.props.steps.len()
    }

    /// Option pairs for one reference field's dropdown, any step.
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

    /// Validate the current step's required fields.
    pub fn validate_step(&mut self) -> bool {
        let Some(step) = self.props.steps.get(self.step) else {
            return false;
        };

        self.errors = required_errors(step.fields.iter(), &self.values);
        self.errors.is_empty()
    }

    /// Advance one step; refused when the current step fails validation
    /// or the wizard is already on its last step.
    pub fn next(&mut self) -> bool {
        if !self.validate_step() {
            return false;
        }
        if self.is_last_step() {
            return false;
        }

        self.step += 1;
        true
    }

    /// Step back, never validating.
    pub fn previous(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Submit from the final step.
    pub fn submit(&mut self, runtime: &mut Runtime) -> FormOutcome {
        if !self.validate_step() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_fixtures;
    use panelkit_core::query::ListParams;
    use serde_json::json;

    fn props() -> WizardFormProps {
        serde_json::from_str(
            r#"{
                "resource": "employees",
                "submitAction": "create",
                "redirectPath": "/employees",
                "steps": [
                    {"title": "Identity", "fields": [
                        {"name": "name", "label": "Name", "type": "text", "required": true},
                        {"name": "email", "label": "Email", "type": "text", "required": true}
                    ]},
                    {"title": "Placement", "fields": [
                        {"name": "department_id", "label": "Department", "type": "reference", "required": true,
                         "reference": {"resource": "departments", "displayField": "name", "valueField": "id"}}
                    ]},
                    {"title": "Compensation", "fields": [
                        {"name": "salary", "label": "Salary", "type": "number", "required": true}
                    ]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn next_requires_the_current_step_to_pass() {
        let runtime = test_fixtures::runtime();
        let mut wizard = WizardForm::mount(&runtime, props());

        assert!(!wizard.next());
        assert_eq!(wizard.step, 0);
        assert_eq!(wizard.errors.get("name").unwrap(), "Name is required");

        wizard.change("name", json!("Dana Scully"));
        wizard.change("email", json!("dana@example.com"));
        assert!(wizard.next());
        assert_eq!(wizard.step, 1);
        assert_eq!(wizard.current_step().unwrap().title, "Placement");
    }

    #[test]
    fn previous_never_validates() {
        let runtime = test_fixtures::runtime();
        let mut wizard = WizardForm::mount(&runtime, props());

        wizard.change("name", json!("Dana"));
        wizard.change("email", json!("dana@example.com"));
        assert!(wizard.next());

        // Step 1 is incomplete; going back is still allowed.
        wizard.previous();
        assert_eq!(wizard.step, 0);

        wizard.previous();
        assert_eq!(wizard.step, 0);
    }

    #[test]
    fn next_stops_at_the_last_step() {
        let runtime = test_fixtures::runtime();
        let mut wizard = WizardForm::mount(&runtime, props());

        wizard.change("name", json!("Dana"));
        wizard.change("email", json!("dana@example.com"));
        wizard.change("department_id", json!("1"));
        wizard.change("salary", json!(70000));

        assert!(wizard.next());
        assert!(wizard.next());
        assert!(wizard.is_last_step());
        assert!(!wizard.next());
        assert_eq!(wizard.step, 2);
    }

    #[test]
    fn submit_walks_the_whole_flow() {
        let mut runtime = test_fixtures::runtime();
        let mut wizard = WizardForm::mount(&runtime, props());

        wizard.change("name", json!("Dana Scully"));
        wizard.change("email", json!("dana@example.com"));
        assert!(wizard.next());
        wizard.change("department_id", json!("3"));
        assert!(wizard.next());

        // Final step incomplete: submit refuses.
        assert_eq!(wizard.submit(&mut runtime), FormOutcome::Invalid);

        wizard.change("salary", json!(70000));
        assert_eq!(wizard.submit(&mut runtime), FormOutcome::Submitted {
            redirect: Some("/employees".to_string())
        });

        let listed = runtime
            .store()
            .get_list("employees", &ListParams::unfiltered())
            .unwrap();
        assert_eq!(listed.total, 6);
    }

    #[test]
    fn reference_options_span_every_step() {
        let runtime = test_fixtures::runtime();
        let wizard = WizardForm::mount(&runtime, props());

        assert_eq!(wizard.reference_options("department_id").len(), 3);
    }
}
