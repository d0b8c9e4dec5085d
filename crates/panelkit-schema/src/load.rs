//! Module: load
//! Responsibility: config ingestion and load-time validation.
//! Does not own: runtime behavior of the loaded config.
//!
//! Loading is deliberately forgiving at the document level (a missing or
//! malformed file falls back to an empty shell) and strict at the
//! structural level: `validate` walks the parsed config and reports every
//! dangling resource, role, or reference name it can find, so a generated
//! config's mistakes surface before the first page render.

use crate::{
    AppConfig,
    component::ComponentDescriptor,
    resource::ReferenceDef,
};
use std::{fmt, fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

///
/// ConfigIssue
///
/// One structural problem found at load time. Issues never abort a load;
/// the runtime degrades the same way it would have at render time, but
/// the problem is visible up front.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigIssue {
    /// Where the problem sits, as a slash path (`pages/reports/zones/0`).
    pub at: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(at: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            at: at.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at, self.message)
    }
}

/// Parse an `AppConfig` from a JSON string.
pub fn load_from_str(json: &str) -> Result<AppConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an `AppConfig` from a file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    load_from_str(&fs::read_to_string(path)?)
}

/// Load a config, falling back to the empty default shell when the file
/// is missing or malformed. The error, if any, is handed back alongside
/// so callers can report what went wrong.
#[must_use]
pub fn load_or_default(path: impl AsRef<Path>) -> (AppConfig, Option<ConfigError>) {
    match load_from_path(path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    }
}

/// Walk a parsed config and report structural problems: empty required
/// sections, components bound to unknown resources, references to unknown
/// resources or fields, and roles that are not declared in `auth.roles`.
#[must_use]
pub fn validate(config: &AppConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if config.app.name.is_empty() {
        issues.push(ConfigIssue::new("app", "app name is empty"));
    }
    if config.pages.is_empty() {
        issues.push(ConfigIssue::new("pages", "no pages defined"));
    }
    if config.resources.is_empty() {
        issues.push(ConfigIssue::new("resources", "no resources defined"));
    }
    if config.auth.roles.is_empty() {
        issues.push(ConfigIssue::new("auth", "no roles declared"));
    }

    for user in &config.auth.users {
        if !config.auth.roles.iter().any(|role| role == &user.role) {
            issues.push(ConfigIssue::new(
                format!("auth/users/{}", user.id),
                format!("role '{}' is not declared in auth.roles", user.role),
            ));
        }
    }

    for (name, resource) in &config.resources {
        for role in resource.permissions.keys() {
            if !config.auth.roles.iter().any(|declared| declared == role) {
                issues.push(ConfigIssue::new(
                    format!("resources/{name}/permissions"),
                    format!("role '{role}' is not declared in auth.roles"),
                ));
            }
        }
        for (field, def) in &resource.fields {
            if let Some(reference) = &def.reference {
                check_reference(
                    config,
                    &format!("resources/{name}/fields/{field}"),
                    reference,
                    &mut issues,
                );
            }
        }
    }

    let mut seen_paths = std::collections::BTreeSet::new();
    for page in &config.pages {
        let at = format!("pages/{}", page.id);

        if !seen_paths.insert(page.path.as_str()) {
            issues.push(ConfigIssue::new(
                at.clone(),
                format!("duplicate page path '{}'", page.path),
            ));
        }
        if let Some(roles) = &page.role_access {
            for role in roles {
                if !config.auth.roles.iter().any(|declared| declared == role) {
                    issues.push(ConfigIssue::new(
                        at.clone(),
                        format!("roleAccess role '{role}' is not declared in auth.roles"),
                    ));
                }
            }
        }
        for zone in &page.zones {
            for (index, component) in zone.components.iter().enumerate() {
                check_component(
                    config,
                    &format!("{at}/zones/{}/{index}", zone.name),
                    component,
                    &mut issues,
                );
            }
        }
    }

    issues
}

fn check_component(
    config: &AppConfig,
    at: &str,
    component: &ComponentDescriptor,
    issues: &mut Vec<ConfigIssue>,
) {
    if let Some(resource) = component.resource()
        && !config.resources.contains_key(resource)
    {
        issues.push(ConfigIssue::new(
            at,
            format!("unknown resource '{resource}'"),
        ));
    }

    match component {
        ComponentDescriptor::DataTable(props) => {
            for column in &props.columns {
                if let Some(reference) = &column.reference {
                    check_reference(config, &format!("{at}/columns/{}", column.field), reference, issues);
                }
            }
        }
        ComponentDescriptor::SimpleForm(props) => {
            for field in &props.fields {
                if let Some(reference) = &field.reference {
                    check_reference(config, &format!("{at}/fields/{}", field.name), reference, issues);
                }
            }
        }
        ComponentDescriptor::WizardForm(props) => {
            for step in &props.steps {
                for field in &step.fields {
                    if let Some(reference) = &field.reference {
                        check_reference(config, &format!("{at}/steps/{}", step.title), reference, issues);
                    }
                }
            }
        }
        ComponentDescriptor::Chart(props) => {
            for reference in [&props.x_field_reference, &props.y_field_reference]
                .into_iter()
                .flatten()
            {
                check_reference(config, at, reference, issues);
            }
        }
        ComponentDescriptor::TabsComponent(props) => {
            for (index, tab) in props.tabs.iter().enumerate() {
                check_component(config, &format!("{at}/tabs/{index}"), &tab.component, issues);
            }
        }
        ComponentDescriptor::MetricCard(_) => {}
    }
}

fn check_reference(
    config: &AppConfig,
    at: &str,
    reference: &ReferenceDef,
    issues: &mut Vec<ConfigIssue>,
) {
    let Some(target) = config.resources.get(&reference.resource) else {
        issues.push(ConfigIssue::new(
            at,
            format!("reference to unknown resource '{}'", reference.resource),
        ));
        return;
    };

    // Display/value fields are only checkable when the target declares
    // its fields; seed-only resources stay out of scope here.
    if !target.fields.is_empty() && !target.fields.contains_key(&reference.display_field) {
        issues.push(ConfigIssue::new(
            at,
            format!(
                "reference display field '{}' is not declared on '{}'",
                reference.display_field, reference.resource
            ),
        ));
    }
}
