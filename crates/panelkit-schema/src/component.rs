//! Module: component
//! Responsibility: the closed set of component descriptors and their
//! typed props.
//! Does not own: view-model construction or store access.
//!
//! Descriptors deserialize from the `{type, props}` JSON shape. Keeping
//! the union closed means an unknown component type or a malformed props
//! block fails at config load, where it can be reported, instead of
//! surfacing as a missing value mid-render.

use crate::{FilterSpec, resource::{FieldType, ReferenceDef, SelectOption}};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// ComponentDescriptor
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", content = "props")]
pub enum ComponentDescriptor {
    MetricCard(MetricCardProps),
    DataTable(DataTableProps),
    SimpleForm(SimpleFormProps),
    WizardForm(WizardFormProps),
    Chart(ChartProps),
    TabsComponent(TabsProps),
}

impl ComponentDescriptor {
    /// The resource this component reads from, when it reads one at all.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        match self {
            Self::MetricCard(props) => Some(&props.resource),
            Self::DataTable(props) => Some(&props.resource),
            Self::SimpleForm(props) => Some(&props.resource),
            Self::WizardForm(props) => Some(&props.resource),
            Self::Chart(props) => Some(&props.resource),
            Self::TabsComponent(_) => None,
        }
    }
}

// A filter key that is *absent* means "match everything" and still runs
// the filtering path; an explicit JSON `null` bypasses filtering at the
// store. Both spellings occur in generated configs, so the distinction is
// kept through deserialization.
fn match_all_filter() -> Option<FilterSpec> {
    Some(FilterSpec::new())
}

const fn default_true() -> bool {
    true
}

///
/// MetricCardProps
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCardProps {
    pub title: String,
    pub resource: String,
    pub field: String,
    pub aggregate: MetricAggregate,
    #[serde(default = "match_all_filter")]
    pub filter: Option<FilterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

///
/// MetricAggregate
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricAggregate {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl MetricAggregate {
    /// Config spelling of this aggregate, as passed to the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

///
/// DataTableProps
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableProps {
    pub resource: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub filters: Vec<FilterControl>,
    #[serde(default = "default_true")]
    pub pagination: bool,
    #[serde(default = "default_true")]
    pub allow_create: bool,
    #[serde(default = "default_true")]
    pub allow_edit: bool,
    #[serde(default = "default_true")]
    pub allow_delete: bool,
    #[serde(default)]
    pub form_validation_rules: BTreeMap<String, ValidationRule>,
}

///
/// ColumnDef
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceDef>,
}

///
/// FilterControl
///
/// A filter input rendered above a table. `Select` controls carry their
/// option list; the rest are free-form inputs.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FilterControl {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: FilterControlKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

///
/// FilterControlKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterControlKind {
    Text,
    Select,
    Date,
    Number,
}

///
/// ValidationRule
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

///
/// SimpleFormProps
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleFormProps {
    pub resource: String,
    pub fields: Vec<FormFieldDef>,
    pub submit_action: SubmitAction,
    #[serde(default)]
    pub initial_values: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_path: Option<String>,
}

///
/// FormFieldDef
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceDef>,
}

///
/// SubmitAction
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitAction {
    Create,
    Update,
}

///
/// WizardFormProps
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardFormProps {
    pub resource: String,
    pub steps: Vec<WizardStep>,
    pub submit_action: SubmitAction,
    #[serde(default)]
    pub initial_values: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_path: Option<String>,
}

///
/// WizardStep
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WizardStep {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormFieldDef>,
}

///
/// ChartProps
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub chart_type: ChartType,
    pub resource: String,
    pub x_field: String,
    pub y_field: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "match_all_filter")]
    pub filter: Option<FilterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_field_reference: Option<ReferenceDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_field_reference: Option<ReferenceDef>,
}

///
/// ChartType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
    Doughnut,
}

impl ChartType {
    /// Grouped data is flattened into one multi-series row for these
    /// chart shapes; line/area keep one row per group instead.
    #[must_use]
    pub const fn flattens_groups(self) -> bool {
        matches!(self, Self::Bar | Self::Pie | Self::Doughnut)
    }
}

///
/// Transform
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    #[default]
    Sum,
    Avg,
    Count,
}

///
/// TabsProps
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsProps {
    #[serde(default)]
    pub layout: TabsLayout,
    #[serde(default)]
    pub load_on_click: bool,
    #[serde(default)]
    pub tabs: Vec<TabDef>,
}

///
/// TabsLayout
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabsLayout {
    #[default]
    Horizontal,
    Vertical,
}

///
/// TabDef
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TabDef {
    pub title: String,
    pub component: Box<ComponentDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_dispatches_on_type_tag() {
        let descriptor: ComponentDescriptor = serde_json::from_str(
            r#"{
                "type": "MetricCard",
                "props": {
                    "title": "Total Employees",
                    "resource": "employees",
                    "field": "id",
                    "aggregate": "count",
                    "icon": "users"
                }
            }"#,
        )
        .unwrap();

        let ComponentDescriptor::MetricCard(props) = descriptor else {
            panic!("expected a MetricCard descriptor");
        };
        assert_eq!(props.aggregate, MetricAggregate::Count);
        assert_eq!(props.resource, "employees");
    }

    #[test]
    fn unknown_component_type_is_a_parse_error() {
        let result = serde_json::from_str::<ComponentDescriptor>(
            r#"{"type": "Kanban", "props": {}}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn absent_filter_matches_everything_but_null_bypasses() {
        let absent: MetricCardProps = serde_json::from_str(
            r#"{"title": "t", "resource": "employees", "field": "id", "aggregate": "count"}"#,
        )
        .unwrap();
        let null: MetricCardProps = serde_json::from_str(
            r#"{"title": "t", "resource": "employees", "field": "id", "aggregate": "count", "filter": null}"#,
        )
        .unwrap();

        assert_eq!(absent.filter, Some(FilterSpec::new()));
        assert_eq!(null.filter, None);
    }

    #[test]
    fn data_table_defaults_allow_everything() {
        let props: DataTableProps = serde_json::from_str(
            r#"{
                "resource": "employees",
                "columns": [{"field": "name", "label": "Name", "type": "text"}]
            }"#,
        )
        .unwrap();

        assert!(props.pagination);
        assert!(props.allow_create && props.allow_edit && props.allow_delete);
        assert!(props.form_validation_rules.is_empty());
    }

    #[test]
    fn tabs_nest_full_descriptors() {
        let props: TabsProps = serde_json::from_str(
            r#"{
                "loadOnClick": true,
                "tabs": [{
                    "title": "People",
                    "component": {
                        "type": "Chart",
                        "props": {
                            "chartType": "bar",
                            "resource": "employees",
                            "xField": "department_name",
                            "yField": "id",
                            "transform": "count"
                        }
                    }
                }]
            }"#,
        )
        .unwrap();

        assert!(props.load_on_click);
        assert!(matches!(
            *props.tabs[0].component,
            ComponentDescriptor::Chart(_)
        ));
    }
}
