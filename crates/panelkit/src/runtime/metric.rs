use crate::runtime::Runtime;
use panelkit_core::{aggregate::AggregateSpec, store::ResourceBackend};
use panelkit_schema::MetricCardProps;

///
/// MetricView
///
/// A resolved metric card: one scalar over an aggregated resource, or an
/// inline error when the store rejected the read.
///

#[derive(Clone, Debug)]
pub struct MetricView {
    pub title: String,
    pub value: Option<f64>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub error: Option<String>,
}

impl MetricView {
    /// Run the card's aggregate against the store.
    #[must_use]
    pub fn build(runtime: &Runtime, props: &MetricCardProps) -> Self {
        let spec = AggregateSpec {
            field: props.field.clone(),
            aggregate: props.aggregate.into(),
            filter: props.filter.clone(),
        };

        match runtime.store().aggregate(&props.resource, &spec) {
            Ok(value) => Self {
                title: props.title.clone(),
                value: Some(value),
                icon: props.icon.clone(),
                color: props.color.clone(),
                error: None,
            },
            Err(_) => Self {
                title: props.title.clone(),
                value: None,
                icon: props.icon.clone(),
                color: props.color.clone(),
                error: Some("Failed to load metric data".to_string()),
            },
        }
    }

    /// Display text for the scalar: whole numbers render without a
    /// decimal point, errors render as a placeholder.
    #[must_use]
    pub fn display_value(&self) -> String {
        match self.value {
            Some(value) if value.fract() == 0.0 && value.is_finite() => {
                format!("{value:.0}")
            }
            Some(value) => value.to_string(),
            None => "--".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_fixtures;

    fn props(json: &str) -> MetricCardProps {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn count_metric_reads_the_collection_size() {
        let runtime = test_fixtures::runtime();
        let view = MetricView::build(
            &runtime,
            &props(
                r#"{"title": "Total Employees", "resource": "employees", "field": "id", "aggregate": "count"}"#,
            ),
        );

        assert_eq!(view.value, Some(5.0));
        assert_eq!(view.display_value(), "5");
        assert!(view.error.is_none());
    }

    #[test]
    fn average_metric_keeps_fractions() {
        let runtime = test_fixtures::runtime();
        let view = MetricView::build(
            &runtime,
            &props(
                r#"{"title": "Average Salary", "resource": "employees", "field": "salary", "aggregate": "avg"}"#,
            ),
        );

        assert_eq!(view.value, Some(68_000.0));
        assert_eq!(view.display_value(), "68000");
    }

    #[test]
    fn unknown_resource_degrades_to_an_inline_error() {
        let runtime = test_fixtures::runtime();
        let view = MetricView::build(
            &runtime,
            &props(
                r#"{"title": "Broken", "resource": "projects", "field": "id", "aggregate": "count"}"#,
            ),
        );

        assert_eq!(view.value, None);
        assert_eq!(view.display_value(), "--");
        assert_eq!(view.error.as_deref(), Some("Failed to load metric data"));
    }
}
