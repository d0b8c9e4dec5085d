//! Module: runtime::chart
//! Responsibility: shaping filtered records into plottable series.
//! Does not own: scalar aggregation (engine) or drawing.
//!
//! Two shaping rules are load-bearing and frozen:
//!
//! 1. Reference enrichment happens *before* partitioning, so grouping
//!    runs on display labels. Flipping the order would split groups
//!    whenever several raw keys share one label.
//! 2. Grouped data flattens into a single multi-series row for bar, pie,
//!    and doughnut charts (x pinned to a literal placeholder), but stays
//!    one-row-per-group for line and area charts. That asymmetry matches
//!    how multi-series charts of each shape are drawn.

use crate::runtime::Runtime;
use panelkit_core::{
    query::ListParams,
    record::Record,
    reference::ReferenceIndex,
    store::ResourceBackend,
    value::{coerce_number, group_key},
};
use panelkit_schema::{ChartProps, ChartType, ReferenceDef, Transform};
use serde_json::Value;

/// Literal x value carried by the flattened multi-series row.
pub const FLATTENED_X_LABEL: &str = "All Departments";

///
/// ChartView
///
/// Shaped rows ready for a plotting layer: `rows` hold `{x, y...}`
/// objects and `series_keys` name the value columns to draw, in the
/// order their groups were first seen.
///

#[derive(Clone, Debug)]
pub struct ChartView {
    pub title: String,
    pub chart_type: ChartType,
    pub x_field: String,
    pub y_field: String,
    pub rows: Vec<Record>,
    pub series_keys: Vec<String>,
    /// Set when grouped data was flattened into one multi-series row.
    pub flattened: bool,
    pub error: Option<String>,
}

///
/// PieSlice
///

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

impl ChartView {
    /// Fetch, enrich, partition, and reduce one chart's data.
    #[must_use]
    pub fn build(runtime: &Runtime, props: &ChartProps) -> Self {
        let title = props.title.clone().unwrap_or_else(|| {
            format!(
                "{} {} chart",
                props.resource,
                chart_type_label(props.chart_type)
            )
        });

        let params = ListParams {
            filter: props.filter.clone(),
            sort: None,
            pagination: None,
        };
        let fetched = match runtime.store().get_list(&props.resource, &params) {
            Ok(result) => result.data,
            Err(_) => {
                return Self {
                    title,
                    chart_type: props.chart_type,
                    x_field: props.x_field.clone(),
                    y_field: props.y_field.clone(),
                    rows: Vec::new(),
                    series_keys: Vec::new(),
                    flattened: false,
                    error: Some("Failed to load chart data".to_string()),
                };
            }
        };

        let enriched = enrich(runtime, props, fetched);
        let shaped = shape(props, enriched);

        Self {
            title,
            chart_type: props.chart_type,
            x_field: props.x_field.clone(),
            y_field: props.y_field.clone(),
            rows: shaped.rows,
            series_keys: shaped.series_keys,
            flattened: shaped.flattened,
            error: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Project the shaped rows into pie/doughnut slices: one slice per
    /// series when grouped data was flattened, one slice per row
    /// otherwise.
    #[must_use]
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        if self.flattened {
            self.series_keys
                .iter()
                .map(|key| PieSlice {
                    name: key.clone(),
                    value: self
                        .rows
                        .iter()
                        .map(|row| row.get(key).map_or(0.0, coerce_number))
                        .sum(),
                })
                .collect()
        } else {
            self.rows
                .iter()
                .map(|row| PieSlice {
                    name: group_key(row.get(&self.x_field)),
                    value: row.get(&self.y_field).map_or(0.0, coerce_number),
                })
                .collect()
        }
    }
}

///
/// ShapedSeries
///

struct ShapedSeries {
    rows: Vec<Record>,
    series_keys: Vec<String>,
    flattened: bool,
}

// Substitute display labels for reference-typed x/y values, row by row,
// before any partitioning happens.
fn enrich(runtime: &Runtime, props: &ChartProps, mut rows: Vec<Record>) -> Vec<Record> {
    let x_index = props
        .x_field_reference
        .as_ref()
        .and_then(|reference| load_index(runtime, reference));
    let y_index = props
        .y_field_reference
        .as_ref()
        .and_then(|reference| load_index(runtime, reference));

    if x_index.is_none() && y_index.is_none() {
        return rows;
    }

    for row in &mut rows {
        if let Some(index) = &x_index
            && let Some(value) = row.get(&props.x_field).cloned()
        {
            row.insert(props.x_field.clone(), index.resolve(&value));
        }
        if let Some(index) = &y_index
            && let Some(value) = row.get(&props.y_field).cloned()
        {
            row.insert(props.y_field.clone(), index.resolve(&value));
        }
    }

    rows
}

fn load_index(runtime: &Runtime, reference: &ReferenceDef) -> Option<ReferenceIndex> {
    runtime
        .store()
        .get_list(&reference.resource, &ListParams::match_all())
        .ok()
        .map(|result| ReferenceIndex::build(reference, &result.data))
}

// Partition and reduce. Group keys are the string projection of the
// partitioned value, in first-seen order, exactly as the plotted axis
// labels them.
fn shape(props: &ChartProps, rows: Vec<Record>) -> ShapedSeries {
    if rows.is_empty() {
        return ShapedSeries {
            rows: Vec::new(),
            series_keys: Vec::new(),
            flattened: false,
        };
    }

    if let Some(group_by) = &props.group_by {
        let groups = partition(&rows, group_by);

        if props.chart_type.flattens_groups() {
            let mut flat = Record::new();
            let mut series_keys = Vec::with_capacity(groups.len());

            flat.insert(
                props.x_field.clone(),
                Value::String(FLATTENED_X_LABEL.to_string()),
            );
            for (group_value, members) in groups {
                flat.insert(
                    group_value.clone(),
                    number(reduce(props.transform, &members, &props.y_field)),
                );
                series_keys.push(group_value);
            }

            ShapedSeries {
                rows: vec![flat],
                series_keys,
                flattened: true,
            }
        } else {
            let rows = rows_per_group(props, groups);

            ShapedSeries {
                rows,
                series_keys: vec![props.y_field.clone()],
                flattened: false,
            }
        }
    } else {
        let groups = partition(&rows, &props.x_field);
        let rows = rows_per_group(props, groups);

        ShapedSeries {
            rows,
            series_keys: vec![props.y_field.clone()],
            flattened: false,
        }
    }
}

fn rows_per_group(props: &ChartProps, groups: Vec<(String, Vec<Record>)>) -> Vec<Record> {
    groups
        .into_iter()
        .map(|(key, members)| {
            let mut row = Record::new();
            row.insert(props.x_field.clone(), Value::String(key));
            row.insert(
                props.y_field.clone(),
                number(reduce(props.transform, &members, &props.y_field)),
            );
            row
        })
        .collect()
}

// First-seen-order partition by the string projection of one field.
fn partition(rows: &[Record], field: &str) -> Vec<(String, Vec<Record>)> {
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();

    for row in rows {
        let key = group_key(row.get(field));
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(row.clone()),
            None => groups.push((key, vec![row.clone()])),
        }
    }

    groups
}

fn reduce(transform: Transform, members: &[Record], y_field: &str) -> f64 {
    let sum: f64 = members
        .iter()
        .map(|row| row.get(y_field).map_or(0.0, coerce_number))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    match transform {
        Transform::Sum => sum,
        Transform::Avg => sum / members.len() as f64,
        Transform::Count => members.len() as f64,
    }
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

const fn chart_type_label(chart_type: ChartType) -> &'static str {
    match chart_type {
        ChartType::Bar => "bar",
        ChartType::Line => "line",
        ChartType::Pie => "pie",
        ChartType::Area => "area",
        ChartType::Doughnut => "doughnut",
    }
}
