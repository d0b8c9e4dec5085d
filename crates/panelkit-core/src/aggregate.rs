//! Module: aggregate
//! Responsibility: scalar reductions over filtered record sets.
//! Does not own: chart series shaping (a facade concern) or filtering
//! itself (shared with the list pipeline).

use crate::{
    error::EngineError,
    query::{Filter, matches_filter},
    record::Record,
    value::coerce_number,
};
use panelkit_schema::MetricAggregate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// AggregateKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateKind {
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

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateKind {
    type Err = EngineError;

    /// Parse an aggregate name from a config or wire spelling. Unknown
    /// names are the unsupported-operation failure of the store contract.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "count" => Ok(Self::Count),
            "sum" => Ok(Self::Sum),
            "avg" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(EngineError::unsupported_aggregate(other)),
        }
    }
}

impl From<MetricAggregate> for AggregateKind {
    fn from(aggregate: MetricAggregate) -> Self {
        match aggregate {
            MetricAggregate::Count => Self::Count,
            MetricAggregate::Sum => Self::Sum,
            MetricAggregate::Avg => Self::Avg,
            MetricAggregate::Min => Self::Min,
            MetricAggregate::Max => Self::Max,
        }
    }
}

///
/// AggregateSpec
///
/// `filter: None` is the documented length shortcut: the store answers
/// with the raw collection size for *every* aggregate kind, not just
/// `count`. Callers that want a real sum or average must pass a filter,
/// even an empty one.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AggregateSpec {
    pub field: String,
    pub aggregate: AggregateKind,
    pub filter: Option<Filter>,
}

impl AggregateSpec {
    #[must_use]
    pub fn new(field: impl Into<String>, aggregate: AggregateKind) -> Self {
        Self {
            field: field.into(),
            aggregate,
            filter: Some(Filter::new()),
        }
    }
}

/// Reduce a record set to a scalar for the given field and kind.
///
/// Coercion is loose (`coerce_number`): non-numeric values count as 0.
/// An empty set averages to 0 (the divide is guarded), while `min`/`max`
/// keep their fold identities (+∞/−∞) — both inherited behaviors.
#[must_use]
pub fn reduce(records: &[Record], field: &str, kind: AggregateKind) -> f64 {
    let numbers = || {
        records
            .iter()
            .map(|record| record.get(field).map_or(0.0, coerce_number))
    };

    #[allow(clippy::cast_precision_loss)]
    match kind {
        AggregateKind::Count => records.len() as f64,
        AggregateKind::Sum => numbers().sum(),
        AggregateKind::Avg => numbers().sum::<f64>() / (records.len().max(1) as f64),
        AggregateKind::Min => numbers().fold(f64::INFINITY, f64::min),
        AggregateKind::Max => numbers().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Run an aggregate spec over a collection snapshot: apply the filter
/// (or take the length shortcut on `None`), then reduce.
#[must_use]
pub fn run(records: &[Record], spec: &AggregateSpec) -> f64 {
    let Some(filter) = &spec.filter else {
        #[allow(clippy::cast_precision_loss)]
        return records.len() as f64;
    };

    let filtered: Vec<Record> = records
        .iter()
        .filter(|record| matches_filter(record, filter))
        .cloned()
        .collect();

    reduce(&filtered, &spec.field, spec.aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn employees() -> Vec<Record> {
        [
            json!({"id": "1", "department_id": "1", "salary": 85000}),
            json!({"id": "2", "department_id": "2", "salary": 75000}),
            json!({"id": "3", "department_id": "3", "salary": 65000}),
            json!({"id": "4", "department_id": "1", "salary": 60000}),
            json!({"id": "5", "department_id": "2", "salary": 55000}),
        ]
        .into_iter()
        .map(|value| value.as_object().unwrap().clone())
        .collect()
    }

    fn department_filter(id: &str) -> Filter {
        [("department_id".to_string(), json!(id))].into_iter().collect()
    }

    #[test]
    fn filtered_average_matches_the_hand_computation() {
        let spec = AggregateSpec {
            field: "salary".into(),
            aggregate: AggregateKind::Avg,
            filter: Some(department_filter("1")),
        };

        // 85000 and 60000 → 72500.
        assert_eq!(run(&employees(), &spec), 72_500.0);
    }

    #[test]
    fn sum_and_count_over_a_filter() {
        let records = employees();

        let sum = AggregateSpec {
            field: "salary".into(),
            aggregate: AggregateKind::Sum,
            filter: Some(department_filter("2")),
        };
        let count = AggregateSpec {
            field: "id".into(),
            aggregate: AggregateKind::Count,
            filter: Some(department_filter("2")),
        };

        assert_eq!(run(&records, &sum), 130_000.0);
        assert_eq!(run(&records, &count), 2.0);
    }

    #[test]
    fn none_filter_short_circuits_to_length_for_every_kind() {
        let records = employees();

        for kind in [
            AggregateKind::Count,
            AggregateKind::Sum,
            AggregateKind::Avg,
            AggregateKind::Min,
            AggregateKind::Max,
        ] {
            let spec = AggregateSpec {
                field: "salary".into(),
                aggregate: kind,
                filter: None,
            };
            assert_eq!(run(&records, &spec), 5.0, "kind {kind}");
        }
    }

    #[test]
    fn empty_set_identities_are_inherited() {
        let none: Vec<Record> = Vec::new();

        assert_eq!(reduce(&none, "salary", AggregateKind::Avg), 0.0);
        assert_eq!(reduce(&none, "salary", AggregateKind::Sum), 0.0);
        assert_eq!(reduce(&none, "salary", AggregateKind::Min), f64::INFINITY);
        assert_eq!(reduce(&none, "salary", AggregateKind::Max), f64::NEG_INFINITY);
    }

    #[test]
    fn non_numeric_values_coerce_to_zero() {
        let records: Vec<Record> = [
            json!({"id": "1", "salary": "not a number"}),
            json!({"id": "2", "salary": 100}),
        ]
        .into_iter()
        .map(|value| value.as_object().unwrap().clone())
        .collect();

        assert_eq!(reduce(&records, "salary", AggregateKind::Sum), 100.0);
        assert_eq!(reduce(&records, "salary", AggregateKind::Avg), 50.0);
    }

    #[test]
    fn unknown_aggregate_names_fail_as_unsupported() {
        let err = "median".parse::<AggregateKind>().unwrap_err();

        assert_eq!(err.class, crate::error::ErrorClass::Unsupported);
    }
}
