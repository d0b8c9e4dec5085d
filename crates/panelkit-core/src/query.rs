//! Module: query
//! Responsibility: list-query semantics — filter, sort, paginate.
//! Does not own: record storage or aggregation reductions.
//!
//! Semantics are frozen to what config-driven panels already depend on:
//! filtering is strict equality across every filter entry, a `None`
//! filter bypasses the whole pipeline (sorting and pagination included),
//! and sorting compares raw values without numeric coercion.

use crate::{record::Record, value::canonical_cmp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field → required value. A record matches iff every entry equals the
/// record's value at that key; records missing the key never match.
pub type Filter = panelkit_schema::FilterSpec;

///
/// Sort
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl Sort {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }

    /// Toggle semantics for a column header click: same field flips the
    /// direction, a new field restarts ascending.
    #[must_use]
    pub fn toggled(&self, field: &str) -> Self {
        if self.field == field {
            Self {
                field: self.field.clone(),
                order: self.order.flipped(),
            }
        } else {
            Self::asc(field)
        }
    }
}

///
/// SortOrder
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// Pagination
///
/// 1-based page window. `total` on the result always reflects the
/// filtered count before the window is applied.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

///
/// ListParams
///
/// `filter: None` is the documented bypass: the full collection comes
/// back untouched, skipping sort and pagination as well. An empty filter
/// map matches everything but still runs the pipeline.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ListParams {
    pub filter: Option<Filter>,
    pub sort: Option<Sort>,
    pub pagination: Option<Pagination>,
}

impl ListParams {
    /// Match-all params that still run the filter/sort/paginate pipeline.
    #[must_use]
    pub fn match_all() -> Self {
        Self {
            filter: Some(Filter::new()),
            sort: None,
            pagination: None,
        }
    }

    /// The bypass spelling: no filtering, no sorting, no pagination.
    #[must_use]
    pub const fn unfiltered() -> Self {
        Self {
            filter: None,
            sort: None,
            pagination: None,
        }
    }
}

///
/// ListResult
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ListResult {
    pub data: Vec<Record>,
    pub total: usize,
}

/// Whether a record matches every entry of a filter.
#[must_use]
pub fn matches_filter(record: &Record, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

/// Comparator used for sorting: raw canonical comparison, with records
/// missing the sort field comparing equal to everything (their relative
/// order is left to the sort's stability).
fn sort_cmp(left: &Record, right: &Record, sort: &Sort) -> Ordering {
    let ordering = match (left.get(&sort.field), right.get(&sort.field)) {
        (Some(a), Some(b)) => canonical_cmp(a, b),
        _ => Ordering::Equal,
    };

    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Run the full list pipeline over a collection snapshot.
#[must_use]
pub fn apply(records: &[Record], params: &ListParams) -> ListResult {
    // Bypass path: no filter means the caller asked for the raw
    // collection, pagination and sorting included.
    let Some(filter) = &params.filter else {
        return ListResult {
            data: records.to_vec(),
            total: records.len(),
        };
    };

    let mut data: Vec<Record> = records
        .iter()
        .filter(|record| matches_filter(record, filter))
        .cloned()
        .collect();
    let total = data.len();

    if let Some(sort) = params.sort.as_ref().filter(|sort| !sort.field.is_empty()) {
        data.sort_by(|a, b| sort_cmp(a, b, sort));
    }

    if let Some(pagination) = &params.pagination {
        let start = pagination.page.saturating_sub(1) * pagination.per_page;
        let end = start.saturating_add(pagination.per_page).min(data.len());
        data = if start < data.len() {
            data[start..end].to_vec()
        } else {
            Vec::new()
        };
    }

    ListResult { data, total }
}
