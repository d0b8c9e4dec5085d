//! Module: reference
//! Responsibility: foreign-key display resolution over a pre-fetched
//! record set.
//! Does not own: fetching the referenced collection (callers load it
//! once, eagerly) or deciding when a field is reference-typed.

use crate::record::Record;
use panelkit_schema::ReferenceDef;
use serde_json::Value;
use std::collections::HashMap;

///
/// ReferenceIndex
///
/// A referenced collection indexed once by its `value_field` so every
/// cell resolves in O(1) instead of scanning per row. The first record
/// carrying a given key wins, matching linear-scan resolution order.
///
/// Resolution never fails: a value with no matching record passes
/// through unchanged.
///

#[derive(Clone, Debug, Default)]
pub struct ReferenceIndex {
    display_by_key: HashMap<String, Value>,
}

impl ReferenceIndex {
    /// Index a referenced collection for the given reference shape.
    #[must_use]
    pub fn build(reference: &ReferenceDef, records: &[Record]) -> Self {
        let mut display_by_key = HashMap::with_capacity(records.len());

        for record in records {
            let Some(key) = record.get(&reference.value_field) else {
                continue;
            };
            let Some(display) = record.get(&reference.display_field) else {
                continue;
            };

            display_by_key
                .entry(Self::key_of(key))
                .or_insert_with(|| display.clone());
        }

        Self { display_by_key }
    }

    /// Resolve a stored value to its display label, falling back to the
    /// raw value on any miss.
    #[must_use]
    pub fn resolve(&self, value: &Value) -> Value {
        self.display_by_key
            .get(&Self::key_of(value))
            .cloned()
            .unwrap_or_else(|| value.clone())
    }

    /// `(value, label)` pairs for dropdown option lists, in the order the
    /// referenced records were fetched.
    #[must_use]
    pub fn option_pairs(reference: &ReferenceDef, records: &[Record]) -> Vec<(Value, Value)> {
        records
            .iter()
            .filter_map(|record| {
                let value = record.get(&reference.value_field)?;
                let display = record.get(&reference.display_field)?;
                Some((value.clone(), display.clone()))
            })
            .collect()
    }

    // Strict-equality key: the canonical JSON text of the value. Two
    // values collide iff they are the same JSON value.
    fn key_of(value: &Value) -> String {
        value.to_string()
    }
}
