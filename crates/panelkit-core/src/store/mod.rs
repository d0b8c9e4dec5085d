//! Module: store
//! Responsibility: the in-memory CRUD + aggregate engine over named
//! record collections.
//! Does not own: query semantics (`query`), reductions (`aggregate`),
//! or the config model it is constructed from.
//!
//! The store is an explicit object constructed from an [`AppConfig`] and
//! passed by reference wherever it is needed. There is no process-global
//! registry and no first-call-wins initialization; two stores built from
//! two configs coexist without touching each other.

use crate::{
    aggregate::{self, AggregateSpec},
    error::EngineError,
    query::{self, ListParams, ListResult},
    record::{self, Record},
    validate::check_record_types,
};
use derive_more::{Deref, DerefMut};
use panelkit_schema::AppConfig;
use serde_json::Value;
use std::collections::BTreeMap;


///
/// ResourceBackend
///
/// The five CRUD operations plus `aggregate` — the only surface the
/// component runtime consumes. The in-memory store below is the
/// reference implementation; a server-backed store honoring the same
/// semantics is a drop-in replacement.
///

pub trait ResourceBackend {
    fn get_list(&self, resource: &str, params: &ListParams) -> Result<ListResult, EngineError>;
    fn get_one(&self, resource: &str, id: &str) -> Result<Record, EngineError>;
    fn create(&mut self, resource: &str, data: Record) -> Result<Record, EngineError>;
    fn update(&mut self, resource: &str, id: &str, data: &Record) -> Result<Record, EngineError>;
    fn delete(&mut self, resource: &str, id: &str) -> Result<Record, EngineError>;
    fn aggregate(&self, resource: &str, spec: &AggregateSpec) -> Result<f64, EngineError>;
}

///
/// CollectionRegistry
///

#[derive(Debug, Default, Deref, DerefMut)]
pub struct CollectionRegistry(BTreeMap<String, Vec<Record>>);

///
/// ResourceStore
///
/// Collections live in insertion order; every read hands out clones so
/// callers never hold references into the store's own rows.
///

#[derive(Debug, Default)]
pub struct ResourceStore {
    collections: CollectionRegistry,
    schema: BTreeMap<String, panelkit_schema::ResourceDef>,
}

impl ResourceStore {
    /// Build a store seeded from the config's resource data. Seed rows
    /// are type-checked against their resource's declared fields; a
    /// non-object seed entry is rejected outright.
    pub fn from_config(config: &AppConfig) -> Result<Self, EngineError> {
        let mut collections = CollectionRegistry::default();

        for (name, resource) in &config.resources {
            let mut rows = Vec::with_capacity(resource.data.len());

            for value in &resource.data {
                let Some(row) = record::as_record(value) else {
                    return Err(EngineError::store_internal(format!(
                        "seed entry for resource '{name}' is not an object"
                    )));
                };
                check_record_types(name, resource, row)?;
                rows.push(row.clone());
            }

            collections.insert(name.clone(), rows);
        }

        Ok(Self {
            collections,
            schema: config.resources.clone(),
        })
    }

    /// Collection names, in declaration order.
    #[must_use]
    pub fn resource_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    fn rows(&self, resource: &str) -> Result<&Vec<Record>, EngineError> {
        self.collections
            .get(resource)
            .ok_or_else(|| EngineError::resource_not_found(resource))
    }

    fn rows_mut(&mut self, resource: &str) -> Result<&mut Vec<Record>, EngineError> {
        self.collections
            .get_mut(resource)
            .ok_or_else(|| EngineError::resource_not_found(resource))
    }

    fn check_types(&self, resource: &str, row: &Record) -> Result<(), EngineError> {
        if let Some(def) = self.schema.get(resource) {
            check_record_types(resource, def, row)?;
        }

        Ok(())
    }
}

impl ResourceBackend for ResourceStore {
    fn get_list(&self, resource: &str, params: &ListParams) -> Result<ListResult, EngineError> {
        Ok(query::apply(self.rows(resource)?, params))
    }

    fn get_one(&self, resource: &str, id: &str) -> Result<Record, EngineError> {
        self.rows(resource)?
            .iter()
            .find(|row| record::id_matches(row, id))
            .cloned()
            .ok_or_else(|| EngineError::record_not_found(resource, id))
    }

    fn create(&mut self, resource: &str, data: Record) -> Result<Record, EngineError> {
        self.check_types(resource, &data)?;

        let mut row = data;
        if record::record_id(&row).is_none_or(str::is_empty) {
            row.insert("id".to_string(), Value::String(record::synthesize_id()));
        }

        self.rows_mut(resource)?.push(row.clone());

        Ok(row)
    }

    fn update(&mut self, resource: &str, id: &str, data: &Record) -> Result<Record, EngineError> {
        self.check_types(resource, data)?;

        let rows = self.rows_mut(resource)?;
        let row = rows
            .iter_mut()
            .find(|row| record::id_matches(row, id))
            .ok_or_else(|| EngineError::record_not_found(resource, id))?;

        record::merge_into(row, data);

        Ok(row.clone())
    }

    fn delete(&mut self, resource: &str, id: &str) -> Result<Record, EngineError> {
        let rows = self.rows_mut(resource)?;
        let index = rows
            .iter()
            .position(|row| record::id_matches(row, id))
            .ok_or_else(|| EngineError::record_not_found(resource, id))?;

        Ok(rows.remove(index))
    }

    fn aggregate(&self, resource: &str, spec: &AggregateSpec) -> Result<f64, EngineError> {
        Ok(aggregate::run(self.rows(resource)?, spec))
    }
}
