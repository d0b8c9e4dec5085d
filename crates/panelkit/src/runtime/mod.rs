//! Module: runtime
//! Responsibility: binding a loaded config and its store into component
//! view models and page compositions.
//! Does not own: store/query/aggregate semantics (engine crate) or the
//! config model (schema crate).

pub mod chart;
pub mod factory;
pub mod form;
pub mod metric;
pub mod page;
pub mod table;
pub mod tabs;
pub mod wizard;

pub use factory::ComponentView;

use convert_case::{Case, Casing};
use panelkit_core::{
    error::EngineError, permission::PermissionGate, store::ResourceStore,
};
use panelkit_schema::AppConfig;

///
/// Runtime
///
/// One loaded app: the config and the store seeded from it. Built
/// explicitly and passed by reference — nothing global, nothing lazily
/// initialized behind the caller's back.
///

#[derive(Debug)]
pub struct Runtime {
    config: AppConfig,
    store: ResourceStore,
}

impl Runtime {
    pub fn new(config: AppConfig) -> Result<Self, EngineError> {
        let store = ResourceStore::from_config(&config)?;

        Ok(Self { config, store })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut ResourceStore {
        &mut self.store
    }

    /// Permission gate over this app's config.
    #[must_use]
    pub const fn gate(&self) -> PermissionGate<'_> {
        PermissionGate::new(&self.config)
    }
}

/// Human label for a field name when the config omits one:
/// `department_id` → `Department Id`.
#[must_use]
pub(crate) fn default_label(field: &str) -> String {
    field.to_case(Case::Title)
}

#[cfg(test)]
pub(crate) mod test_fixtures;
