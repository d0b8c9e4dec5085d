//! PanelKit: a schema-first runtime for configuration-driven admin
//! panels.
//!
//! A declarative JSON app config — resources, pages, zones, component
//! descriptors — is interpreted into typed view models: CRUD tables,
//! forms, wizards, metrics, and chart series, with filtering, sorting,
//! pagination, aggregation, and role-based permission checks handled by
//! the engine. The crate is headless; a UI shell renders the view models
//! however it likes.
//!
//! ```text
//! AppConfig ── Runtime ── PageRouter ── ComponentFactory ── view models
//!                  │                                            │
//!                  └── ResourceStore (CRUD + aggregate) ◄───────┘
//! ```

pub mod runtime;

pub use panelkit_core as engine;
pub use panelkit_schema as schema;

///
/// Prelude
///

pub mod prelude {
    pub use crate::runtime::{
        ComponentView, Runtime,
        chart::ChartView,
        factory::build_component,
        form::SimpleForm,
        metric::MetricView,
        page::{PageOutcome, PageView, ZoneView, resolve_page, sidebar_entries},
        table::{DataTable, TableState, TableView},
        tabs::TabsPanel,
        wizard::WizardForm,
    };
    pub use panelkit_core::prelude::*;
    pub use panelkit_schema::{AppConfig, ComponentDescriptor};
}
