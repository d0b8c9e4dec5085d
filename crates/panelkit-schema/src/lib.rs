//! Declarative app-config model for PanelKit.
//!
//! An [`AppConfig`] is the single JSON document that drives a generated
//! admin panel: named resources (fields, permissions, seed data), pages
//! composed of zones and typed component descriptors, and the auth block
//! consumed by the permission gate. This crate owns parsing, defaults,
//! and load-time validation; it has no runtime behavior.

pub mod component;
pub mod config;
pub mod load;
pub mod page;
pub mod resource;

pub use component::{
    ChartProps, ChartType, ColumnDef, ComponentDescriptor, DataTableProps, FilterControl,
    FilterControlKind, FormFieldDef, MetricAggregate, MetricCardProps, SimpleFormProps,
    SubmitAction, TabDef, TabsLayout, TabsProps, Transform, ValidationRule, WizardFormProps,
    WizardStep,
};
pub use config::{AppConfig, AppInfo, Auth, AuthUser, PersistenceMode, Settings};
pub use load::{ConfigError, ConfigIssue, load_from_path, load_from_str, load_or_default, validate};
pub use page::{LayoutType, PageDef, PageZone};
pub use resource::{CrudAction, FieldDef, FieldType, ReferenceDef, ResourceDef, SelectOption};

/// Filter shape shared by component props and list queries: a map of
/// field name to the exact value a matching record must carry.
pub type FilterSpec = std::collections::BTreeMap<String, serde_json::Value>;
