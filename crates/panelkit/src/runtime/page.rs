//! Module: runtime::page
//! Responsibility: path → page resolution, role access outcomes, zone
//! composition, and the sidebar model.
//! Does not own: component building (factory) or config parsing.

use crate::runtime::{Runtime, factory::{self, ComponentView}};
use panelkit_schema::{AppConfig, LayoutType, PageDef};

///
/// PageOutcome
///

#[derive(Debug)]
pub enum PageOutcome<'a> {
    /// No page matches the path.
    NotFound,
    /// A page matched but the session role is outside its allow-list.
    AccessDenied,
    Allowed(&'a PageDef),
}

/// Resolve a path against the config's pages. Role checks only apply
/// when a session role is present; anonymous resolution sees every page.
#[must_use]
pub fn resolve_page<'a>(
    config: &'a AppConfig,
    path: &str,
    role: Option<&str>,
) -> PageOutcome<'a> {
    let Some(page) = config.page_by_path(path) else {
        return PageOutcome::NotFound;
    };

    if let Some(role) = role
        && !page.allows_role(role)
    {
        return PageOutcome::AccessDenied;
    }

    PageOutcome::Allowed(page)
}

/// Sidebar entries for a session: visible pages the role may open,
/// ordered by `sidebarOrder` (missing orders sort first, as zero).
#[must_use]
pub fn sidebar_entries<'a>(config: &'a AppConfig, role: Option<&str>) -> Vec<&'a PageDef> {
    let mut entries: Vec<&PageDef> = config
        .pages
        .iter()
        .filter(|page| page.show_in_sidebar)
        .filter(|page| role.is_none_or(|role| page.allows_role(role)))
        .collect();

    entries.sort_by_key(|page| page.sidebar_order.unwrap_or(0));
    entries
}

///
/// PageView
///

#[derive(Debug)]
pub struct PageView {
    pub id: String,
    pub title: String,
    pub layout: LayoutType,
    pub zones: Vec<ZoneView>,
}

///
/// ZoneView
///

#[derive(Debug)]
pub struct ZoneView {
    pub name: String,
    pub components: Vec<ComponentView>,
    /// Column count at the widest responsive breakpoint.
    pub grid_columns: usize,
}

/// Compose a resolved page: every zone's descriptors built in order.
#[must_use]
pub fn build_page(runtime: &Runtime, role: Option<&str>, page: &PageDef) -> PageView {
    let zones = page
        .zones
        .iter()
        .map(|zone| ZoneView {
            name: zone.name.clone(),
            components: zone
                .components
                .iter()
                .map(|descriptor| factory::build_component(runtime, role, descriptor))
                .collect(),
            grid_columns: grid_columns(zone.components.len()),
        })
        .collect();

    PageView {
        id: page.id.clone(),
        title: page.title.clone(),
        layout: page.layout_type,
        zones,
    }
}

/// Responsive column count for a zone by component count: one to four
/// components get that many columns, larger zones cap at four.
#[must_use]
pub const fn grid_columns(component_count: usize) -> usize {
    match component_count {
        0 | 1 => 1,
        2 => 2,
        3 => 3,
        _ => 4,
    }
}
