use crate::component::ComponentDescriptor;
use serde::{Deserialize, Serialize};

///
/// PageDef
///
/// One routed screen: sidebar metadata, an optional role allow-list, and
/// an ordered list of zones holding component descriptors.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDef {
    pub id: String,
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub show_in_sidebar: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_access: Option<Vec<String>>,
    #[serde(default)]
    pub layout_type: LayoutType,
    #[serde(default)]
    pub zones: Vec<PageZone>,
}

impl PageDef {
    /// Whether the given role may open this page. Pages without a
    /// `roleAccess` list are open to everyone.
    #[must_use]
    pub fn allows_role(&self, role: &str) -> bool {
        self.role_access
            .as_ref()
            .is_none_or(|roles| roles.iter().any(|allowed| allowed == role))
    }
}

///
/// LayoutType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    Default,
    Tabs,
    Grid,
}

///
/// PageZone
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PageZone {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}
