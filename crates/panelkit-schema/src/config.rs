use crate::{page::PageDef, resource::ResourceDef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// AppConfig
///
/// Root descriptor for one generated app. Absent sections default to
/// empty so a missing or partial document still renders an empty shell
/// instead of failing.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppInfo,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceDef>,
    #[serde(default)]
    pub pages: Vec<PageDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl AppConfig {
    /// Look up a resource definition by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&ResourceDef> {
        self.resources.get(name)
    }

    /// Look up a page by its routing path.
    #[must_use]
    pub fn page_by_path(&self, path: &str) -> Option<&PageDef> {
        self.pages.iter().find(|page| page.path == path)
    }

    /// Look up a user record by id within the auth block.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&AuthUser> {
        self.auth.users.iter().find(|user| user.id == id)
    }
}

///
/// AppInfo
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

///
/// Auth
///
/// Role and user declarations. The runtime never authenticates; this
/// block is data for the permission gate and page router.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Auth {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub users: Vec<AuthUser>,
}

///
/// AuthUser
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

///
/// Settings
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub enable_auth: bool,
    #[serde(default)]
    pub enable_logging: bool,
    #[serde(default)]
    pub persistence_mode: PersistenceMode,
}

///
/// PersistenceMode
///
/// Only `Memory` is implemented by the in-process store; the other
/// modes are accepted in the model for forward compatibility with
/// server-backed stores.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PersistenceMode {
    #[default]
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "localStorage")]
    LocalStorage,
    #[serde(rename = "file")]
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_parses_to_default_shell() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();

        assert!(config.resources.is_empty());
        assert!(config.pages.is_empty());
        assert!(config.auth.roles.is_empty());
        assert!(config.auth.users.is_empty());
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let config: AppConfig = serde_json::from_str(
            r#"{"app": {"name": "Tool", "version": "1.0.0"}, "functions": {"f": "..."}}"#,
        )
        .unwrap();

        assert_eq!(config.app.name, "Tool");
    }

    #[test]
    fn persistence_mode_accepts_local_storage_spelling() {
        let settings: Settings =
            serde_json::from_str(r#"{"persistenceMode": "localStorage"}"#).unwrap();

        assert_eq!(settings.persistence_mode, PersistenceMode::LocalStorage);
    }
}
