use panelkit_schema::AppConfig;

/// Wildcard entry granting every action to a role.
pub const WILDCARD: &str = "*";

///
/// PermissionGate
///
/// Role → action matrix lookup over the loaded config. Fail-closed:
/// an unknown role, an unknown resource, or a missing permission list
/// all answer `false`.
///

#[derive(Clone, Copy, Debug)]
pub struct PermissionGate<'a> {
    config: &'a AppConfig,
}

impl<'a> PermissionGate<'a> {
    #[must_use]
    pub const fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Whether `role` may perform `action` on `resource`.
    #[must_use]
    pub fn can_perform(&self, role: &str, resource: &str, action: &str) -> bool {
        let Some(resource) = self.config.resources.get(resource) else {
            return false;
        };
        let Some(allowed) = resource.permissions.get(role) else {
            return false;
        };

        allowed
            .iter()
            .any(|entry| entry == action || entry == WILDCARD)
    }
}
