use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granting full management rights (delete, view details of any image).
pub const ADMIN_ROLE: &str = "admin";

/// Request-scoped identity supplied by the identity provider.
///
/// Handlers receive this through request extensions and pass it explicitly
/// into each service call; no global session state is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn new(id: Uuid, roles: Vec<String>) -> Self {
        Self { id, roles }
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}
