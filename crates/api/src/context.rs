use geniki_auth::{Capability, Principal, PrincipalId, Role};

/// Principal context for a request (authenticated identity, roles and the
/// capabilities they resolve to).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>, capabilities: Vec<Capability>) -> Self {
        Self {
            principal: Principal::from_roles(principal_id, roles, capabilities),
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal.principal_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.principal.roles
    }
}
