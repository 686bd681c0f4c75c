//! DTOs for profiles_sea adapter.

use uuid::Uuid;

use crate::entities::profiles::UserRole;

#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
}

impl ProfileCreate {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: None,
            role: UserRole::User,
        }
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Contact fields; three-state: None = no change, Some(None) = clear.
#[derive(Debug, Clone, Default)]
pub struct ProfileContactUpdate {
    pub full_name: Option<Option<String>>,
    pub phone: Option<Option<String>>,
}
