//! Profile repository functions for domain layer (generic over ConnectionTrait).

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::profiles_sea as profiles_adapter;
pub use crate::adapters::profiles_sea::{ProfileContactUpdate, ProfileCreate};
use crate::entities::profiles::UserRole;
use crate::errors::domain::DomainError;

/// Profile domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Profile>, DomainError> {
    let profile = profiles_adapter::find_by_id(conn, id).await?;
    Ok(profile.map(Profile::from))
}

pub async fn create_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProfileCreate,
) -> Result<Profile, DomainError> {
    let profile = profiles_adapter::create_profile(conn, dto).await?;
    Ok(Profile::from(profile))
}

pub async fn update_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    email: &str,
) -> Result<Profile, DomainError> {
    let profile = profiles_adapter::update_email(conn, id, email).await?;
    Ok(Profile::from(profile))
}

pub async fn update_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    dto: ProfileContactUpdate,
) -> Result<Profile, DomainError> {
    let profile = profiles_adapter::update_contact(conn, id, dto).await?;
    Ok(Profile::from(profile))
}

pub async fn set_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    role: UserRole,
) -> Result<bool, DomainError> {
    Ok(profiles_adapter::set_role(conn, id, role).await? > 0)
}

/// Display names keyed by profile id; profiles without a name are absent.
pub async fn names_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, DomainError> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    let profiles = profiles_adapter::find_by_ids(conn, &unique).await?;
    Ok(profiles
        .into_iter()
        .filter_map(|p| p.full_name.map(|name| (p.id, name)))
        .collect())
}

impl From<crate::entities::profiles::Model> for Profile {
    fn from(model: crate::entities::profiles::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            phone: model.phone,
            avatar_url: model.avatar_url,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
