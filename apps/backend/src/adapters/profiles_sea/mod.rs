//! SeaORM adapter for profiles.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::profiles;

pub mod dto;

pub use dto::{ProfileContactUpdate, ProfileCreate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<profiles::Model>, sea_orm::DbErr> {
    profiles::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[Uuid],
) -> Result<Vec<profiles::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    profiles::Entity::find()
        .filter(profiles::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
}

pub async fn create_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProfileCreate,
) -> Result<profiles::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    profiles::ActiveModel {
        id: Set(dto.id),
        email: Set(dto.email),
        full_name: Set(dto.full_name),
        phone: Set(None),
        avatar_url: Set(None),
        role: Set(dto.role),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn update_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    email: &str,
) -> Result<profiles::Model, sea_orm::DbErr> {
    profiles::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        updated_at: Set(time::OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .update(conn)
    .await
}

pub async fn update_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    dto: ProfileContactUpdate,
) -> Result<profiles::Model, sea_orm::DbErr> {
    let mut active = profiles::ActiveModel {
        id: Set(id),
        updated_at: Set(time::OffsetDateTime::now_utc()),
        ..Default::default()
    };
    if let Some(full_name) = dto.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(phone) = dto.phone {
        active.phone = Set(phone);
    }
    active.update(conn).await
}

pub async fn set_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    role: profiles::UserRole,
) -> Result<u64, sea_orm::DbErr> {
    let result = profiles::Entity::update_many()
        .col_expr(profiles::Column::Role, Expr::value(role))
        .col_expr(
            profiles::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(profiles::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
