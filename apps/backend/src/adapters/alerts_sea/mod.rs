//! SeaORM adapter for price alerts.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::price_alerts;

pub mod dto;

pub use dto::AlertCreate;

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<price_alerts::Model>, sea_orm::DbErr> {
    price_alerts::Entity::find()
        .filter(price_alerts::Column::UserId.eq(user_id))
        .order_by_desc(price_alerts::Column::CreatedAt)
        .order_by_desc(price_alerts::Column::Id)
        .all(conn)
        .await
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<price_alerts::Model>, sea_orm::DbErr> {
    price_alerts::Entity::find_by_id(id)
        .filter(price_alerts::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn create_alert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AlertCreate,
) -> Result<price_alerts::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let c = dto.criteria;
    price_alerts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(dto.user_id),
        property_type: Set(c.property_type),
        city: Set(c.city),
        min_price: Set(c.min_price),
        max_price: Set(c.max_price),
        min_bedrooms: Set(c.min_bedrooms),
        max_bedrooms: Set(c.max_bedrooms),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
    active: bool,
) -> Result<u64, sea_orm::DbErr> {
    let result = price_alerts::Entity::update_many()
        .col_expr(price_alerts::Column::Active, Expr::value(active))
        .col_expr(
            price_alerts::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(price_alerts::Column::Id.eq(id))
        .filter(price_alerts::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = price_alerts::Entity::delete_many()
        .filter(price_alerts::Column::Id.eq(id))
        .filter(price_alerts::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
