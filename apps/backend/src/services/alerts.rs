use sea_orm::ConnectionTrait;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::domain::alert_matching::AlertCriteria;
use crate::entities::properties::PropertyType;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::alerts::{self, PriceAlert};
use crate::repos::properties;
use crate::services::properties::{cards, ListingCard};

pub const MAX_MATCHES: u64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct AlertRequest {
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
}

impl From<AlertRequest> for AlertCriteria {
    fn from(r: AlertRequest) -> Self {
        Self {
            property_type: r.property_type,
            city: r.city,
            min_price: r.min_price,
            max_price: r.max_price,
            min_bedrooms: r.min_bedrooms,
            max_bedrooms: r.max_bedrooms,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AlertToggle {
    pub active: bool,
}

fn not_found() -> AppError {
    AppError::not_found(ErrorCode::AlertNotFound, "Alert not found")
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<PriceAlert>, AppError> {
    Ok(alerts::list_by_user(conn, user_id).await?)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    req: AlertRequest,
) -> Result<PriceAlert, AppError> {
    let criteria = AlertCriteria::from(req).normalized()?;
    let alert = alerts::create_alert(conn, user_id, criteria).await?;
    info!(user_id = %user_id, alert_id = %alert.id, "Price alert created");
    Ok(alert)
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
    active: bool,
) -> Result<PriceAlert, AppError> {
    if !alerts::set_active(conn, id, user_id, active).await? {
        return Err(not_found());
    }
    alerts::find_owned(conn, id, user_id)
        .await?
        .ok_or_else(not_found)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    if !alerts::delete_owned(conn, id, user_id).await? {
        return Err(not_found());
    }
    info!(user_id = %user_id, alert_id = %id, "Price alert deleted");
    Ok(())
}

/// Published listings the alert would notify about, newest first.
pub async fn matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<Vec<ListingCard>, AppError> {
    let alert = alerts::find_owned(conn, id, user_id)
        .await?
        .ok_or_else(not_found)?;
    let found = properties::published_matching(conn, &alert.criteria, MAX_MATCHES).await?;
    cards(conn, found, OffsetDateTime::now_utc()).await
}
