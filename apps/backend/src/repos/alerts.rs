//! Price alert repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::alerts_sea as alerts_adapter;
use crate::domain::alert_matching::AlertCriteria;
use crate::errors::domain::DomainError;
use crate::repos::properties::Property;

/// Price alert domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAlert {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    #[serde(flatten)]
    pub criteria: AlertCriteria,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl PriceAlert {
    pub fn matches(&self, property: &Property) -> bool {
        self.criteria.matches(&property.facts())
    }
}

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<PriceAlert>, DomainError> {
    let alerts = alerts_adapter::list_by_user(conn, user_id).await?;
    Ok(alerts.into_iter().map(PriceAlert::from).collect())
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<PriceAlert>, DomainError> {
    let alert = alerts_adapter::find_owned(conn, id, user_id).await?;
    Ok(alert.map(PriceAlert::from))
}

pub async fn create_alert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    criteria: AlertCriteria,
) -> Result<PriceAlert, DomainError> {
    let alert =
        alerts_adapter::create_alert(conn, alerts_adapter::AlertCreate { user_id, criteria })
            .await?;
    Ok(PriceAlert::from(alert))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
    active: bool,
) -> Result<bool, DomainError> {
    Ok(alerts_adapter::set_active(conn, id, user_id, active).await? > 0)
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, DomainError> {
    Ok(alerts_adapter::delete_owned(conn, id, user_id).await? > 0)
}

impl From<crate::entities::price_alerts::Model> for PriceAlert {
    fn from(m: crate::entities::price_alerts::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            criteria: AlertCriteria {
                property_type: m.property_type,
                city: m.city,
                min_price: m.min_price,
                max_price: m.max_price,
                min_bedrooms: m.min_bedrooms,
                max_bedrooms: m.max_bedrooms,
            },
            active: m.active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
