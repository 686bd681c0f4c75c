//! Listing repository functions for domain layer (generic over ConnectionTrait).

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::properties_sea as properties_adapter;
pub use crate::adapters::properties_sea::{AlertFilter, PropertyFields, SearchFilters};
use crate::domain::alert_matching::{AlertCriteria, ListingFacts};
use crate::domain::listing::ValidListing;
use crate::entities::properties::{PropertyStatus, PropertyType, PublicationStatus};
use crate::errors::domain::DomainError;

/// Listing domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub price: i64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_feet: Option<i32>,
    pub administration_fee: Option<i64>,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_id_code: String,
    pub bank_id: String,
    pub featured: bool,
    pub views: i64,
    pub publication_status: PublicationStatus,
    pub is_featured_paid: bool,
    pub featured_until: Option<OffsetDateTime>,
    pub paid_at: Option<OffsetDateTime>,
    pub payment_reference: Option<String>,
    pub featured_payment_reference: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Property {
    pub fn facts(&self) -> ListingFacts<'_> {
        ListingFacts {
            property_type: self.property_type,
            city: &self.city,
            price: self.price,
            bedrooms: self.bedrooms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyImage {
    #[serde(skip)]
    pub id: Uuid,
    pub url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OwnerStats {
    pub total: u64,
    pub published: u64,
    pub pending_payment: u64,
    pub featured: u64,
}

fn all(models: Vec<crate::entities::properties::Model>) -> Vec<Property> {
    models.into_iter().map(Property::from).collect()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Property>, DomainError> {
    Ok(properties_adapter::find_by_id(conn, id)
        .await?
        .map(Property::from))
}

pub async fn find_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Property>, DomainError> {
    Ok(properties_adapter::find_published(conn, id)
        .await?
        .map(Property::from))
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Property>, DomainError> {
    Ok(properties_adapter::find_owned(conn, id, user_id)
        .await?
        .map(Property::from))
}

pub async fn search_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filters: &SearchFilters,
) -> Result<Vec<Property>, DomainError> {
    Ok(all(properties_adapter::search_published(conn, filters).await?))
}

pub async fn featured_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<Property>, DomainError> {
    Ok(all(
        properties_adapter::featured_published(conn, now, limit).await?,
    ))
}

pub async fn newest_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Property>, DomainError> {
    Ok(all(properties_adapter::newest_published(conn, limit).await?))
}

pub async fn autocomplete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    term: &str,
    status: Option<PropertyStatus>,
    limit: u64,
) -> Result<Vec<Property>, DomainError> {
    Ok(all(
        properties_adapter::autocomplete(conn, term, status, limit).await?,
    ))
}

/// Published listings satisfying every criterion of an alert.
pub async fn published_matching<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    criteria: &AlertCriteria,
    limit: u64,
) -> Result<Vec<Property>, DomainError> {
    let filter = AlertFilter {
        property_type: criteria.property_type,
        city: criteria.city.clone(),
        min_price: criteria.min_price,
        max_price: criteria.max_price,
        min_bedrooms: criteria.min_bedrooms,
        max_bedrooms: criteria.max_bedrooms,
    };
    // `city_key` holds the normalization `matches` applies, so the query
    // selects exactly the matching rows.
    let rows = all(properties_adapter::published_matching(conn, &filter, limit).await?);
    Ok(rows
        .into_iter()
        .filter(|p| criteria.matches(&p.facts()))
        .collect())
}

pub async fn list_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: Option<u64>,
) -> Result<Vec<Property>, DomainError> {
    Ok(all(
        properties_adapter::list_by_owner(conn, user_id, limit).await?,
    ))
}

pub async fn owner_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    now: OffsetDateTime,
) -> Result<OwnerStats, DomainError> {
    Ok(OwnerStats {
        total: properties_adapter::count_by_owner(conn, user_id, None).await?,
        published: properties_adapter::count_by_owner(
            conn,
            user_id,
            Some(PublicationStatus::Published),
        )
        .await?,
        pending_payment: properties_adapter::count_by_owner(
            conn,
            user_id,
            Some(PublicationStatus::PendingPayment),
        )
        .await?,
        featured: properties_adapter::count_featured_by_owner(conn, user_id, now).await?,
    })
}

pub async fn code_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<bool, DomainError> {
    Ok(properties_adapter::find_by_code(conn, code).await?.is_some())
}

/// Insert the listing with its images and amenities.
pub async fn create_listing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    property_id_code: String,
    listing: &ValidListing,
) -> Result<Property, DomainError> {
    let model = properties_adapter::create_property(
        conn,
        properties_adapter::PropertyCreate {
            user_id,
            property_id_code,
            fields: PropertyFields::from(listing),
        },
    )
    .await?;
    properties_adapter::replace_images(conn, model.id, &listing.images).await?;
    properties_adapter::replace_amenities(conn, model.id, &listing.amenities).await?;
    Ok(Property::from(model))
}

/// Overwrite owner-editable fields, images and amenities.
pub async fn update_listing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    listing: &ValidListing,
) -> Result<Property, DomainError> {
    let model = properties_adapter::update_fields(conn, id, PropertyFields::from(listing)).await?;
    properties_adapter::replace_images(conn, id, &listing.images).await?;
    properties_adapter::replace_amenities(conn, id, &listing.amenities).await?;
    Ok(Property::from(model))
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, DomainError> {
    Ok(properties_adapter::delete_owned(conn, id, user_id).await? > 0)
}

pub async fn increment_views<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<bool, DomainError> {
    Ok(properties_adapter::increment_views(conn, id).await? > 0)
}

pub async fn set_publication_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    status: PublicationStatus,
) -> Result<bool, DomainError> {
    Ok(properties_adapter::set_publication_status(conn, id, status).await? > 0)
}

pub async fn mark_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    now: OffsetDateTime,
    reference: &str,
) -> Result<bool, DomainError> {
    Ok(properties_adapter::mark_published(conn, id, now, reference).await? > 0)
}

pub async fn mark_featured<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    now: OffsetDateTime,
    until: OffsetDateTime,
    reference: &str,
) -> Result<bool, DomainError> {
    Ok(properties_adapter::mark_featured(conn, id, now, until, reference).await? > 0)
}

pub async fn images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_id: Uuid,
) -> Result<Vec<PropertyImage>, DomainError> {
    let rows = properties_adapter::images_for(conn, property_id).await?;
    Ok(rows
        .into_iter()
        .map(|r| PropertyImage {
            id: r.id,
            url: r.image_url,
            is_primary: r.is_primary,
        })
        .collect())
}

/// Primary image URL per listing.
pub async fn primary_images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, DomainError> {
    let rows = properties_adapter::primary_images_for(conn, property_ids).await?;
    let mut out = HashMap::with_capacity(rows.len());
    for row in rows {
        out.entry(row.property_id).or_insert(row.image_url);
    }
    Ok(out)
}

pub async fn amenities<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_id: Uuid,
) -> Result<Vec<String>, DomainError> {
    let rows = properties_adapter::amenities_for(conn, property_id).await?;
    Ok(rows.into_iter().map(|r| r.amenity).collect())
}

impl From<crate::entities::properties::Model> for Property {
    fn from(m: crate::entities::properties::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            description: m.description,
            property_type: m.property_type,
            status: m.status,
            price: m.price,
            bedrooms: m.bedrooms,
            bathrooms: m.bathrooms,
            square_feet: m.square_feet,
            administration_fee: m.administration_fee,
            address: m.address,
            city: m.city,
            state: m.state,
            country: m.country,
            zip_code: m.zip_code,
            latitude: m.latitude,
            longitude: m.longitude,
            property_id_code: m.property_id_code,
            bank_id: m.bank_id,
            featured: m.featured,
            views: m.views,
            publication_status: m.publication_status,
            is_featured_paid: m.is_featured_paid,
            featured_until: m.featured_until,
            paid_at: m.paid_at,
            payment_reference: m.payment_reference,
            featured_payment_reference: m.featured_payment_reference,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
