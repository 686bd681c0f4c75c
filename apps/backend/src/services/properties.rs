//! Listing search, detail and the owner dashboard.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::banks::{find_bank, Bank};
use crate::domain::featured::is_featured_active;
use crate::domain::listing::ListingDraft;
use crate::domain::money::format_cop;
use crate::domain::property_code::generate_property_code;
use crate::domain::publication::{badge, can_transition, Badge};
use crate::domain::search::normalize_query;
use crate::entities::properties::{PropertyStatus, PropertyType, PublicationStatus};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::profiles::Profile;
use crate::repos::properties::{self, Property, PropertyImage, SearchFilters};

pub const DEFAULT_SEARCH_LIMIT: u64 = 60;
pub const MAX_SEARCH_LIMIT: u64 = 100;
pub const MAX_SEARCH_OFFSET: u64 = 10_000;
pub const FEATURED_LIMIT: u64 = 12;
pub const AUTOCOMPLETE_LIMIT: u64 = 5;
const AUTOCOMPLETE_MIN_CHARS: usize = 2;
const DASHBOARD_RECENT: u64 = 3;
const CODE_ATTEMPTS: usize = 5;

/// Query string of `GET /api/properties`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub status: Option<PropertyStatus>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_sqft: Option<i32>,
    pub max_sqft: Option<i32>,
    pub min_admin: Option<i64>,
    pub max_admin: Option<i64>,
    /// Comma separated
    pub amenities: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SearchParams {
    pub fn into_filters(self) -> Result<SearchFilters, AppError> {
        let offset = self.offset.unwrap_or(0);
        if offset > MAX_SEARCH_OFFSET {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                format!("offset must be at most {MAX_SEARCH_OFFSET}"),
            ));
        }
        let amenities = self
            .amenities
            .as_deref()
            .map(|raw| raw.split(',').filter_map(normalize_query).collect())
            .unwrap_or_default();

        Ok(SearchFilters {
            query: self.q.as_deref().and_then(normalize_query),
            status: self.status,
            property_type: self.property_type,
            city: self.city.as_deref().and_then(normalize_query),
            min_price: self.min_price,
            max_price: self.max_price,
            min_bedrooms: self.bedrooms,
            min_bathrooms: self.bathrooms,
            min_sqft: self.min_sqft,
            max_sqft: self.max_sqft,
            min_admin: self.min_admin,
            max_admin: self.max_admin,
            amenities,
            limit: self
                .limit
                .unwrap_or(DEFAULT_SEARCH_LIMIT)
                .clamp(1, MAX_SEARCH_LIMIT),
            offset,
        })
    }
}

/// A listing as shown in grids and carousels.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCard {
    pub id: Uuid,
    pub property_id_code: String,
    pub title: String,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub price: i64,
    pub price_display: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_feet: Option<i32>,
    pub administration_fee: Option<i64>,
    pub address: String,
    pub city: String,
    pub featured: bool,
    pub image_url: Option<String>,
    pub owner_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ListingCard {
    fn new(
        p: &Property,
        now: OffsetDateTime,
        image_url: Option<String>,
        owner_name: Option<String>,
    ) -> Self {
        Self {
            id: p.id,
            property_id_code: p.property_id_code.clone(),
            title: p.title.clone(),
            property_type: p.property_type,
            status: p.status,
            price: p.price,
            price_display: format_cop(p.price),
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            square_feet: p.square_feet,
            administration_fee: p.administration_fee,
            address: p.address.clone(),
            city: p.city.clone(),
            featured: featured_active(p, now),
            image_url,
            owner_name,
            created_at: p.created_at,
        }
    }
}

/// Full listing page.
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub card: ListingCard,
    pub description: Option<String>,
    pub state: Option<String>,
    pub country: String,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub views: i64,
    pub bank: Option<Bank>,
    pub images: Vec<PropertyImage>,
    pub amenities: Vec<String>,
}

/// Dashboard row: the card plus what only the owner sees.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerListing {
    #[serde(flatten)]
    pub card: ListingCard,
    pub publication_status: PublicationStatus,
    pub badge: Badge,
    pub views: i64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub featured_until: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub paid_at: Option<OffsetDateTime>,
}

impl OwnerListing {
    fn new(p: &Property, now: OffsetDateTime, image_url: Option<String>) -> Self {
        Self {
            card: ListingCard::new(p, now, image_url, None),
            publication_status: p.publication_status,
            badge: badge(p.publication_status),
            views: p.views,
            featured_until: p.featured_until,
            paid_at: p.paid_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerListingDetail {
    #[serde(flatten)]
    pub listing: OwnerListing,
    pub description: Option<String>,
    pub state: Option<String>,
    pub country: String,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bank_id: String,
    pub images: Vec<PropertyImage>,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub title: String,
    pub address: String,
    pub city: String,
    pub price: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_properties: u64,
    pub published_properties: u64,
    pub pending_payment: u64,
    pub featured_properties: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub profile: Profile,
    pub stats: DashboardStats,
    pub recent_properties: Vec<OwnerListing>,
}

fn featured_active(p: &Property, now: OffsetDateTime) -> bool {
    is_featured_active(p.is_featured_paid, p.featured_until, now)
}

fn not_found() -> AppError {
    AppError::not_found(ErrorCode::PropertyNotFound, "Property not found")
}

/// Cards with primary image and owner name, loaded in two batch queries.
pub async fn cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    listings: Vec<Property>,
    now: OffsetDateTime,
) -> Result<Vec<ListingCard>, AppError> {
    if listings.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = listings.iter().map(|p| p.id).collect();
    let owners: Vec<Uuid> = listings.iter().map(|p| p.user_id).collect();
    let mut images = properties::primary_images(conn, &ids).await?;
    let names = crate::repos::profiles::names_by_ids(conn, &owners).await?;

    Ok(listings
        .iter()
        .map(|p| ListingCard::new(p, now, images.remove(&p.id), names.get(&p.user_id).cloned()))
        .collect())
}

pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    params: SearchParams,
) -> Result<Vec<ListingCard>, AppError> {
    let filters = params.into_filters()?;
    let found = properties::search_published(conn, &filters).await?;
    cards(conn, found, OffsetDateTime::now_utc()).await
}

/// Active paid features, or the newest listings when nothing is featured.
pub async fn featured<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ListingCard>, AppError> {
    let now = OffsetDateTime::now_utc();
    let mut found = properties::featured_published(conn, now, FEATURED_LIMIT).await?;
    if found.is_empty() {
        found = properties::newest_published(conn, FEATURED_LIMIT).await?;
    }
    cards(conn, found, now).await
}

pub async fn autocomplete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    q: Option<&str>,
    status: Option<PropertyStatus>,
) -> Result<Vec<Suggestion>, AppError> {
    let Some(term) = q.and_then(normalize_query) else {
        return Ok(Vec::new());
    };
    if term.chars().count() < AUTOCOMPLETE_MIN_CHARS {
        return Ok(Vec::new());
    }

    let found = properties::autocomplete(conn, &term, status, AUTOCOMPLETE_LIMIT).await?;
    let ids: Vec<Uuid> = found.iter().map(|p| p.id).collect();
    let mut images = properties::primary_images(conn, &ids).await?;
    Ok(found
        .into_iter()
        .map(|p| Suggestion {
            image_url: images.remove(&p.id),
            id: p.id,
            title: p.title,
            address: p.address,
            city: p.city,
            price: p.price,
        })
        .collect())
}

/// Public listing page; counts the view.
pub async fn detail<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<ListingDetail, AppError> {
    let mut listing = properties::find_published(conn, id)
        .await?
        .ok_or_else(not_found)?;
    if properties::increment_views(conn, id).await? {
        listing.views += 1;
    }

    let now = OffsetDateTime::now_utc();
    let images = properties::images(conn, id).await?;
    let amenities = properties::amenities(conn, id).await?;
    let owner_name = crate::repos::profiles::names_by_ids(conn, &[listing.user_id])
        .await?
        .remove(&listing.user_id);
    let image_url = primary_url(&images);

    Ok(ListingDetail {
        card: ListingCard::new(&listing, now, image_url, owner_name),
        bank: find_bank(&listing.bank_id).copied(),
        description: listing.description,
        state: listing.state,
        country: listing.country,
        zip_code: listing.zip_code,
        latitude: listing.latitude,
        longitude: listing.longitude,
        views: listing.views,
        images,
        amenities,
    })
}

fn primary_url(images: &[PropertyImage]) -> Option<String> {
    images
        .iter()
        .find(|i| i.is_primary)
        .or_else(|| images.first())
        .map(|i| i.url.clone())
}

async fn owner_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    listings: Vec<Property>,
    now: OffsetDateTime,
) -> Result<Vec<OwnerListing>, AppError> {
    let ids: Vec<Uuid> = listings.iter().map(|p| p.id).collect();
    let mut images: HashMap<Uuid, String> = if ids.is_empty() {
        HashMap::new()
    } else {
        properties::primary_images(conn, &ids).await?
    };
    Ok(listings
        .iter()
        .map(|p| OwnerListing::new(p, now, images.remove(&p.id)))
        .collect())
}

pub async fn list_mine<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<OwnerListing>, AppError> {
    let listings = properties::list_by_owner(conn, user_id, None).await?;
    owner_rows(conn, listings, OffsetDateTime::now_utc()).await
}

async fn owner_detail<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    listing: Property,
) -> Result<OwnerListingDetail, AppError> {
    let images = properties::images(conn, listing.id).await?;
    let amenities = properties::amenities(conn, listing.id).await?;
    let row = OwnerListing::new(&listing, OffsetDateTime::now_utc(), primary_url(&images));
    Ok(OwnerListingDetail {
        listing: row,
        description: listing.description,
        state: listing.state,
        country: listing.country,
        zip_code: listing.zip_code,
        latitude: listing.latitude,
        longitude: listing.longitude,
        bank_id: listing.bank_id,
        images,
        amenities,
    })
}

pub async fn get_mine<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<OwnerListingDetail, AppError> {
    let listing = properties::find_owned(conn, id, user_id)
        .await?
        .ok_or_else(not_found)?;
    owner_detail(conn, listing).await
}

// Checked before insert: a unique violation would abort a Postgres transaction.
async fn unique_property_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<String, AppError> {
    for _ in 0..CODE_ATTEMPTS {
        let code = generate_property_code();
        if !properties::code_exists(conn, &code).await? {
            return Ok(code);
        }
        warn!(code = %code, "Property code collision; retrying");
    }
    Err(DomainError::conflict(
        ConflictKind::PropertyCode,
        "Could not allocate a unique property code",
    )
    .into())
}

/// New listing waiting for its publication payment.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    draft: ListingDraft,
) -> Result<OwnerListingDetail, AppError> {
    let valid = draft.validate()?;
    let code = unique_property_code(conn).await?;
    let listing = properties::create_listing(conn, user_id, code, &valid).await?;
    info!(
        user_id = %user_id,
        property_id = %listing.id,
        property_code = %listing.property_id_code,
        "Listing created"
    );
    owner_detail(conn, listing).await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
    draft: ListingDraft,
) -> Result<OwnerListingDetail, AppError> {
    let valid = draft.validate()?;
    properties::find_owned(conn, id, user_id)
        .await?
        .ok_or_else(not_found)?;
    let listing = properties::update_listing(conn, id, &valid).await?;
    info!(user_id = %user_id, property_id = %id, "Listing updated");
    owner_detail(conn, listing).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    if !properties::delete_owned(conn, id, user_id).await? {
        return Err(not_found());
    }
    info!(user_id = %user_id, property_id = %id, "Listing deleted");
    Ok(())
}

pub async fn dashboard<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    profile: Profile,
) -> Result<Dashboard, AppError> {
    let now = OffsetDateTime::now_utc();
    let stats = properties::owner_stats(conn, profile.id, now).await?;
    let recent = properties::list_by_owner(conn, profile.id, Some(DASHBOARD_RECENT)).await?;
    Ok(Dashboard {
        stats: DashboardStats {
            total_properties: stats.total,
            published_properties: stats.published,
            pending_payment: stats.pending_payment,
            featured_properties: stats.featured,
        },
        recent_properties: owner_rows(conn, recent, now).await?,
        profile,
    })
}

/// Admin moderation along the publication transition table.
pub async fn moderate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    admin: &Profile,
    id: Uuid,
    target: PublicationStatus,
) -> Result<OwnerListingDetail, AppError> {
    if !admin.is_admin() {
        security::forbidden_role(&admin.id.to_string(), "admin");
        return Err(AppError::forbidden(
            ErrorCode::InsufficientRole,
            "Administrator role required",
        ));
    }
    let listing = properties::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)?;
    let from = listing.publication_status;
    if from != target && !can_transition(from, target) {
        return Err(DomainError::conflict(
            ConflictKind::PublicationTransition,
            format!(
                "Cannot move a listing from {} to {}",
                from.as_str(),
                target.as_str()
            ),
        )
        .into());
    }
    if from != target {
        properties::set_publication_status(conn, id, target).await?;
        info!(
            admin_id = %admin.id,
            property_id = %id,
            from = from.as_str(),
            to = target.as_str(),
            "Publication status moderated"
        );
    }
    let listing = properties::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)?;
    owner_detail(conn, listing).await
}
