//! Seed data through the same services the routes use.

use backend_test_support::unique_helpers::unique_email;
use habitat_backend::auth::claims::BackendClaims;
use habitat_backend::domain::listing::ListingDraft;
use habitat_backend::entities::profiles::UserRole;
use habitat_backend::entities::properties::PublicationStatus;
use habitat_backend::repos::profiles::{self, Profile};
use habitat_backend::repos::properties;
use habitat_backend::services::profiles::ensure_profile;
use habitat_backend::services::properties::{create, OwnerListingDetail};
use sea_orm::ConnectionTrait;
use serde_json::{json, Value};
use uuid::Uuid;

pub fn claims(sub: Uuid, email: &str) -> BackendClaims {
    BackendClaims {
        sub,
        email: email.to_string(),
        exp: i64::MAX,
    }
}

pub async fn user<C: ConnectionTrait + Send + Sync>(conn: &C) -> Profile {
    ensure_profile(conn, &claims(Uuid::new_v4(), &unique_email("owner")))
        .await
        .expect("create profile")
}

pub async fn admin<C: ConnectionTrait + Send + Sync>(conn: &C) -> Profile {
    let profile = user(conn).await;
    profiles::set_role(conn, profile.id, UserRole::Admin)
        .await
        .expect("promote to admin");
    profiles::find_by_id(conn, profile.id)
        .await
        .expect("reload admin")
        .expect("admin exists")
}

/// A valid listing body; `overrides` replaces top-level keys.
pub fn draft_json(overrides: Value) -> Value {
    let mut body = json!({
        "title": "Apartamento en El Poblado",
        "description": "Vista a la ciudad",
        "property_type": "apartment",
        "status": "for_sale",
        "price": 450_000_000,
        "bedrooms": 3,
        "bathrooms": 2,
        "square_feet": 95,
        "administration_fee": 350_000,
        "address": "Calle 10 # 43-12",
        "city": "Medellín",
        "bank_id": "bancolombia",
        "images": [
            {"url": "https://cdn.habitat.test/a.jpg", "is_primary": true},
            {"url": "https://cdn.habitat.test/b.jpg"}
        ],
        "amenities": ["Piscina", "Gimnasio"]
    });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    body
}

pub fn draft(overrides: Value) -> ListingDraft {
    serde_json::from_value(draft_json(overrides)).expect("valid draft json")
}

/// Listing awaiting payment.
pub async fn listing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Uuid,
    overrides: Value,
) -> OwnerListingDetail {
    create(conn, owner, draft(overrides))
        .await
        .expect("create listing")
}

/// Listing already visible in public search.
pub async fn published_listing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Uuid,
    overrides: Value,
) -> Uuid {
    let created = listing(conn, owner, overrides).await;
    let id = created.listing.card.id;
    properties::set_publication_status(conn, id, PublicationStatus::Published)
        .await
        .expect("publish listing");
    id
}
