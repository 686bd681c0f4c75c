//! SeaORM adapter for listings, their images and amenities.

use sea_orm::sea_query::{Condition, Expr, LikeExpr, Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::listing::ListingImage;
use crate::domain::search::{contains_pattern, listing_search_key, text_key};
use crate::entities::properties::{self, PropertyStatus, PublicationStatus};
use crate::entities::{property_amenities, property_images};

pub mod dto;

pub use dto::{AlertFilter, PropertyCreate, PropertyFields, SearchFilters};

/// `key_col LIKE '%term%' ESCAPE '\'` over a `*_key` column; `term` must
/// already be a `text_key`.
fn key_contains<T>(col: T, term: &str) -> SimpleExpr
where
    T: sea_orm::sea_query::IntoColumnRef,
{
    Expr::col(col).like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

fn published() -> Condition {
    Condition::all().add(properties::Column::PublicationStatus.eq(PublicationStatus::Published))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find_by_id(id).one(conn).await
}

pub async fn find_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find_by_id(id)
        .filter(published())
        .one(conn)
        .await
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find_by_id(id)
        .filter(properties::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find()
        .filter(properties::Column::PropertyIdCode.eq(code))
        .one(conn)
        .await
}

pub async fn search_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filters: &SearchFilters,
) -> Result<Vec<properties::Model>, sea_orm::DbErr> {
    let mut cond = published();

    if let Some(q) = &filters.query {
        cond = cond.add(key_contains(
            (properties::Entity, properties::Column::SearchKey),
            q,
        ));
    }
    if let Some(status) = filters.status {
        cond = cond.add(properties::Column::Status.eq(status));
    }
    if let Some(t) = filters.property_type {
        cond = cond.add(properties::Column::PropertyType.eq(t));
    }
    if let Some(city) = &filters.city {
        cond = cond.add(key_contains((properties::Entity, properties::Column::CityKey), city));
    }
    if let Some(v) = filters.min_price {
        cond = cond.add(properties::Column::Price.gte(v));
    }
    if let Some(v) = filters.max_price {
        cond = cond.add(properties::Column::Price.lte(v));
    }
    if let Some(v) = filters.min_bedrooms {
        cond = cond.add(properties::Column::Bedrooms.gte(v));
    }
    if let Some(v) = filters.min_bathrooms {
        cond = cond.add(properties::Column::Bathrooms.gte(v));
    }
    if let Some(v) = filters.min_sqft {
        cond = cond.add(properties::Column::SquareFeet.gte(v));
    }
    if let Some(v) = filters.max_sqft {
        cond = cond.add(properties::Column::SquareFeet.lte(v));
    }
    if let Some(v) = filters.min_admin {
        cond = cond.add(properties::Column::AdministrationFee.gte(v));
    }
    if let Some(v) = filters.max_admin {
        cond = cond.add(properties::Column::AdministrationFee.lte(v));
    }
    if !filters.amenities.is_empty() {
        let any_amenity = filters.amenities.iter().fold(Condition::any(), |acc, a| {
            acc.add(key_contains(
                (property_amenities::Entity, property_amenities::Column::AmenityKey),
                a,
            ))
        });
        cond = cond.add(
            properties::Column::Id.in_subquery(
                Query::select()
                    .column(property_amenities::Column::PropertyId)
                    .from(property_amenities::Entity)
                    .cond_where(any_amenity)
                    .to_owned(),
            ),
        );
    }

    properties::Entity::find()
        .filter(cond)
        .order_by_desc(properties::Column::CreatedAt)
        .order_by_desc(properties::Column::Id)
        .limit(filters.limit)
        .offset(filters.offset)
        .all(conn)
        .await
}

/// Published listings whose paid feature is still running, newest first.
pub async fn featured_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find()
        .filter(published())
        .filter(properties::Column::IsFeaturedPaid.eq(true))
        .filter(properties::Column::FeaturedUntil.gt(now))
        .order_by_desc(properties::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn newest_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find()
        .filter(published())
        .order_by_desc(properties::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn autocomplete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    term: &str,
    status: Option<PropertyStatus>,
    limit: u64,
) -> Result<Vec<properties::Model>, sea_orm::DbErr> {
    let mut query = properties::Entity::find()
        .filter(published())
        .filter(key_contains(
            (properties::Entity, properties::Column::SearchKey),
            term,
        ));
    if let Some(status) = status {
        query = query.filter(properties::Column::Status.eq(status));
    }
    query
        .order_by_desc(properties::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
}

/// Published listings an alert filter selects, newest first.
pub async fn published_matching<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &AlertFilter,
    limit: u64,
) -> Result<Vec<properties::Model>, sea_orm::DbErr> {
    let mut cond = published();
    if let Some(t) = filter.property_type {
        cond = cond.add(properties::Column::PropertyType.eq(t));
    }
    if let Some(city) = &filter.city {
        cond = cond.add(key_contains(
            (properties::Entity, properties::Column::CityKey),
            &text_key(city),
        ));
    }
    if let Some(v) = filter.min_price {
        cond = cond.add(properties::Column::Price.gte(v));
    }
    if let Some(v) = filter.max_price {
        cond = cond.add(properties::Column::Price.lte(v));
    }
    if let Some(v) = filter.min_bedrooms {
        cond = cond.add(properties::Column::Bedrooms.gte(v));
    }
    if let Some(v) = filter.max_bedrooms {
        cond = cond.add(properties::Column::Bedrooms.lte(v));
    }
    properties::Entity::find()
        .filter(cond)
        .order_by_desc(properties::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn list_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: Option<u64>,
) -> Result<Vec<properties::Model>, sea_orm::DbErr> {
    properties::Entity::find()
        .filter(properties::Column::UserId.eq(user_id))
        .order_by_desc(properties::Column::CreatedAt)
        .order_by_desc(properties::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    publication_status: Option<PublicationStatus>,
) -> Result<u64, sea_orm::DbErr> {
    let mut query = properties::Entity::find().filter(properties::Column::UserId.eq(user_id));
    if let Some(status) = publication_status {
        query = query.filter(properties::Column::PublicationStatus.eq(status));
    }
    query.count(conn).await
}

pub async fn count_featured_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    properties::Entity::find()
        .filter(properties::Column::UserId.eq(user_id))
        .filter(properties::Column::IsFeaturedPaid.eq(true))
        .filter(properties::Column::FeaturedUntil.gt(now))
        .count(conn)
        .await
}

pub async fn create_property<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PropertyCreate,
) -> Result<properties::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let f = dto.fields;
    let search_key = listing_search_key(&f.title, &f.address, &f.city);
    let city_key = text_key(&f.city);
    properties::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(dto.user_id),
        title: Set(f.title),
        description: Set(f.description),
        property_type: Set(f.property_type),
        status: Set(f.status),
        price: Set(f.price),
        bedrooms: Set(f.bedrooms),
        bathrooms: Set(f.bathrooms),
        square_feet: Set(f.square_feet),
        administration_fee: Set(f.administration_fee),
        search_key: Set(search_key),
        city_key: Set(city_key),
        address: Set(f.address),
        city: Set(f.city),
        state: Set(f.state),
        country: Set(f.country),
        zip_code: Set(f.zip_code),
        latitude: Set(f.latitude),
        longitude: Set(f.longitude),
        property_id_code: Set(dto.property_id_code),
        bank_id: Set(f.bank_id),
        featured: Set(false),
        views: Set(0),
        publication_status: Set(PublicationStatus::PendingPayment),
        is_featured_paid: Set(false),
        featured_until: Set(None),
        paid_at: Set(None),
        payment_reference: Set(None),
        featured_payment_reference: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn update_fields<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    f: PropertyFields,
) -> Result<properties::Model, sea_orm::DbErr> {
    let search_key = listing_search_key(&f.title, &f.address, &f.city);
    let city_key = text_key(&f.city);
    properties::ActiveModel {
        id: Set(id),
        title: Set(f.title),
        description: Set(f.description),
        property_type: Set(f.property_type),
        status: Set(f.status),
        price: Set(f.price),
        bedrooms: Set(f.bedrooms),
        bathrooms: Set(f.bathrooms),
        square_feet: Set(f.square_feet),
        administration_fee: Set(f.administration_fee),
        search_key: Set(search_key),
        city_key: Set(city_key),
        address: Set(f.address),
        city: Set(f.city),
        state: Set(f.state),
        country: Set(f.country),
        zip_code: Set(f.zip_code),
        latitude: Set(f.latitude),
        longitude: Set(f.longitude),
        bank_id: Set(f.bank_id),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .update(conn)
    .await
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = properties::Entity::delete_many()
        .filter(properties::Column::Id.eq(id))
        .filter(properties::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// `views = views + 1` on a published listing.
pub async fn increment_views<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = properties::Entity::update_many()
        .col_expr(
            properties::Column::Views,
            Expr::col(properties::Column::Views).add(1),
        )
        .filter(properties::Column::Id.eq(id))
        .filter(published())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn set_publication_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    status: PublicationStatus,
) -> Result<u64, sea_orm::DbErr> {
    let result = properties::Entity::update_many()
        .col_expr(properties::Column::PublicationStatus, Expr::value(status))
        .col_expr(
            properties::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(properties::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Publication paid: published, with paid_at and the order reference.
pub async fn mark_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    now: OffsetDateTime,
    reference: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = properties::Entity::update_many()
        .col_expr(
            properties::Column::PublicationStatus,
            Expr::value(PublicationStatus::Published),
        )
        .col_expr(properties::Column::PaidAt, Expr::value(Some(now)))
        .col_expr(
            properties::Column::PaymentReference,
            Expr::value(Some(reference.to_string())),
        )
        .col_expr(properties::Column::UpdatedAt, Expr::value(now))
        .filter(properties::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Feature paid: featured until `until`, with the order reference.
pub async fn mark_featured<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    now: OffsetDateTime,
    until: OffsetDateTime,
    reference: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = properties::Entity::update_many()
        .col_expr(properties::Column::Featured, Expr::value(true))
        .col_expr(properties::Column::IsFeaturedPaid, Expr::value(true))
        .col_expr(properties::Column::FeaturedUntil, Expr::value(Some(until)))
        .col_expr(
            properties::Column::FeaturedPaymentReference,
            Expr::value(Some(reference.to_string())),
        )
        .col_expr(properties::Column::UpdatedAt, Expr::value(now))
        .filter(properties::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

// ----- images -----

pub async fn images_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_id: Uuid,
) -> Result<Vec<property_images::Model>, sea_orm::DbErr> {
    property_images::Entity::find()
        .filter(property_images::Column::PropertyId.eq(property_id))
        .order_by_desc(property_images::Column::IsPrimary)
        .order_by_asc(property_images::Column::CreatedAt)
        .all(conn)
        .await
}

/// Primary images of several listings at once.
pub async fn primary_images_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_ids: &[Uuid],
) -> Result<Vec<property_images::Model>, sea_orm::DbErr> {
    if property_ids.is_empty() {
        return Ok(Vec::new());
    }
    property_images::Entity::find()
        .filter(property_images::Column::PropertyId.is_in(property_ids.iter().copied()))
        .filter(property_images::Column::IsPrimary.eq(true))
        .all(conn)
        .await
}

pub async fn replace_images<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_id: Uuid,
    images: &[ListingImage],
) -> Result<(), sea_orm::DbErr> {
    property_images::Entity::delete_many()
        .filter(property_images::Column::PropertyId.eq(property_id))
        .exec(conn)
        .await?;
    if images.is_empty() {
        return Ok(());
    }
    let now = OffsetDateTime::now_utc();
    let rows = images.iter().map(|img| property_images::ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(property_id),
        image_url: Set(img.url.clone()),
        is_primary: Set(img.is_primary),
        created_at: Set(now),
    });
    property_images::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

// ----- amenities -----

pub async fn amenities_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_id: Uuid,
) -> Result<Vec<property_amenities::Model>, sea_orm::DbErr> {
    property_amenities::Entity::find()
        .filter(property_amenities::Column::PropertyId.eq(property_id))
        .order_by_asc(property_amenities::Column::Amenity)
        .all(conn)
        .await
}

pub async fn replace_amenities<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    property_id: Uuid,
    amenities: &[String],
) -> Result<(), sea_orm::DbErr> {
    property_amenities::Entity::delete_many()
        .filter(property_amenities::Column::PropertyId.eq(property_id))
        .exec(conn)
        .await?;
    if amenities.is_empty() {
        return Ok(());
    }
    let now = OffsetDateTime::now_utc();
    let rows = amenities.iter().map(|a| property_amenities::ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(property_id),
        amenity: Set(a.clone()),
        amenity_key: Set(text_key(a)),
        created_at: Set(now),
    });
    property_amenities::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
