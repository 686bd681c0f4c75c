use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[sea_orm(string_value = "house")]
    House,
    #[sea_orm(string_value = "apartment")]
    Apartment,
    #[sea_orm(string_value = "office")]
    Office,
    #[sea_orm(string_value = "villa")]
    Villa,
    #[sea_orm(string_value = "townhome")]
    Townhome,
    #[sea_orm(string_value = "bungalow")]
    Bungalow,
    #[sea_orm(string_value = "condo")]
    Condo,
    #[sea_orm(string_value = "land")]
    Land,
    #[sea_orm(string_value = "commercial")]
    Commercial,
}

/// Market status of the listing itself
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[sea_orm(string_value = "for_sale")]
    ForSale,
    #[sea_orm(string_value = "for_rent")]
    ForRent,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "rented")]
    Rented,
}

/// Whether the listing has been paid for and is publicly visible
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    #[sea_orm(string_value = "pending_payment")]
    PendingPayment,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl PublicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PublicationStatus::PendingPayment => "pending_payment",
            PublicationStatus::Published => "published",
            PublicationStatus::Expired => "expired",
            PublicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    /// Normalized city, see `domain::search::text_key`.
    pub city_key: String,
    /// Normalized title, address and city.
    pub search_key: String,
    pub state: Option<String>,
    pub country: String,
    pub zip_code: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
    #[sea_orm(unique)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::UserId",
        to = "super::profiles::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::property_images::Entity")]
    Images,
    #[sea_orm(has_many = "super::property_amenities::Entity")]
    Amenities,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::property_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::property_amenities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Amenities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
