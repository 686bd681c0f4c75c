//! DTOs for properties_sea adapter.

use uuid::Uuid;

use crate::domain::listing::ValidListing;
use crate::entities::properties::{PropertyStatus, PropertyType};

/// Owner-editable columns; the payment-controlled ones are never part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFields {
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
    pub bank_id: String,
}

impl From<&ValidListing> for PropertyFields {
    fn from(v: &ValidListing) -> Self {
        Self {
            title: v.title.clone(),
            description: v.description.clone(),
            property_type: v.property_type,
            status: v.status,
            price: v.price,
            bedrooms: v.bedrooms,
            bathrooms: v.bathrooms,
            square_feet: v.square_feet,
            administration_fee: v.administration_fee,
            address: v.address.clone(),
            city: v.city.clone(),
            state: v.state.clone(),
            country: v.country.clone(),
            zip_code: v.zip_code.clone(),
            latitude: v.latitude,
            longitude: v.longitude,
            bank_id: v.bank_id.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyCreate {
    pub user_id: Uuid,
    pub property_id_code: String,
    pub fields: PropertyFields,
}

/// Normalized public search filters. Text terms are already lowercased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub min_sqft: Option<i32>,
    pub max_sqft: Option<i32>,
    pub min_admin: Option<i64>,
    pub max_admin: Option<i64>,
    /// Match any
    pub amenities: Vec<String>,
    pub limit: u64,
    pub offset: u64,
}

/// Columns an alert filters on, for the database-side prefilter.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
}
