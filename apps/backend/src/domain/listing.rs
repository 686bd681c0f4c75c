//! Validation of listing drafts submitted from the owner dashboard.

use serde::Deserialize;

use super::banks::find_bank;
use crate::entities::properties::{PropertyStatus, PropertyType};
use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_TEXT_LEN: usize = 200;
pub const MAX_AMENITIES: usize = 50;
pub const MAX_IMAGES: usize = 30;
const MAX_IMAGE_URL_LEN: usize = 2048;
const MAX_AMENITY_LEN: usize = 100;
const DEFAULT_COUNTRY: &str = "Colombia";

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDraft {
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Listing as submitted. Payment-controlled fields are deliberately absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub price: i64,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[serde(default)]
    pub square_feet: Option<i32>,
    #[serde(default)]
    pub administration_fee: Option<i64>,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub bank_id: String,
    #[serde(default)]
    pub images: Vec<ImageDraft>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingImage {
    pub url: String,
    pub is_primary: bool,
}

/// A draft that passed validation; strings trimmed, images and amenities cleaned.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidListing {
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
    pub images: Vec<ListingImage>,
    pub amenities: Vec<String>,
}

impl ListingDraft {
    pub fn validate(self) -> Result<ValidListing, DomainError> {
        let title = required_text("title", &self.title)?;
        let address = required_text("address", &self.address)?;
        let city = required_text("city", &self.city)?;

        if self.price <= 0 {
            return Err(invalid("price must be greater than zero"));
        }
        for (name, value) in [
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("square_feet", self.square_feet),
        ] {
            if value.is_some_and(|v| v < 0) {
                return Err(invalid(format!("{name} must not be negative")));
            }
        }
        if self.administration_fee.is_some_and(|v| v < 0) {
            return Err(invalid("administration_fee must not be negative"));
        }
        if self
            .latitude
            .is_some_and(|v| !v.is_finite() || !(-90.0..=90.0).contains(&v))
        {
            return Err(invalid("latitude must be between -90 and 90"));
        }
        if self
            .longitude
            .is_some_and(|v| !v.is_finite() || !(-180.0..=180.0).contains(&v))
        {
            return Err(invalid("longitude must be between -180 and 180"));
        }

        let bank_id = self.bank_id.trim().to_string();
        if find_bank(&bank_id).is_none() {
            return Err(invalid(format!("unknown bank '{bank_id}'")));
        }

        let images = clean_images(self.images)?;
        let amenities = clean_amenities(self.amenities)?;

        Ok(ValidListing {
            title,
            description: optional_text(self.description),
            property_type: self.property_type,
            status: self.status,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            administration_fee: self.administration_fee,
            address,
            city,
            state: optional_text(self.state),
            country: optional_text(self.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            zip_code: optional_text(self.zip_code),
            latitude: self.latitude,
            longitude: self.longitude,
            bank_id,
            images,
            amenities,
        })
    }
}

fn required_text(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(invalid(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_hosted_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Drop non-http(s) URLs and leave exactly one primary image.
fn clean_images(images: Vec<ImageDraft>) -> Result<Vec<ListingImage>, DomainError> {
    if images.len() > MAX_IMAGES {
        return Err(invalid(format!("at most {MAX_IMAGES} images")));
    }
    if images.iter().any(|img| img.url.trim().len() > MAX_IMAGE_URL_LEN) {
        return Err(invalid(format!(
            "image URLs must be at most {MAX_IMAGE_URL_LEN} bytes"
        )));
    }
    let mut kept: Vec<ListingImage> = images
        .into_iter()
        .map(|img| ListingImage {
            url: img.url.trim().to_string(),
            is_primary: img.is_primary,
        })
        .filter(|img| is_hosted_url(&img.url))
        .collect();

    if kept.is_empty() {
        return Err(invalid("at least one image with an http(s) URL is required"));
    }

    let primary = kept.iter().position(|img| img.is_primary).unwrap_or(0);
    for (i, img) in kept.iter_mut().enumerate() {
        img.is_primary = i == primary;
    }
    Ok(kept)
}

fn clean_amenities(amenities: Vec<String>) -> Result<Vec<String>, DomainError> {
    let mut out: Vec<String> = Vec::new();
    for raw in amenities {
        let amenity = raw.trim();
        if amenity.is_empty() {
            continue;
        }
        if amenity.chars().count() > MAX_AMENITY_LEN {
            return Err(invalid(format!(
                "amenities must be at most {MAX_AMENITY_LEN} characters"
            )));
        }
        let lower = amenity.to_lowercase();
        if !out.iter().any(|a| a.to_lowercase() == lower) {
            out.push(amenity.to_string());
        }
    }
    if out.len() > MAX_AMENITIES {
        return Err(invalid(format!("at most {MAX_AMENITIES} amenities")));
    }
    Ok(out)
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::Listing, detail)
}
