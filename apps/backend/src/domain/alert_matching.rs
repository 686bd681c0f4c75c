//! Price alert criteria and matching against listings.

use serde::Serialize;

use crate::domain::search::text_key;
use crate::entities::properties::PropertyType;
use crate::errors::domain::{DomainError, ValidationKind};

/// Search criteria saved by a user; every field that is set must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertCriteria {
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
}

/// The parts of a listing an alert looks at.
#[derive(Debug, Clone, Copy)]
pub struct ListingFacts<'a> {
    pub property_type: PropertyType,
    pub city: &'a str,
    pub price: i64,
    pub bedrooms: Option<i32>,
}

impl AlertCriteria {
    /// Trim the city (blank means unset) and check bounds.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.city = self
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if let Some(city) = &self.city {
            if city.chars().count() > 200 {
                return Err(invalid("city must be at most 200 characters"));
            }
        }
        if self.min_price.is_some_and(|v| v < 0) || self.max_price.is_some_and(|v| v < 0) {
            return Err(invalid("prices must not be negative"));
        }
        if self.min_bedrooms.is_some_and(|v| v < 0) || self.max_bedrooms.is_some_and(|v| v < 0) {
            return Err(invalid("bedrooms must not be negative"));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(invalid("min_price must not exceed max_price"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_bedrooms, self.max_bedrooms) {
            if min > max {
                return Err(invalid("min_bedrooms must not exceed max_bedrooms"));
            }
        }
        if self.is_empty() {
            return Err(invalid("at least one criterion is required"));
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.property_type.is_none()
            && self.city.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
            && self.max_bedrooms.is_none()
    }

    pub fn matches(&self, listing: &ListingFacts<'_>) -> bool {
        if self
            .property_type
            .is_some_and(|t| t != listing.property_type)
        {
            return false;
        }
        if let Some(city) = &self.city {
            if !text_key(listing.city).contains(&text_key(city)) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| listing.price < min)
            || self.max_price.is_some_and(|max| listing.price > max)
        {
            return false;
        }
        if self.min_bedrooms.is_some() || self.max_bedrooms.is_some() {
            let Some(bedrooms) = listing.bedrooms else {
                return false;
            };
            if self.min_bedrooms.is_some_and(|min| bedrooms < min)
                || self.max_bedrooms.is_some_and(|max| bedrooms > max)
            {
                return false;
            }
        }
        true
    }
}

fn invalid(detail: &str) -> DomainError {
    DomainError::validation(ValidationKind::Alert, detail)
}
