use ulid::Ulid;
use uuid::Uuid;

use crate::entities::payments::PaymentType;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_ORDER_ID_LEN: usize = 128;
const DESCRIPTION_TITLE_CHARS: usize = 80;

/// `{payment_type}_{property_id}_{ulid}`; `none` stands in for a missing property.
pub fn generate_order_id(payment_type: PaymentType, property_id: Option<Uuid>) -> String {
    let property = property_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!("{}_{}_{}", payment_type.as_str(), property, Ulid::new())
}

/// Client-supplied order ids: 1-128 chars of `[A-Za-z0-9_-]`.
pub fn validate_order_id(order_id: &str) -> Result<(), DomainError> {
    let ok = !order_id.is_empty()
        && order_id.len() <= MAX_ORDER_ID_LEN
        && order_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::OrderId,
            format!("orderId must be 1-{MAX_ORDER_ID_LEN} characters of letters, digits, '_' or '-'"),
        ))
    }
}

/// Text shown on the provider's checkout page.
pub fn checkout_description(payment_type: PaymentType, title: Option<&str>) -> String {
    let prefix = match payment_type {
        PaymentType::Publication => "Publicacion",
        PaymentType::Featured => "Destacar",
    };
    let title: String = title
        .unwrap_or("Propiedad")
        .chars()
        .take(DESCRIPTION_TITLE_CHARS)
        .collect();
    format!("{prefix}: {title}")
}
