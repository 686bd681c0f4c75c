//! Closing-cost savings when buying or selling through leasing.

use serde::Serialize;

use crate::errors::domain::{DomainError, ValidationKind};

// Rates in per-mille to keep the arithmetic integral.
const TITLE_STUDY: i64 = 2;
const NOTARY: i64 = 3;
const REGISTRY: i64 = 5;
const STAMPS: i64 = 3;
const WITHHOLDING: i64 = 10;
const TAX_RECEIPT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuyerSavings {
    pub title_study: i64,
    pub notary: i64,
    pub registry: i64,
    pub stamps: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerSavings {
    pub withholding_tax: i64,
    pub tax_receipt: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingsBreakdown {
    pub buyer: BuyerSavings,
    pub seller: SellerSavings,
    pub total: i64,
}

fn share(value: i64, per_mille: i64) -> i64 {
    // round half up on whole pesos
    let scaled = i128::from(value) * i128::from(per_mille);
    ((scaled + 500) / 1000) as i64
}

pub fn savings(property_value: i64) -> Result<SavingsBreakdown, DomainError> {
    if property_value <= 0 {
        return Err(DomainError::validation(
            ValidationKind::Simulation,
            "property_value must be greater than zero",
        ));
    }

    let buyer = BuyerSavings {
        title_study: share(property_value, TITLE_STUDY),
        notary: share(property_value, NOTARY),
        registry: share(property_value, REGISTRY),
        stamps: share(property_value, STAMPS),
        total: share(property_value, TITLE_STUDY + NOTARY + REGISTRY + STAMPS),
    };
    let seller = SellerSavings {
        withholding_tax: share(property_value, WITHHOLDING),
        tax_receipt: share(property_value, TAX_RECEIPT),
        total: share(property_value, WITHHOLDING + TAX_RECEIPT),
    };
    let total = buyer.total + seller.total;

    Ok(SavingsBreakdown {
        buyer,
        seller,
        total,
    })
}
