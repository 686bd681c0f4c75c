//! Bold checkout creation and provider result handling.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::bold::{
    checkout_description, generate_order_id, integrity_signature, validate_order_id,
    ProviderStatus, RedirectResult, RedirectState,
};
use crate::config::payments::BoldConfig;
use crate::domain::featured::featured_until;
use crate::domain::publication::can_transition;
use crate::entities::payments::{PaymentStatus, PaymentType};
use crate::entities::properties::PublicationStatus;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::repos::payments::{self, Payment, PaymentCreate, PaymentFinalize};
use crate::repos::properties;

/// Body of the signature request, camelCase as the checkout button sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    pub order_id: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub payment_type: Option<String>,
    pub property_id: Option<Uuid>,
}

/// Fields the provider's embedded checkout needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    pub api_key: String,
    pub order_id: String,
    pub currency: String,
    pub amount: i64,
    pub integrity_signature: String,
    pub redirection_url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    pub integrity_signature: String,
    pub order_id: String,
    pub checkout: CheckoutConfig,
}

fn invalid(kind: ValidationKind, detail: impl Into<String>) -> AppError {
    DomainError::validation(kind, detail).into()
}

pub fn parse_payment_type(raw: Option<&str>) -> Result<PaymentType, AppError> {
    match raw.map(str::trim) {
        None | Some("") | Some("publication") => Ok(PaymentType::Publication),
        Some("featured") => Ok(PaymentType::Featured),
        Some(other) => Err(invalid(
            ValidationKind::PaymentType,
            format!("Unknown paymentType '{other}'"),
        )),
    }
}

/// Validate a checkout request, record the pending payment and sign it.
pub async fn create_checkout<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cfg: &BoldConfig,
    user_id: Uuid,
    req: SignatureRequest,
) -> Result<SignatureResponse, AppError> {
    let (Some(amount), Some(currency)) = (req.amount, req.currency.as_deref()) else {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "amount and currency are required",
        ));
    };
    if amount <= 0 {
        return Err(invalid(
            ValidationKind::PaymentAmount,
            "amount must be greater than zero",
        ));
    }
    let currency = currency.trim().to_ascii_uppercase();
    if currency != cfg.currency {
        return Err(invalid(
            ValidationKind::Currency,
            format!("currency must be {}", cfg.currency),
        ));
    }
    let payment_type = parse_payment_type(req.payment_type.as_deref())?;
    let expected = cfg.price_for(payment_type);
    if amount != expected {
        return Err(invalid(
            ValidationKind::PaymentAmount,
            format!(
                "amount for a {} payment must be {expected}",
                payment_type.as_str()
            ),
        ));
    }

    let secret = cfg.require_secret_key()?;
    let api_key = cfg.api_key.clone().ok_or_else(|| {
        AppError::internal(
            ErrorCode::PaymentsNotConfigured,
            "Payment API key is not configured",
        )
    })?;

    let title = match req.property_id {
        Some(property_id) => {
            let property = properties::find_owned(conn, property_id, user_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(ErrorCode::PropertyNotFound, "Property not found")
                })?;
            Some(property.title)
        }
        None => None,
    };

    let order_id = match req.order_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => {
            validate_order_id(id)?;
            id.to_string()
        }
        _ => generate_order_id(payment_type, req.property_id),
    };

    let description = checkout_description(payment_type, title.as_deref());
    payments::create_payment(
        conn,
        PaymentCreate {
            user_id,
            property_id: req.property_id,
            payment_type,
            amount,
            currency: currency.clone(),
            order_id: order_id.clone(),
            metadata: Some(json!({ "description": description })),
        },
    )
    .await?;

    let signature = integrity_signature(&order_id, amount, &currency, secret);
    info!(
        order_id = %order_id,
        payment_type = payment_type.as_str(),
        property_id = ?req.property_id,
        amount,
        "Checkout created"
    );

    Ok(SignatureResponse {
        integrity_signature: signature.clone(),
        order_id: order_id.clone(),
        checkout: CheckoutConfig {
            api_key,
            order_id,
            currency,
            amount,
            integrity_signature: signature,
            redirection_url: cfg.redirect_url(),
            description,
        },
    })
}

/// Verification and webhook body.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderResultBody {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
}

/// A provider report ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResult {
    pub order_id: String,
    pub status: ProviderStatus,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl ProviderResult {
    pub fn new(
        order_id: Option<String>,
        status: Option<String>,
        transaction_id: Option<String>,
        payment_method: Option<String>,
    ) -> Result<Self, AppError> {
        let (Some(order_id), Some(status)) = (non_blank(order_id), non_blank(status)) else {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "order_id and status are required",
            ));
        };
        Ok(Self {
            order_id,
            status: ProviderStatus::parse(&status),
            transaction_id: non_blank(transaction_id),
            payment_method: non_blank(payment_method),
        })
    }
}

impl TryFrom<ProviderResultBody> for ProviderResult {
    type Error = AppError;

    fn try_from(body: ProviderResultBody) -> Result<Self, Self::Error> {
        Self::new(
            body.order_id,
            body.status,
            body.transaction_id,
            body.payment_method,
        )
    }
}

/// Response of the verification endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub payment_type: PaymentType,
    pub property_id: Option<Uuid>,
    pub status: PaymentStatus,
}

impl From<&Payment> for VerifyResponse {
    fn from(p: &Payment) -> Self {
        Self {
            success: true,
            payment_type: p.payment_type,
            property_id: p.property_id,
            status: p.status,
        }
    }
}

/// Apply a provider report to the stored payment.
///
/// Only a pending row changes; the first writer wins. A repeat of the stored
/// terminal status is a no-op, a different terminal status is a conflict.
/// Listing side effects run once, on the write that finalized an approval.
pub async fn apply_provider_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cfg: &BoldConfig,
    result: ProviderResult,
) -> Result<Payment, AppError> {
    let payment = payments::find_by_order_id(conn, &result.order_id)
        .await?
        .ok_or_else(|| {
            AppError::from(DomainError::not_found(
                NotFoundKind::Payment,
                "Payment not found",
            ))
        })?;

    let Some(target) = result.status.terminal_status() else {
        debug!(order_id = %payment.order_id, "Provider still pending; nothing to apply");
        return Ok(payment);
    };

    if payment.status.is_terminal() {
        return settled(payment, target);
    }

    let written = payments::finalize_pending(
        conn,
        &payment.order_id,
        PaymentFinalize {
            status: target,
            transaction_id: result.transaction_id.clone(),
            payment_method: result.payment_method.clone(),
        },
    )
    .await?;

    let current = payments::find_by_order_id(conn, &payment.order_id)
        .await?
        .ok_or_else(|| {
            AppError::from(DomainError::not_found(
                NotFoundKind::Payment,
                "Payment not found",
            ))
        })?;

    if !written {
        // Lost the race to another writer.
        return settled(current, target);
    }

    info!(
        order_id = %current.order_id,
        status = current.status.as_str(),
        payment_type = current.payment_type.as_str(),
        property_id = ?current.property_id,
        "Payment finalized"
    );

    if current.status == PaymentStatus::Approved {
        apply_approval(conn, cfg, &current).await?;
    }
    Ok(current)
}

fn settled(payment: Payment, target: PaymentStatus) -> Result<Payment, AppError> {
    if payment.status == target {
        debug!(
            order_id = %payment.order_id,
            status = payment.status.as_str(),
            "Payment already in reported status"
        );
        return Ok(payment);
    }
    warn!(
        order_id = %payment.order_id,
        stored = payment.status.as_str(),
        reported = target.as_str(),
        "Conflicting provider report for a finalized payment"
    );
    Err(DomainError::conflict(
        ConflictKind::PaymentAlreadyFinalized,
        format!("Payment is already {}", payment.status.as_str()),
    )
    .into())
}

async fn apply_approval<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cfg: &BoldConfig,
    payment: &Payment,
) -> Result<(), AppError> {
    let Some(property_id) = payment.property_id else {
        return Ok(());
    };
    let Some(property) = properties::find_by_id(conn, property_id).await? else {
        warn!(
            order_id = %payment.order_id,
            property_id = %property_id,
            "Approved payment references a missing property"
        );
        return Ok(());
    };

    let now = OffsetDateTime::now_utc();
    match payment.payment_type {
        PaymentType::Publication => {
            let from = property.publication_status;
            if !can_transition(from, PublicationStatus::Published) {
                warn!(
                    order_id = %payment.order_id,
                    property_id = %property_id,
                    from = from.as_str(),
                    "Publication payment approved but listing cannot be published"
                );
                return Ok(());
            }
            properties::mark_published(conn, property_id, now, &payment.order_id).await?;
            info!(
                order_id = %payment.order_id,
                property_id = %property_id,
                "Listing published"
            );
        }
        PaymentType::Featured => {
            let until = featured_until(now, cfg.featured_days);
            properties::mark_featured(conn, property_id, now, until, &payment.order_id).await?;
            info!(
                order_id = %payment.order_id,
                property_id = %property_id,
                featured_until = %until,
                "Listing featured"
            );
        }
    }
    Ok(())
}

/// What the payment-result page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectOutcome {
    pub state: RedirectState,
    pub order_id: Option<String>,
}

/// Apply the query parameters of the provider redirect.
///
/// Unknown orders and missing parameters render as `error`; a report that
/// disagrees with a finalized payment shows what is stored.
pub async fn redirect_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cfg: &BoldConfig,
    redirect: RedirectResult,
) -> Result<RedirectOutcome, AppError> {
    let Some(order_id) = redirect.order_id.clone() else {
        return Ok(RedirectOutcome {
            state: RedirectState::Error,
            order_id: None,
        });
    };
    let outcome = |state| RedirectOutcome {
        state,
        order_id: Some(order_id.clone()),
    };

    if redirect.status.is_none() {
        let stored = payments::find_by_order_id(conn, &order_id).await?;
        return Ok(outcome(
            stored.map_or(RedirectState::Error, |p| RedirectState::from(p.status)),
        ));
    }

    let result = ProviderResult::new(
        redirect.order_id,
        redirect.status,
        redirect.transaction_id,
        redirect.payment_method,
    )?;
    match apply_provider_result(conn, cfg, result).await {
        Ok(payment) => Ok(outcome(RedirectState::from(payment.status))),
        Err(AppError::NotFound { .. }) => Ok(outcome(RedirectState::Error)),
        Err(AppError::Conflict {
            code: ErrorCode::PaymentAlreadyFinalized,
            ..
        }) => {
            let stored = payments::find_by_order_id(conn, &order_id).await?;
            Ok(outcome(
                stored.map_or(RedirectState::Error, |p| RedirectState::from(p.status)),
            ))
        }
        Err(e) => Err(e),
    }
}
