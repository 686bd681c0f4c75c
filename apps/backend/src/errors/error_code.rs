//! Error codes returned in Problem Details bodies.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code
//! is SCREAMING_SNAKE_CASE and maps 1:1 to the string clients see.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Webhook body signature did not verify
    InvalidWebhookSignature,
    /// Access denied
    Forbidden,
    /// Caller lacks the role required for the operation
    InsufficientRole,

    // Request Validation
    /// Malformed UUID in a path segment
    InvalidId,
    /// Payment amount missing, non-positive or not the configured price
    InvalidPaymentAmount,
    /// Currency differs from the configured one
    InvalidCurrency,
    /// Unknown payment type
    InvalidPaymentType,
    /// Order id with illegal characters or length
    InvalidOrderId,
    /// Listing draft failed validation
    InvalidListing,
    /// Price alert criteria failed validation
    InvalidAlert,
    /// Profile fields failed validation
    InvalidProfile,
    /// Deposit amount out of range
    InvalidDeposit,
    /// Simulator inputs out of range
    InvalidSimulation,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    ProfileNotFound,
    PropertyNotFound,
    PaymentNotFound,
    AlertNotFound,
    WalletNotFound,
    BankNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// An order id was already used for another checkout
    DuplicateOrderId,
    /// Payment already reached a different terminal status
    PaymentAlreadyFinalized,
    /// Publication status change not allowed from the current status
    InvalidPublicationTransition,
    /// Email already attached to another profile
    UniqueEmail,
    /// Generated listing code collided with an existing one
    PropertyCodeConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Payment provider keys are not configured
    PaymentsNotConfigured,
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Canonical string for this code, exactly as it appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidWebhookSignature => "INVALID_WEBHOOK_SIGNATURE",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            Self::InvalidId => "INVALID_ID",
            Self::InvalidPaymentAmount => "INVALID_PAYMENT_AMOUNT",
            Self::InvalidCurrency => "INVALID_CURRENCY",
            Self::InvalidPaymentType => "INVALID_PAYMENT_TYPE",
            Self::InvalidOrderId => "INVALID_ORDER_ID",
            Self::InvalidListing => "INVALID_LISTING",
            Self::InvalidAlert => "INVALID_ALERT",
            Self::InvalidProfile => "INVALID_PROFILE",
            Self::InvalidDeposit => "INVALID_DEPOSIT",
            Self::InvalidSimulation => "INVALID_SIMULATION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::PropertyNotFound => "PROPERTY_NOT_FOUND",
            Self::PaymentNotFound => "PAYMENT_NOT_FOUND",
            Self::AlertNotFound => "ALERT_NOT_FOUND",
            Self::WalletNotFound => "WALLET_NOT_FOUND",
            Self::BankNotFound => "BANK_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateOrderId => "DUPLICATE_ORDER_ID",
            Self::PaymentAlreadyFinalized => "PAYMENT_ALREADY_FINALIZED",
            Self::InvalidPublicationTransition => "INVALID_PUBLICATION_TRANSITION",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::PropertyCodeConflict => "PROPERTY_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::PaymentsNotConfigured => "PAYMENTS_NOT_CONFIGURED",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::InvalidWebhookSignature,
        Self::Forbidden,
        Self::InsufficientRole,
        Self::InvalidId,
        Self::InvalidPaymentAmount,
        Self::InvalidCurrency,
        Self::InvalidPaymentType,
        Self::InvalidOrderId,
        Self::InvalidListing,
        Self::InvalidAlert,
        Self::InvalidProfile,
        Self::InvalidDeposit,
        Self::InvalidSimulation,
        Self::ValidationError,
        Self::BadRequest,
        Self::ProfileNotFound,
        Self::PropertyNotFound,
        Self::PaymentNotFound,
        Self::AlertNotFound,
        Self::WalletNotFound,
        Self::BankNotFound,
        Self::NotFound,
        Self::DuplicateOrderId,
        Self::PaymentAlreadyFinalized,
        Self::InvalidPublicationTransition,
        Self::UniqueEmail,
        Self::PropertyCodeConflict,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::UniqueViolation,
        Self::FkViolation,
        Self::CheckViolation,
        Self::RecordNotFound,
        Self::PaymentsNotConfigured,
        Self::Internal,
        Self::ConfigError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
