//! Conventions of the Bold payment provider: checkout signatures, webhook
//! verification, order ids and status vocabulary.

pub mod checkout;
pub mod signature;
pub mod status;

pub use checkout::{checkout_description, generate_order_id, validate_order_id};
pub use signature::{integrity_signature, webhook_signature_valid};
pub use status::{ProviderStatus, RedirectResult, RedirectState};
