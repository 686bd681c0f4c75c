//! Repository functions: domain models over the SeaORM adapters.

pub mod alerts;
pub mod payments;
pub mod profiles;
pub mod properties;
pub mod wallets;
