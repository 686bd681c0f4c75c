//! SeaORM adapters. Functions here are generic over `ConnectionTrait` and
//! return `DbErr`; repos map errors to `DomainError`.

pub mod alerts_sea;
pub mod payments_sea;
pub mod profiles_sea;
pub mod properties_sea;
pub mod wallets_sea;
