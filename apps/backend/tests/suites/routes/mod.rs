pub mod alerts;
pub mod auth_guard;
pub mod healthcheck;
pub mod owner_listings;
pub mod payments;
pub mod profile;
pub mod public_listings;
pub mod security_headers;
pub mod simulators;
pub mod validated_json;
pub mod wallet;
