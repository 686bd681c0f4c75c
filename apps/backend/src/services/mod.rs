pub mod alerts;
pub mod payments;
pub mod profiles;
pub mod properties;
pub mod simulators;
pub mod wallet;
