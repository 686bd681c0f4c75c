//! Helpers shared by the backend's unit and integration tests: idempotent
//! logging setup, Problem Details assertions and unique value generators.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
