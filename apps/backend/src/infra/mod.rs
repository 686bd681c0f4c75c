//! Pool connection and migrations, DB error mapping and `AppState` assembly.

pub mod db;
pub mod db_errors;
pub mod state;
