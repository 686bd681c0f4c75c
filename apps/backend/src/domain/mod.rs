//! Pure business rules. Nothing in here touches the database or HTTP.

pub mod alert_matching;
pub mod banks;
pub mod credit;
pub mod featured;
pub mod listing;
pub mod money;
pub mod property_code;
pub mod publication;
pub mod savings;
pub mod search;
