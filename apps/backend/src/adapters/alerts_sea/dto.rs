//! DTOs for alerts_sea adapter.

use uuid::Uuid;

use crate::domain::alert_matching::AlertCriteria;

#[derive(Debug, Clone)]
pub struct AlertCreate {
    pub user_id: Uuid,
    pub criteria: AlertCriteria,
}
