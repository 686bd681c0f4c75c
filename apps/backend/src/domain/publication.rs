//! Publication lifecycle of a listing.

use serde::Serialize;

use crate::entities::properties::PublicationStatus;

/// Targets reachable from `from`.
pub fn allowed_targets(from: PublicationStatus) -> &'static [PublicationStatus] {
    use PublicationStatus::*;
    match from {
        PendingPayment => &[Published, Rejected],
        Published => &[Expired, Rejected],
        Expired => &[Published, Rejected],
        Rejected => &[],
    }
}

pub fn can_transition(from: PublicationStatus, to: PublicationStatus) -> bool {
    allowed_targets(from).contains(&to)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Default,
    Secondary,
    Destructive,
}

/// Dashboard badge for a publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

pub fn badge(status: PublicationStatus) -> Badge {
    let (label, tone) = match status {
        PublicationStatus::PendingPayment => ("Pendiente de Pago", BadgeTone::Destructive),
        PublicationStatus::Published => ("Publicada", BadgeTone::Default),
        PublicationStatus::Expired => ("Expirada", BadgeTone::Secondary),
        PublicationStatus::Rejected => ("Rechazada", BadgeTone::Destructive),
    };
    Badge { label, tone }
}
