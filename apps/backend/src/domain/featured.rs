use time::{Duration, OffsetDateTime};

/// A paid feature counts only until it runs out.
pub fn is_featured_active(
    is_featured_paid: bool,
    featured_until: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> bool {
    is_featured_paid && featured_until.is_some_and(|until| until > now)
}

pub fn featured_until(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    now + Duration::days(days)
}
