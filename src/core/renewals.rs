//! Time-windowed renewal filtering for the "upcoming renewals" views.
//!
//! The current time is always injected by the caller so the window math stays
//! deterministic under test.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::core::model::Subscription;

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Active subscriptions whose renewal date falls within `window_days` of
/// `now`, soonest first. Ties keep their input order. Callers truncate for
/// display; the full matching set is returned.
pub fn upcoming_renewals<'a>(
    subscriptions: &'a [Subscription],
    now: DateTime<Utc>,
    window_days: u32,
) -> Vec<&'a Subscription> {
    let window_end = now + Duration::days(i64::from(window_days));

    let mut due: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|sub| sub.is_active())
        .filter(|sub| {
            let renewal = at_midnight(sub.renewal_date);
            renewal >= now && renewal <= window_end
        })
        .collect();

    // sort_by_key is stable, preserving input order on equal dates.
    due.sort_by_key(|sub| sub.renewal_date);
    due
}

/// Whole days until `renewal`, rounded up. Non-negative for any subscription
/// accepted by [`upcoming_renewals`].
pub fn days_until(renewal: NaiveDate, now: DateTime<Utc>) -> i64 {
    let secs = (at_midnight(renewal) - now).num_seconds();
    // Ceiling division; `i64::div_ceil` is still unstable (int_roundings).
    secs / 86_400 + i64::from(secs % 86_400 > 0)
}
