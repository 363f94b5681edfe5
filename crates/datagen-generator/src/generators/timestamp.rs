//! Date value generator.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

/// How far back generated dates may go.
pub const MAX_DAYS_BACK: i64 = 365 * 10;

/// Generate `now` minus a uniform number of whole days in `[0, 3650]`.
pub fn generate_date<R: Rng>(rng: &mut R, now: NaiveDateTime) -> NaiveDateTime {
    now - Duration::days(rng.random_range(0..=MAX_DAYS_BACK))
}
