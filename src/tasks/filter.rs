use chrono::{DateTime, Duration, Utc};

/// Inclusive timestamp window produced by `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;
const YEAR_DAYS: i64 = 365;

/// Resolves a named filter key into a trailing window ending at `now`.
///
/// "week" covers today and the 6 days before it, "month" the trailing 30
/// days, "year" the trailing 365. Matching is case-sensitive; any other key
/// (or an empty one) falls back to the week window. The window runs from
/// start-of-day to 23:59:59.999 so due dates anywhere on the boundary days
/// are included.
///
/// `now` is always injected by the caller; this function never reads the
/// wall clock.
pub fn resolve(filter_key: &str, now: DateTime<Utc>) -> DateRange {
    let days = match filter_key {
        "month" => MONTH_DAYS,
        "year" => YEAR_DAYS,
        _ => WEEK_DAYS, // "week" and anything unrecognized
    };
    DateRange {
        start: start_of_day(now - Duration::days(days - 1)),
        end: end_of_day(now),
    }
}

fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is a valid time")
        .and_utc()
}
