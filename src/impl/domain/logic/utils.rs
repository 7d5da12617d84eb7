use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// UTC midnight at the start of the given date.
///
/// Plain calendar dates (YYYY-MM-DD) are always interpreted this way, both for
/// window filtering and for deadlines.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Days from `now` until the start of `date`, rounded up.
///
/// Tomorrow yields 1 and yesterday -1 at any time of day, including exactly
/// at midnight; the current date yields 0.
pub(crate) fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    ceil_div((start_of_day(date) - now).num_milliseconds(), MS_PER_DAY)
}

fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b > 0 {
        q + 1
    } else {
        q
    }
}

/// Same calendar day `n` months earlier, clamped to the end of shorter months
/// (March 31 minus one month is the last day of February).
pub(crate) fn months_before(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(n))
        .unwrap_or(NaiveDate::MIN)
}

/// `n` days earlier, saturating at the earliest representable date.
pub(crate) fn days_before(date: NaiveDate, n: i64) -> NaiveDate {
    Duration::try_days(n)
        .and_then(|d| date.checked_sub_signed(d))
        .unwrap_or(NaiveDate::MIN)
}

/// Opaque id derived from the creation timestamp in milliseconds. Bumped until
/// it no longer collides with an existing id.
pub(crate) fn timestamp_id<F>(now: DateTime<Utc>, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut candidate = now.timestamp_millis();
    while is_taken(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Guarded ratio in percent; zero denominators yield zero instead of NaN.
pub(crate) fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        0.0
    } else {
        part / total * 100.0
    }
}
