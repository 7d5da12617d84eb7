use chrono::{DateTime, Duration, Utc};
use fractic_server_error::ServerError;

/// 9999-12-31T23:59:59Z, the last instant an RFC 3339 timestamp can spell.
const LATEST_EXPIRY_SECS: i64 = 253_402_300_799;

/// Named string blobs with a per-entry expiry, in the manner of browser
/// cookies. No atomicity across keys.
pub trait KeyValueStore {
    /// Current value, or `None` when the key is absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>, ServerError>;

    fn set(&mut self, key: &str, value: &str, ttl_days: i64) -> Result<(), ServerError>;

    /// Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), ServerError>;
}

/// Expiry of an entry written at `now` with the given TTL. Saturates at the
/// year 9999; a TTL too negative to represent expires immediately.
pub(crate) fn expiry_after(now: DateTime<Utc>, ttl_days: i64) -> DateTime<Utc> {
    let latest =
        DateTime::from_timestamp(LATEST_EXPIRY_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC);
    match Duration::try_days(ttl_days).and_then(|ttl| now.checked_add_signed(ttl)) {
        Some(expires) => expires.min(latest),
        None if ttl_days < 0 => now,
        None => latest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn regular_ttl_adds_days() {
        let expires = expiry_after(now(), 365);
        assert_eq!(expires.to_rfc3339(), "2025-06-15T12:00:00+00:00");
    }

    #[test]
    fn huge_ttl_saturates() {
        let latest = DateTime::from_timestamp(LATEST_EXPIRY_SECS, 0).unwrap();
        assert_eq!(latest.to_rfc3339(), "9999-12-31T23:59:59+00:00");
        assert_eq!(expiry_after(now(), 1_000_000_000), latest);
        assert_eq!(expiry_after(now(), i64::MAX), latest);
    }

    #[test]
    fn huge_negative_ttl_is_already_expired() {
        assert_eq!(expiry_after(now(), i64::MIN), now());
        assert!(expiry_after(now(), -1) < now());
    }
}
