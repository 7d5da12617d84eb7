use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use fractic_server_error::ServerError;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidTimestamp;

/// Instant persisted as RFC 3339 with millisecond precision, e.g.
/// `2024-03-01T09:30:00.000Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimestampModel(DateTime<Utc>);

impl FromStr for TimestampModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = DateTime::parse_from_rfc3339(s)
            .map_err(|e| InvalidTimestamp::with_debug(s, &e))?;
        Ok(TimestampModel(t.with_timezone(&Utc)))
    }
}

impl<'de> Deserialize<'de> for TimestampModel {
    fn deserialize<D>(deserializer: D) -> Result<TimestampModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimestampModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for TimestampModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<TimestampModel> for DateTime<Utc> {
    fn from(model: TimestampModel) -> Self {
        model.0
    }
}

impl From<DateTime<Utc>> for TimestampModel {
    fn from(t: DateTime<Utc>) -> Self {
        TimestampModel(t)
    }
}
