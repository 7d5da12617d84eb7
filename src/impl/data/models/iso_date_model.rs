use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use fractic_server_error::ServerError;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidIsoDate;

/// Calendar date persisted as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ISODateModel(NaiveDate);

impl FromStr for ISODateModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| InvalidIsoDate::with_debug(s, &e))?;
        Ok(ISODateModel(d))
    }
}

impl<'de> Deserialize<'de> for ISODateModel {
    fn deserialize<D>(deserializer: D) -> Result<ISODateModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ISODateModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ISODateModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl fmt::Display for ISODateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<ISODateModel> for NaiveDate {
    fn from(model: ISODateModel) -> Self {
        model.0
    }
}

impl From<NaiveDate> for ISODateModel {
    fn from(date: NaiveDate) -> Self {
        ISODateModel(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_iso_dates() {
        let d: ISODateModel = "2024-02-29".parse().unwrap();
        assert_eq!(NaiveDate::from(d), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-02-29\"");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!("02/29/2024".parse::<ISODateModel>().is_err());
        assert!("2023-02-29".parse::<ISODateModel>().is_err());
        assert!(serde_json::from_str::<ISODateModel>("\"tomorrow\"").is_err());
    }
}
