use std::str::FromStr;

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    entities::{AppConfig, AppState, ImportData, Transaction},
    errors::{InvalidJson, SerializationError},
};

use super::{
    app_config_model::AppConfigModel, custom_quote_model::CustomQuoteModel, goal_model::GoalModel,
    snapshot_model::normalize_legacy_records, timestamp_model::TimestampModel,
    transaction_model::TransactionModel,
};

/// Full-state backup document.
#[derive(Debug, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackupModel {
    transactions: Vec<TransactionModel>,
    goals: Vec<GoalModel>,
    custom_quotes: Vec<CustomQuoteModel>,
    config: AppConfigModel,
    export_date: TimestampModel,
}

impl BackupModel {
    pub(crate) fn from_state(state: &AppState, now: DateTime<Utc>) -> Self {
        BackupModel {
            transactions: state.transactions.iter().map(Into::into).collect(),
            goals: state.goals.iter().map(Into::into).collect(),
            custom_quotes: state.custom_quotes.iter().map(Into::into).collect(),
            config: state.config.as_ref().into(),
            export_date: now.into(),
        }
    }
}

/// The three user collections, as measured for data stats.
#[derive(Debug, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionsModel {
    transactions: Vec<TransactionModel>,
    goals: Vec<GoalModel>,
    custom_quotes: Vec<CustomQuoteModel>,
}

/// Byte length of the compact JSON form of the user collections.
pub(crate) fn collections_size(state: &AppState) -> Result<usize, ServerError> {
    let collections = CollectionsModel {
        transactions: state.transactions.iter().map(Into::into).collect(),
        goals: state.goals.iter().map(Into::into).collect(),
        custom_quotes: state.custom_quotes.iter().map(Into::into).collect(),
    };
    serde_json::to_vec(&collections)
        .map(|bytes| bytes.len())
        .map_err(|e| SerializationError::with_debug("collections", &e))
}

/// Import document. Every key is optional; keys holding something other than
/// an array (or an object, for `config`) are ignored.
#[derive(Debug, Default)]
pub(crate) struct ImportModel {
    transactions: Option<Vec<TransactionModel>>,
    goals: Option<Vec<GoalModel>>,
    custom_quotes: Option<Vec<CustomQuoteModel>>,
    config: Option<AppConfigModel>,
}

impl FromStr for ImportModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug("import file", &e))?;
        let Value::Object(mut document) = value else {
            return Err(InvalidJson::new("import file"));
        };
        Ok(ImportModel {
            transactions: take_records(&mut document, "transactions")?,
            goals: take_records(&mut document, "goals")?,
            custom_quotes: take_records(&mut document, "customQuotes")?,
            config: match document.remove("config") {
                Some(config @ Value::Object(_)) => Some(
                    serde_json::from_value(config)
                        .map_err(|e| InvalidJson::with_debug("config", &e))?,
                ),
                _ => None,
            },
        })
    }
}

fn take_records<T: DeserializeOwned>(
    document: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<T>>, ServerError> {
    match document.remove(key) {
        Some(mut records @ Value::Array(_)) => {
            normalize_legacy_records(&mut records);
            serde_json::from_value(records)
                .map(Some)
                .map_err(|e| InvalidJson::with_debug(key, &e))
        }
        _ => Ok(None),
    }
}

impl TryFrom<ImportModel> for ImportData {
    type Error = ServerError;

    fn try_from(model: ImportModel) -> Result<Self, Self::Error> {
        Ok(ImportData {
            transactions: model
                .transactions
                .map(|ts| ts.into_iter().map(Transaction::try_from).collect())
                .transpose()?,
            goals: model
                .goals
                .map(|gs| gs.into_iter().map(Into::into).collect()),
            custom_quotes: model
                .custom_quotes
                .map(|qs| qs.into_iter().map(Into::into).collect()),
            config: model
                .config
                .map(|c| c.merge_onto(&AppConfig::default())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(raw: &str) -> Result<ImportData, ServerError> {
        ImportData::try_from(raw.parse::<ImportModel>()?)
    }

    #[test]
    fn absent_and_non_array_keys_are_ignored() {
        let data = import(r#"{"transactions":"nope","goals":[],"customQuotes":null}"#).unwrap();
        assert!(data.transactions.is_none());
        assert_eq!(data.goals, Some(vec![]));
        assert!(data.custom_quotes.is_none());
        assert!(data.config.is_none());
    }

    #[test]
    fn config_is_merged_onto_default() {
        let data = import(r#"{"config":{"currency":"EUR","notifications":{"enabled":false}}}"#)
            .unwrap();
        let config = data.config.unwrap();
        assert_eq!(config.currency, "EUR");
        assert!(!config.notifications.enabled);
        assert_eq!(config.notifications.reminder_days, 7);
    }

    #[test]
    fn accepts_legacy_numeric_ids() {
        let data = import(
            r#"{"transactions":[{"id":17,"type":"expense","amount":3,"date":"2024-05-01"}]}"#,
        )
        .unwrap();
        let transactions = data.transactions.unwrap();
        assert_eq!(transactions[0].id.as_str(), "17");
        assert!(transactions[0].tags.is_empty());
    }

    #[test]
    fn empty_collections_size() {
        // {"transactions":[],"goals":[],"customQuotes":[]}
        assert_eq!(collections_size(&AppState::default()).unwrap(), 48);
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(import("{").is_err());
        assert!(import("[]").is_err());
        assert!(import(r#"{"goals":[{"title":"no id"}]}"#).is_err());
    }
}
