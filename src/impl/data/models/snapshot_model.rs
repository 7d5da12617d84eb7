use fractic_server_error::ServerError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::{InvalidJson, SerializationError, UnsupportedSchemaVersion};

pub(crate) const SCHEMA_VERSION: u64 = 2;

const SCHEMA_KEY: &str = "schemaVersion";
const DATA_KEY: &str = "data";

/// Versioned wrapper around every persisted blob:
/// `{"schemaVersion": 2, "data": ...}`.
#[derive(Debug, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeModel<'a, T: Serialize> {
    schema_version: u64,
    data: &'a T,
}

pub(crate) fn wrap<T: Serialize>(data: &T, what: &str) -> Result<String, ServerError> {
    serde_json::to_string(&EnvelopeModel {
        schema_version: SCHEMA_VERSION,
        data,
    })
    .map_err(|e| SerializationError::with_debug(what, &e))
}

/// Reads a blob written by [`wrap`], or a bare payload from before the
/// envelope existed (treated as version 1 and migrated).
pub(crate) fn unwrap<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T, ServerError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| InvalidJson::with_debug(what, &e))?;
    let (version, mut data) = split_envelope(value);
    if version > SCHEMA_VERSION {
        return Err(UnsupportedSchemaVersion::new(version, SCHEMA_VERSION));
    }
    if version < 2 {
        normalize_legacy_records(&mut data);
    }
    serde_json::from_value(data).map_err(|e| InvalidJson::with_debug(what, &e))
}

fn split_envelope(value: Value) -> (u64, Value) {
    match value {
        Value::Object(mut map) if map.contains_key(SCHEMA_KEY) => {
            let version = map.get(SCHEMA_KEY).and_then(Value::as_u64).unwrap_or(0);
            let data = map.remove(DATA_KEY).unwrap_or(Value::Null);
            (version, data)
        }
        bare => (1, bare),
    }
}

/// Version 1 records used numeric ids and had no `tags`. Rewrites such records
/// in place; anything that is not an array of objects is left untouched.
pub(crate) fn normalize_legacy_records(value: &mut Value) {
    let Value::Array(records) = value else {
        return;
    };
    for record in records.iter_mut() {
        let Value::Object(fields) = record else {
            continue;
        };
        if let Some(Value::Number(n)) = fields.get("id") {
            let id = match (n.as_u64(), n.as_i64()) {
                (Some(u), _) => u.to_string(),
                (None, Some(i)) => i.to_string(),
                _ => n.to_string(),
            };
            fields.insert("id".to_string(), Value::String(id));
        }
        // Only transactions carry a type, and only transactions carry tags.
        if fields.contains_key("type") && !fields.contains_key("tags") {
            fields.insert("tags".to_string(), Value::Array(Vec::new()));
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::models::transaction_model::TransactionModel;

    #[test]
    fn wraps_payload_in_envelope() {
        let raw = wrap(&vec![1, 2], "numbers").unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({"schemaVersion": 2, "data": [1, 2]}));
        assert_eq!(unwrap::<Vec<i32>>(&raw, "numbers").unwrap(), vec![1, 2]);
    }

    #[test]
    fn migrates_bare_version_1_payload() {
        let raw = r#"[{"id":1704067200000,"type":"income","amount":10,"date":"2024-01-01"}]"#;
        let models: Vec<TransactionModel> = unwrap(raw, "transactions").unwrap();
        assert_eq!(models[0].id, "1704067200000");
        assert!(models[0].tags.is_empty());
    }

    #[test]
    fn legacy_goals_get_string_ids_but_no_tags() {
        let mut value = json!([{"id": 5, "title": "Car"}, "not a record"]);
        normalize_legacy_records(&mut value);
        assert_eq!(value, json!([{"id": "5", "title": "Car"}, "not a record"]));
    }

    #[test]
    fn rejects_newer_schema() {
        let raw = r#"{"schemaVersion":3,"data":[]}"#;
        assert!(unwrap::<Vec<TransactionModel>>(raw, "transactions").is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(unwrap::<Vec<TransactionModel>>("[{", "transactions").is_err());
        assert!(unwrap::<Vec<TransactionModel>>(r#"{"a":1}"#, "transactions").is_err());
    }
}
