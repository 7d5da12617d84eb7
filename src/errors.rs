use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file.");
define_internal_error!(StoreError, "Key-value store failure for key '{key}'.", { key: &str });

// Parsing-related.
define_client_error!(InvalidJson, "Invalid {json_type} (invalid JSON format).", { json_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(InvalidTimestamp, "Invalid RFC 3339 timestamp: {value}.", { value: &str });
define_client_error!(UnknownKey, "Unknown {kind} '{key}'.", { kind: &str, key: &str });
define_client_error!(
    InvalidCookieValue,
    "Stored value for '{key}' is not valid base64-encoded UTF-8.",
    { key: &str }
);
define_client_error!(
    UnsupportedSchemaVersion,
    "Snapshot schema version {version} is newer than the supported version {supported}.",
    { version: u64, supported: u64 }
);

// Serialization-related.
define_internal_error!(SerializationError, "Failed to serialize {what}.", { what: &str });
define_internal_error!(CsvWriteError, "Failed to write CSV output.");

// Validation-related.
define_client_error!(
    InvalidAmount,
    "Invalid amount: {amount}. Amounts must be finite and greater than zero.",
    { amount: f64 }
);
define_client_error!(
    InvalidTargetAmount,
    "Invalid goal target: {amount}. Targets must be finite and not negative.",
    { amount: f64 }
);
define_client_error!(EmptyGoalTitle, "Goal title cannot be empty.");
define_client_error!(EmptyQuoteText, "Quote text cannot be empty.");

// State-related.
define_client_error!(TransactionNotFound, "No transaction with id '{id}'.", { id: &str });
define_client_error!(GoalNotFound, "No goal with id '{id}'.", { id: &str });
define_client_error!(CustomQuoteNotFound, "No custom quote with id '{id}'.", { id: &str });

// Export-related.
define_client_error!(
    NothingToExport,
    "No data to export for the selected criteria ({data_type}, {window}).",
    { data_type: &str, window: &str }
);
