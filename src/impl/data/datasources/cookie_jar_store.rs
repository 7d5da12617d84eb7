use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use fractic_server_error::ServerError;
use tracing::warn;

use crate::errors::{InvalidCookieValue, ReadError, WriteError};

use super::key_value_store::{expiry_after, KeyValueStore};

const EXPIRES_ATTR: &str = "; expires=";

/// File-backed cookie jar. One entry per line:
///
/// ```text
/// finance-goals=eyJzY2hlbWFWZXJzaW9uIjoyLCJkYXRhIjpbXX0; expires=2025-03-01T09:30:00.000Z
/// ```
///
/// Values are base64url encoded so arbitrary JSON stays cookie-safe. Expired
/// entries are skipped on read and dropped on the next write.
#[derive(Debug, Clone)]
pub struct CookieJarStore {
    path: PathBuf,
}

#[derive(Debug)]
struct CookieEntry {
    name: String,
    encoded_value: String,
    expires: DateTime<Utc>,
}

impl CookieEntry {
    fn parse(line: &str) -> Option<CookieEntry> {
        let (pair, expires) = line.split_once(EXPIRES_ATTR)?;
        let (name, encoded_value) = pair.split_once('=')?;
        let expires = DateTime::parse_from_rfc3339(expires.trim()).ok()?;
        Some(CookieEntry {
            name: name.to_string(),
            encoded_value: encoded_value.to_string(),
            expires: expires.with_timezone(&Utc),
        })
    }

    fn line(&self) -> String {
        format!(
            "{}={}{}{}",
            self.name,
            self.encoded_value,
            EXPIRES_ATTR,
            self.expires.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

impl CookieJarStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<CookieEntry>, ServerError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReadError::with_debug(&e)),
        };
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let entry = CookieEntry::parse(line);
                if entry.is_none() {
                    warn!(path = %self.path.display(), "Skipping malformed cookie jar line.");
                }
                entry
            })
            .collect())
    }

    fn write_entries(&self, entries: &[CookieEntry]) -> Result<(), ServerError> {
        let content: String = entries.iter().map(|e| e.line() + "\n").collect();
        fs::write(&self.path, content).map_err(|e| WriteError::with_debug(&e))
    }

    /// Live entries other than `key`.
    fn entries_without(&self, key: &str) -> Result<Vec<CookieEntry>, ServerError> {
        let now = Utc::now();
        Ok(self
            .read_entries()?
            .into_iter()
            .filter(|e| e.name != key && e.is_live(now))
            .collect())
    }
}

impl KeyValueStore for CookieJarStore {
    fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        let now = Utc::now();
        let Some(entry) = self
            .read_entries()?
            .into_iter()
            .find(|e| e.name == key && e.is_live(now))
        else {
            return Ok(None);
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(&entry.encoded_value)
            .map_err(|e| InvalidCookieValue::with_debug(key, &e))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| InvalidCookieValue::with_debug(key, &e))
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: i64) -> Result<(), ServerError> {
        let mut entries = self.entries_without(key)?;
        entries.push(CookieEntry {
            name: key.to_string(),
            encoded_value: URL_SAFE_NO_PAD.encode(value),
            expires: expiry_after(Utc::now(), ttl_days),
        });
        self.write_entries(&entries)
    }

    fn delete(&mut self, key: &str) -> Result<(), ServerError> {
        let entries = self.entries_without(key)?;
        self.write_entries(&entries)
    }
}
