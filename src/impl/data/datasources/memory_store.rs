use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;

use super::key_value_store::{expiry_after, KeyValueStore};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, (String, DateTime<Utc>)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ServerError> {
        Ok(self
            .entries
            .get(key)
            .filter(|(_, expires)| *expires > Utc::now())
            .map(|(value, _)| value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: i64) -> Result<(), ServerError> {
        let expires = expiry_after(Utc::now(), ttl_days);
        self.entries
            .insert(key.to_string(), (value.to_string(), expires));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), ServerError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v", 365).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.delete("k").unwrap();
    }

    #[test]
    fn very_long_ttl_is_accepted() {
        let mut store = InMemoryStore::new();
        store.set("k", "v", 1_000_000_000).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn expired_entries_read_as_absent() {
        let mut store = InMemoryStore::new();
        store.set("k", "v", 0).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
