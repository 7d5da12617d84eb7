use std::sync::Arc;

use fractic_server_error::ServerError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
    data::{
        datasources::key_value_store::KeyValueStore,
        models::{
            app_config_model::AppConfigModel,
            custom_quote_model::CustomQuoteModel,
            goal_model::GoalModel,
            snapshot_model::{unwrap, wrap},
            transaction_model::TransactionModel,
        },
    },
    domain::repositories::snapshot_repository::SnapshotRepository,
    entities::{AppConfig, AppState, CustomQuote, Goal, StateChange, Transaction},
    errors::StoreError,
};

pub(crate) const TRANSACTIONS_KEY: &str = "finance-transactions";
pub(crate) const GOALS_KEY: &str = "finance-goals";
pub(crate) const CUSTOM_QUOTES_KEY: &str = "finance-custom-quotes";
pub(crate) const CONFIG_KEY: &str = "finance-app-config";

pub(crate) const ALL_KEYS: [&str; 4] = [TRANSACTIONS_KEY, GOALS_KEY, CUSTOM_QUOTES_KEY, CONFIG_KEY];

pub(crate) const DEFAULT_TTL_DAYS: i64 = 365;

pub(crate) struct SnapshotRepositoryImpl<S: KeyValueStore> {
    store: S,
    ttl_days: i64,
}

impl<S: KeyValueStore> SnapshotRepositoryImpl<S> {
    pub(crate) fn new(store: S) -> Self {
        Self::with_ttl(store, DEFAULT_TTL_DAYS)
    }

    pub(crate) fn with_ttl(store: S, ttl_days: i64) -> Self {
        Self { store, ttl_days }
    }

    /// Decoded blob under `key`, or `None` (logged) when it is absent or
    /// unreadable.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = ?e, "Failed to read persisted data; using defaults.");
                return None;
            }
        };
        match unwrap(&raw, key) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(key, error = ?e, "Failed to parse persisted data; using defaults.");
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, data: &T) -> Result<(), ServerError> {
        let raw = wrap(data, key)?;
        self.store
            .set(key, &raw, self.ttl_days)
            .map_err(|e| StoreError::with_debug(key, &e))
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        self.read::<Vec<TransactionModel>>(TRANSACTIONS_KEY)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|model| match Transaction::try_from(model) {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!(error = ?e, "Dropping unreadable persisted transaction.");
                    None
                }
            })
            .collect()
    }

    fn load_goals(&self) -> Vec<Goal> {
        self.read::<Vec<GoalModel>>(GOALS_KEY)
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    fn load_custom_quotes(&self) -> Vec<CustomQuote> {
        self.read::<Vec<CustomQuoteModel>>(CUSTOM_QUOTES_KEY)
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    fn load_config(&self) -> AppConfig {
        let base = AppConfig::default();
        match self.read::<AppConfigModel>(CONFIG_KEY) {
            Some(model) => model.merge_onto(&base),
            None => base,
        }
    }
}

impl<S: KeyValueStore> SnapshotRepository for SnapshotRepositoryImpl<S> {
    fn load(&self) -> AppState {
        AppState {
            transactions: Arc::new(self.load_transactions()),
            goals: Arc::new(self.load_goals()),
            custom_quotes: Arc::new(self.load_custom_quotes()),
            config: Arc::new(self.load_config()),
        }
    }

    /// Attempts every changed collection, and reports the first failure.
    fn save(&mut self, state: &AppState, change: StateChange) -> Result<(), ServerError> {
        let mut results = Vec::new();
        if change.transactions {
            let models: Vec<TransactionModel> = state.transactions.iter().map(Into::into).collect();
            results.push(self.write(TRANSACTIONS_KEY, &models));
        }
        if change.goals {
            let models: Vec<GoalModel> = state.goals.iter().map(Into::into).collect();
            results.push(self.write(GOALS_KEY, &models));
        }
        if change.custom_quotes {
            let models: Vec<CustomQuoteModel> =
                state.custom_quotes.iter().map(Into::into).collect();
            results.push(self.write(CUSTOM_QUOTES_KEY, &models));
        }
        if change.config {
            results.push(self.write(CONFIG_KEY, &AppConfigModel::from(state.config.as_ref())));
        }
        results.into_iter().collect::<Result<(), _>>()?;
        debug!(?change, "Persisted state.");
        Ok(())
    }

    /// Attempts every key, and reports the first failure.
    fn clear(&mut self) -> Result<(), ServerError> {
        let mut result = Ok(());
        for key in ALL_KEYS {
            let deleted = self
                .store
                .delete(key)
                .map_err(|e| StoreError::with_debug(key, &e));
            if result.is_ok() {
                result = deleted;
            }
        }
        result
    }
}

#[cfg(test)]
impl<S: KeyValueStore> SnapshotRepositoryImpl<S> {
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
