use std::sync::Arc;

use super::{app_config::AppConfig, custom_quote::CustomQuote, goal::Goal, transaction::Transaction};

/// Immutable snapshot of everything the tracker owns.
///
/// Collections sit behind `Arc` so a command that touches one collection
/// shares the others with the previous snapshot; `Arc::ptr_eq` tells whether a
/// collection changed between two snapshots.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub transactions: Arc<Vec<Transaction>>,
    pub goals: Arc<Vec<Goal>>,
    pub custom_quotes: Arc<Vec<CustomQuote>>,
    pub config: Arc<AppConfig>,
}

/// What a command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateChange {
    pub transactions: bool,
    pub goals: bool,
    pub custom_quotes: bool,
    pub config: bool,
    /// Everything was wiped, persisted copies included.
    pub cleared: bool,
}

impl StateChange {
    pub fn transactions() -> Self {
        Self {
            transactions: true,
            ..Default::default()
        }
    }

    pub fn goals() -> Self {
        Self {
            goals: true,
            ..Default::default()
        }
    }

    pub fn custom_quotes() -> Self {
        Self {
            custom_quotes: true,
            ..Default::default()
        }
    }

    pub fn config() -> Self {
        Self {
            config: true,
            ..Default::default()
        }
    }

    pub fn cleared() -> Self {
        Self {
            transactions: true,
            goals: true,
            custom_quotes: true,
            config: true,
            cleared: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.transactions || self.goals || self.custom_quotes || self.config || self.cleared)
    }
}

/// Collections read from an import document. Absent keys leave the current
/// collection alone.
#[derive(Debug, Clone, Default)]
pub struct ImportData {
    pub transactions: Option<Vec<Transaction>>,
    pub goals: Option<Vec<Goal>>,
    pub custom_quotes: Option<Vec<CustomQuote>>,
    pub config: Option<AppConfig>,
}
