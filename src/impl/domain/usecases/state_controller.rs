use std::sync::Arc;

use chrono::{DateTime, SubsecRound as _, Utc};
use fractic_server_error::ServerError;
use tracing::{debug, info};

use crate::{
    domain::logic::{aggregator::apply_retention, utils::timestamp_id},
    entities::{
        AppConfig, AppState, CustomQuote, CustomQuoteDraft, CustomQuoteId, Goal, GoalDraft, GoalId,
        ImportData, StateChange, Transaction, TransactionDraft, TransactionId,
    },
    errors::{
        CustomQuoteNotFound, EmptyGoalTitle, EmptyQuoteText, GoalNotFound, InvalidAmount,
        InvalidTargetAmount, TransactionNotFound,
    },
};

const UNKNOWN_AUTHOR: &str = "Unknown";

/// Receives every state change made after the initial load.
pub trait StateObserver {
    fn on_change(&mut self, state: &AppState, change: StateChange);
}

/// Owns the application state. Every command either produces a new snapshot
/// (and notifies observers) or fails without touching the current one.
pub(crate) struct StateController {
    state: AppState,
    observers: Vec<Box<dyn StateObserver>>,
    hydrated: bool,
    clock: fn() -> DateTime<Utc>,
}

impl StateController {
    pub(crate) fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub(crate) fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            state: AppState::default(),
            observers: Vec::new(),
            hydrated: false,
            clock,
        }
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Installs the initially loaded state. Observers are not notified for
    /// it, and are not notified of anything before it.
    pub(crate) fn hydrate(&mut self, state: AppState) -> AppState {
        self.state = state;
        self.hydrated = true;
        self.state.clone()
    }

    fn commit(&mut self, state: AppState, change: StateChange) -> AppState {
        self.state = state;
        if change.is_empty() {
            return self.state.clone();
        }
        debug!(?change, hydrated = self.hydrated, "State changed.");
        if self.hydrated {
            for observer in self.observers.iter_mut() {
                observer.on_change(&self.state, change);
            }
        }
        self.state.clone()
    }

    fn with_transactions(&self, transactions: Vec<Transaction>) -> AppState {
        AppState {
            transactions: Arc::new(transactions),
            ..self.state.clone()
        }
    }

    // Transactions.
    // ---

    pub(crate) fn add_transaction(&mut self, draft: TransactionDraft) -> Result<AppState, ServerError> {
        validate_amount(draft.amount)?;
        let id = timestamp_id((self.clock)(), |candidate| {
            self.state.transactions.iter().any(|t| t.id.as_str() == candidate)
        });
        let mut transactions = self.state.transactions.as_ref().clone();
        transactions.push(draft.into_transaction(id.into()));
        let state = self.with_transactions(transactions);
        Ok(self.commit(state, StateChange::transactions()))
    }

    /// Replaces the transaction with the same id wholesale.
    pub(crate) fn update_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<AppState, ServerError> {
        validate_amount(transaction.amount)?;
        let position = self
            .state
            .transactions
            .iter()
            .position(|t| t.id == transaction.id)
            .ok_or_else(|| TransactionNotFound::new(transaction.id.as_str()))?;
        let mut transactions = self.state.transactions.as_ref().clone();
        transactions[position] = transaction;
        let state = self.with_transactions(transactions);
        Ok(self.commit(state, StateChange::transactions()))
    }

    pub(crate) fn delete_transaction(&mut self, id: &TransactionId) -> Result<AppState, ServerError> {
        if !self.state.transactions.iter().any(|t| &t.id == id) {
            return Err(TransactionNotFound::new(id.as_str()));
        }
        let transactions = self
            .state
            .transactions
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect();
        let state = self.with_transactions(transactions);
        Ok(self.commit(state, StateChange::transactions()))
    }

    /// Drops transactions older than the configured retention period.
    pub(crate) fn apply_retention(&mut self) -> AppState {
        let retention_days = self.state.config.data.data_retention_days;
        let kept = apply_retention(&self.state.transactions, retention_days, (self.clock)());
        if kept.len() == self.state.transactions.len() {
            return self.state.clone();
        }
        info!(
            removed = self.state.transactions.len() - kept.len(),
            retention_days, "Applied data retention."
        );
        let state = self.with_transactions(kept);
        self.commit(state, StateChange::transactions())
    }

    // Goals.
    // ---

    pub(crate) fn add_goal(&mut self, draft: GoalDraft) -> Result<AppState, ServerError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(EmptyGoalTitle::new());
        }
        if !draft.target_amount.is_finite() || draft.target_amount < 0.0 {
            return Err(InvalidTargetAmount::new(draft.target_amount));
        }
        let id = timestamp_id((self.clock)(), |candidate| {
            self.state.goals.iter().any(|g| g.id.as_str() == candidate)
        });
        let draft = GoalDraft {
            title: title.to_string(),
            ..draft
        };
        let mut goals = self.state.goals.as_ref().clone();
        goals.push(draft.into_goal(id.into()));
        let state = AppState {
            goals: Arc::new(goals),
            ..self.state.clone()
        };
        Ok(self.commit(state, StateChange::goals()))
    }

    /// Sets the saved amount, clamped to [0, target].
    pub(crate) fn update_goal(&mut self, id: &GoalId, amount: f64) -> Result<AppState, ServerError> {
        self.map_goal(id, |g| g.with_current_amount(amount))
    }

    pub(crate) fn add_goal_funds(&mut self, id: &GoalId, delta: f64) -> Result<AppState, ServerError> {
        validate_amount(delta)?;
        self.map_goal(id, |g| g.with_added_funds(delta))
    }

    fn map_goal<F>(&mut self, id: &GoalId, f: F) -> Result<AppState, ServerError>
    where
        F: Fn(&Goal) -> Goal,
    {
        let position = self
            .state
            .goals
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| GoalNotFound::new(id.as_str()))?;
        let mut goals = self.state.goals.as_ref().clone();
        goals[position] = f(&goals[position]);
        let state = AppState {
            goals: Arc::new(goals),
            ..self.state.clone()
        };
        Ok(self.commit(state, StateChange::goals()))
    }

    // Custom quotes.
    // ---

    pub(crate) fn add_custom_quote(
        &mut self,
        draft: CustomQuoteDraft,
    ) -> Result<AppState, ServerError> {
        let (text, author) = normalize_quote(&draft)?;
        let now = (self.clock)();
        let id = timestamp_id(now, |candidate| {
            self.state.custom_quotes.iter().any(|q| q.id.as_str() == candidate)
        });
        let mut quotes = self.state.custom_quotes.as_ref().clone();
        // Persisted timestamps carry milliseconds only.
        quotes.push(CustomQuote {
            id: id.into(),
            text,
            author,
            date_added: now.trunc_subsecs(3),
        });
        Ok(self.commit_quotes(quotes))
    }

    /// Changes text and author; `date_added` is kept.
    pub(crate) fn update_custom_quote(
        &mut self,
        id: &CustomQuoteId,
        draft: CustomQuoteDraft,
    ) -> Result<AppState, ServerError> {
        let (text, author) = normalize_quote(&draft)?;
        let position = self
            .state
            .custom_quotes
            .iter()
            .position(|q| &q.id == id)
            .ok_or_else(|| CustomQuoteNotFound::new(id.as_str()))?;
        let mut quotes = self.state.custom_quotes.as_ref().clone();
        quotes[position].text = text;
        quotes[position].author = author;
        Ok(self.commit_quotes(quotes))
    }

    pub(crate) fn delete_custom_quote(
        &mut self,
        id: &CustomQuoteId,
    ) -> Result<AppState, ServerError> {
        if !self.state.custom_quotes.iter().any(|q| &q.id == id) {
            return Err(CustomQuoteNotFound::new(id.as_str()));
        }
        let quotes = self
            .state
            .custom_quotes
            .iter()
            .filter(|q| &q.id != id)
            .cloned()
            .collect();
        Ok(self.commit_quotes(quotes))
    }

    fn commit_quotes(&mut self, quotes: Vec<CustomQuote>) -> AppState {
        let state = AppState {
            custom_quotes: Arc::new(quotes),
            ..self.state.clone()
        };
        self.commit(state, StateChange::custom_quotes())
    }

    // Config.
    // ---

    pub(crate) fn update_config(&mut self, config: AppConfig) -> AppState {
        let state = AppState {
            config: Arc::new(config),
            ..self.state.clone()
        };
        self.commit(state, StateChange::config())
    }

    pub(crate) fn reset_config(&mut self) -> AppState {
        self.update_config(AppConfig::default())
    }

    // Bulk.
    // ---

    /// Replaces every collection present in `data`.
    pub(crate) fn import(&mut self, data: ImportData) -> AppState {
        let mut change = StateChange::default();
        let mut state = self.state.clone();
        if let Some(transactions) = data.transactions {
            state.transactions = Arc::new(transactions);
            change.transactions = true;
        }
        if let Some(goals) = data.goals {
            state.goals = Arc::new(goals);
            change.goals = true;
        }
        if let Some(quotes) = data.custom_quotes {
            state.custom_quotes = Arc::new(quotes);
            change.custom_quotes = true;
        }
        if let Some(config) = data.config {
            state.config = Arc::new(config);
            change.config = true;
        }
        info!(
            transactions = state.transactions.len(),
            goals = state.goals.len(),
            custom_quotes = state.custom_quotes.len(),
            ?change,
            "Imported data."
        );
        self.commit(state, change)
    }

    pub(crate) fn clear_all(&mut self) -> AppState {
        info!("Clearing all data.");
        self.commit(AppState::default(), StateChange::cleared())
    }
}

fn validate_amount(amount: f64) -> Result<(), ServerError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(InvalidAmount::new(amount))
    }
}

fn normalize_quote(draft: &CustomQuoteDraft) -> Result<(String, String), ServerError> {
    let text = draft.text.trim();
    if text.is_empty() {
        return Err(EmptyQuoteText::new());
    }
    let author = match draft.author.trim() {
        "" => UNKNOWN_AUTHOR,
        author => author,
    };
    Ok((text.to_string(), author.to_string()))
}
