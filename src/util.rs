use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::{
        datasources::{key_value_store::KeyValueStore, memory_store::InMemoryStore},
        models::backup_model::collections_size,
        repositories::snapshot_repository_impl::SnapshotRepositoryImpl,
    },
    domain::{
        logic::{
            aggregator::{Aggregator, RECENT_COUNT},
            notification_deriver::{counts, NotificationDeriver},
            quote_rotator::{savings_tip, QuoteRotator},
        },
        repositories::snapshot_repository::SnapshotRepository as _,
        usecases::{
            export_usecase::{ExportUsecase as _, ExportUsecaseImpl},
            import_usecase::{ImportUsecase as _, ImportUsecaseImpl},
            persistence_observer::PersistenceObserver,
            state_controller::{StateController, StateObserver},
        },
    },
    entities::{
        AppConfig, AppState, CategoryShare, CustomQuoteDraft, CustomQuoteId, Dashboard, DataStats,
        ExportFile, ExportRequest, FinancialSummary, GoalDraft, GoalId, GoalProgress, InsightStats,
        Notification, NotificationCounts, PeriodTotals, QueryResult, SelectedQuote, TimeWindow,
        Transaction, TransactionDraft, TransactionId, TransactionQuery,
    },
    presentation::dashboard_printer::DashboardPrinter,
};

/// Number of categories shown on the dashboard and in insights.
const TOP_CATEGORY_COUNT: usize = 3;

/// Entry point of the tracker: owns the state, persists every change to the
/// given store, and answers the queries the screens need.
pub struct FinanceTrackerUtil {
    controller: StateController,
    export_usecase: ExportUsecaseImpl,
    import_usecase: ImportUsecaseImpl,
}

impl FinanceTrackerUtil {
    /// Loads whatever `store` holds and persists every later change to it.
    pub fn new<S: KeyValueStore + 'static>(store: S) -> Self {
        Self::with_repository(SnapshotRepositoryImpl::new(store))
    }

    /// Like [`FinanceTrackerUtil::new`], with a custom expiry for persisted
    /// entries.
    pub fn with_ttl<S: KeyValueStore + 'static>(store: S, ttl_days: i64) -> Self {
        Self::with_repository(SnapshotRepositoryImpl::with_ttl(store, ttl_days))
    }

    /// Tracker whose state lives only as long as the value.
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }

    fn with_repository<S: KeyValueStore + 'static>(repository: SnapshotRepositoryImpl<S>) -> Self {
        let loaded = repository.load();
        info!(
            transactions = loaded.transactions.len(),
            goals = loaded.goals.len(),
            custom_quotes = loaded.custom_quotes.len(),
            "Loaded persisted state."
        );
        let mut controller = StateController::new();
        controller.subscribe(Box::new(PersistenceObserver::new(repository)));
        controller.hydrate(loaded);
        Self {
            controller,
            export_usecase: ExportUsecaseImpl::new(),
            import_usecase: ImportUsecaseImpl::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.controller.subscribe(observer);
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    pub fn config(&self) -> &AppConfig {
        &self.controller.state().config
    }

    // Commands.
    // ---

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<AppState, ServerError> {
        self.controller.add_transaction(draft)
    }

    pub fn update_transaction(&mut self, transaction: Transaction) -> Result<AppState, ServerError> {
        self.controller.update_transaction(transaction)
    }

    pub fn delete_transaction(&mut self, id: &TransactionId) -> Result<AppState, ServerError> {
        self.controller.delete_transaction(id)
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<AppState, ServerError> {
        self.controller.add_goal(draft)
    }

    pub fn update_goal(&mut self, id: &GoalId, amount: f64) -> Result<AppState, ServerError> {
        self.controller.update_goal(id, amount)
    }

    pub fn add_goal_funds(&mut self, id: &GoalId, delta: f64) -> Result<AppState, ServerError> {
        self.controller.add_goal_funds(id, delta)
    }

    pub fn add_custom_quote(&mut self, draft: CustomQuoteDraft) -> Result<AppState, ServerError> {
        self.controller.add_custom_quote(draft)
    }

    pub fn update_custom_quote(
        &mut self,
        id: &CustomQuoteId,
        draft: CustomQuoteDraft,
    ) -> Result<AppState, ServerError> {
        self.controller.update_custom_quote(id, draft)
    }

    pub fn delete_custom_quote(&mut self, id: &CustomQuoteId) -> Result<AppState, ServerError> {
        self.controller.delete_custom_quote(id)
    }

    pub fn update_config(&mut self, config: AppConfig) -> AppState {
        self.controller.update_config(config)
    }

    pub fn reset_config(&mut self) -> AppState {
        self.controller.reset_config()
    }

    pub fn apply_retention(&mut self) -> AppState {
        self.controller.apply_retention()
    }

    /// Wipes every collection and every persisted key, and restores the
    /// default config.
    pub fn clear_all(&mut self) -> AppState {
        self.controller.clear_all()
    }

    // Queries.
    // ---

    fn aggregator(&self, window: TimeWindow, now: DateTime<Utc>) -> Aggregator<'_> {
        Aggregator::new(&self.state().transactions).within(window, now)
    }

    pub fn summary(&self, window: TimeWindow, now: DateTime<Utc>) -> FinancialSummary {
        self.aggregator(window, now).summary()
    }

    pub fn recent_transactions(&self) -> Vec<Transaction> {
        Aggregator::new(&self.state().transactions).recent(RECENT_COUNT)
    }

    pub fn category_breakdown(&self, window: TimeWindow, now: DateTime<Utc>) -> Vec<CategoryShare> {
        self.aggregator(window, now).category_breakdown()
    }

    pub fn top_categories(&self, window: TimeWindow, now: DateTime<Utc>) -> Vec<CategoryShare> {
        self.aggregator(window, now).top_categories(TOP_CATEGORY_COUNT)
    }

    pub fn period_series(&self, window: TimeWindow, now: DateTime<Utc>) -> Vec<PeriodTotals> {
        Aggregator::new(&self.state().transactions).period_series(window, now)
    }

    pub fn unusual_expenses(&self, now: DateTime<Utc>) -> Vec<Transaction> {
        Aggregator::new(&self.state().transactions).unusual_expenses(now)
    }

    pub fn insight_stats(&self, now: DateTime<Utc>) -> InsightStats {
        Aggregator::new(&self.state().transactions).insight_stats(now)
    }

    pub fn query(&self, query: &TransactionQuery) -> QueryResult {
        Aggregator::new(&self.state().transactions).query(query)
    }

    /// Notifications over all transactions and goals.
    pub fn notifications(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let state = self.state();
        let summary = self.summary(TimeWindow::All, now);
        NotificationDeriver::new(&summary, &state.goals, &state.config.notifications).derive(now)
    }

    pub fn notification_counts(&self, now: DateTime<Utc>) -> NotificationCounts {
        counts(&self.notifications(now))
    }

    pub fn goal_progress(&self, now: DateTime<Utc>) -> Vec<GoalProgress> {
        let state = self.state();
        state
            .goals
            .iter()
            .map(|goal| GoalProgress {
                goal: goal.clone(),
                progress: goal.progress(),
                status: goal.status(now, &state.config.goals),
                days_left: goal.days_until_deadline(now),
            })
            .collect()
    }

    /// Quote of the current period. Periods follow UTC wall-clock time.
    pub fn weekly_quote(&self, now: DateTime<Utc>) -> Option<SelectedQuote> {
        let state = self.state();
        QuoteRotator::new(&state.custom_quotes, &state.config.quotes).select(now.naive_utc())
    }

    pub fn savings_tip(&self, now: DateTime<Utc>) -> &'static str {
        savings_tip(now.date_naive())
    }

    pub fn data_stats(&self) -> Result<DataStats, ServerError> {
        let state = self.state();
        let size = collections_size(state)?;
        Ok(DataStats {
            total_transactions: state.transactions.len(),
            total_goals: state.goals.len(),
            total_custom_quotes: state.custom_quotes.len(),
            data_size_kb: (size as f64 / 1024.0).round() as usize,
        })
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        let all = self.aggregator(TimeWindow::All, now);
        Dashboard {
            today: now.date_naive(),
            summary: all.summary(),
            notifications: self.notifications(now),
            top_categories: all.top_categories(TOP_CATEGORY_COUNT),
            recent_transactions: all.recent(RECENT_COUNT),
            goals: self.goal_progress(now),
            quote: self.weekly_quote(now),
            savings_tip: self.savings_tip(now),
            insights: all.insight_stats(now),
            total_transactions: all.len(),
        }
    }

    pub fn print_dashboard(&self, now: DateTime<Utc>) -> String {
        DashboardPrinter::new(self.config()).print(&self.dashboard(now))
    }

    // Export & import.
    // ---

    pub fn export(&self, request: ExportRequest, now: DateTime<Utc>) -> Result<ExportFile, ServerError> {
        self.export_usecase.export(self.state(), request, now)
    }

    pub fn backup(&self, now: DateTime<Utc>) -> Result<ExportFile, ServerError> {
        self.export_usecase.backup(self.state(), now)
    }

    /// Exports into `dir` and returns the path of the written file.
    pub async fn export_to_dir<P>(
        &self,
        request: ExportRequest,
        now: DateTime<Utc>,
        dir: P,
    ) -> Result<PathBuf, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let file = self.export(request, now)?;
        self.export_usecase.write_to_dir(&file, dir).await
    }

    pub async fn backup_to_dir<P>(&self, now: DateTime<Utc>, dir: P) -> Result<PathBuf, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let file = self.backup(now)?;
        self.export_usecase.write_to_dir(&file, dir).await
    }

    /// Replaces every collection present in the JSON document. Nothing
    /// changes when the document is malformed.
    pub fn import_str(&mut self, json: &str) -> Result<AppState, ServerError> {
        let data = self.import_usecase.from_string(json)?;
        Ok(self.controller.import(data))
    }

    pub async fn import_file<P>(&mut self, path: P) -> Result<AppState, ServerError>
    where
        P: AsRef<Path> + Send,
    {
        let data = self.import_usecase.from_file(path).await?;
        Ok(self.controller.import(data))
    }
}
