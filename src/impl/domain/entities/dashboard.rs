use chrono::NaiveDate;

use super::{
    custom_quote::SelectedQuote,
    goal::{Goal, GoalStatus},
    notification::Notification,
    summary::{CategoryShare, FinancialSummary, InsightStats},
    transaction::Transaction,
};

/// Everything the dashboard shows, computed for one point in time.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub summary: FinancialSummary,
    pub notifications: Vec<Notification>,
    pub top_categories: Vec<CategoryShare>,
    pub recent_transactions: Vec<Transaction>,
    pub goals: Vec<GoalProgress>,
    pub quote: Option<SelectedQuote>,
    pub savings_tip: &'static str,
    pub insights: InsightStats,
    pub total_transactions: usize,
}

#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress: f64,
    pub status: GoalStatus,
    pub days_left: i64,
}
