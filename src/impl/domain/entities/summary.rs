use std::collections::HashMap;

use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub current_balance: f64,
    pub expenses_by_category: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of the expense total, 0..=100. Zero when there are no expenses.
    pub percentage: f64,
}

/// One bucket of the income-vs-expense series.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightStats {
    pub expense_category_count: usize,
    pub income_transaction_count: usize,
    pub transactions_last_30_days: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataStats {
    pub total_transactions: usize,
    pub total_goals: usize,
    pub total_custom_quotes: usize,
    pub data_size_kb: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search, filter and ordering for the transaction list.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub search: String,
    /// `None` keeps both types.
    pub transaction_type: Option<super::transaction::TransactionType>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub transactions: Vec<Transaction>,
    pub total_income: f64,
    pub total_expenses: f64,
}
