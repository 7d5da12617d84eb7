use serde::Serialize;

use crate::entities::{FinancialSummary, Goal, TimeWindow, Transaction};

use super::iso_date_model::ISODateModel;

/// A record that can be written both as a JSON object and as a CSV row.
pub(crate) trait ExportRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn csv_fields(&self) -> Vec<String>;
}

#[derive(Debug, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionRowModel {
    id: String,
    #[serde(rename = "type")]
    transaction_type: &'static str,
    amount: f64,
    date: ISODateModel,
    source: String,
    category: String,
    description: String,
    tags: Vec<String>,
}

impl From<&Transaction> for TransactionRowModel {
    fn from(t: &Transaction) -> Self {
        TransactionRowModel {
            id: t.id.to_string(),
            transaction_type: t.transaction_type.key(),
            amount: t.amount,
            date: t.date.into(),
            source: t.source.clone().unwrap_or_default(),
            category: t.category.clone().unwrap_or_default(),
            description: t.description.clone().unwrap_or_default(),
            tags: t.tags.clone(),
        }
    }
}

impl ExportRow for TransactionRowModel {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "type",
        "amount",
        "date",
        "source",
        "category",
        "description",
        "tags",
    ];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.transaction_type.to_string(),
            self.amount.to_string(),
            self.date.to_string(),
            self.source.clone(),
            self.category.clone(),
            self.description.clone(),
            self.tags.join("; "),
        ]
    }
}

#[derive(Debug, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoalRowModel {
    id: String,
    title: String,
    target_amount: f64,
    current_amount: f64,
    deadline: ISODateModel,
    progress: String,
}

impl From<&Goal> for GoalRowModel {
    fn from(g: &Goal) -> Self {
        GoalRowModel {
            id: g.id.to_string(),
            title: g.title.clone(),
            target_amount: g.target_amount,
            current_amount: g.current_amount,
            deadline: g.deadline.into(),
            progress: format!("{:.2}%", g.progress()),
        }
    }
}

impl ExportRow for GoalRowModel {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "title",
        "targetAmount",
        "currentAmount",
        "deadline",
        "progress",
    ];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.target_amount.to_string(),
            self.current_amount.to_string(),
            self.deadline.to_string(),
            self.progress.clone(),
        ]
    }
}

#[derive(Debug, serde_derive::Serialize)]
pub(crate) struct SummaryRowModel {
    metric: String,
    value: f64,
    period: &'static str,
}

impl SummaryRowModel {
    /// Headline metrics first, then one row per expense category (largest
    /// first).
    pub(crate) fn rows(
        summary: &FinancialSummary,
        transaction_count: usize,
        window: TimeWindow,
    ) -> Vec<SummaryRowModel> {
        let period = window.key();
        let row = |metric: String, value: f64| SummaryRowModel {
            metric,
            value,
            period,
        };

        let mut categories: Vec<(&String, &f64)> = summary.expenses_by_category.iter().collect();
        categories.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let mut rows = vec![
            row("Total Income".to_string(), summary.total_income),
            row("Total Expenses".to_string(), summary.total_expenses),
            row("Net Balance".to_string(), summary.current_balance),
            row("Transaction Count".to_string(), transaction_count as f64),
        ];
        rows.extend(
            categories
                .into_iter()
                .map(|(category, amount)| row(format!("Expenses - {category}"), *amount)),
        );
        rows
    }
}

impl ExportRow for SummaryRowModel {
    const HEADERS: &'static [&'static str] = &["metric", "value", "period"];

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.metric.clone(),
            self.value.to_string(),
            self.period.to_string(),
        ]
    }
}
