use chrono::NaiveDate;

use super::entity_id::TransactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub transaction_type: TransactionType,
    /// Positive by convention. Not enforced for imported data.
    pub amount: f64,
    pub date: NaiveDate,
    /// Only meaningful for income.
    pub source: Option<String>,
    /// Only meaningful for expenses. Aggregated as "Other" when absent.
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// A transaction before an id has been assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub date: NaiveDate,
    pub source: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl TransactionDraft {
    pub fn income(amount: f64, date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            transaction_type: TransactionType::Income,
            amount,
            date,
            source: Some(source.into()),
            category: None,
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn expense(amount: f64, date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            amount,
            date,
            source: None,
            category: Some(category.into()),
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            date: self.date,
            source: self.source,
            category: self.category,
            description: self.description,
            tags: self.tags,
        }
    }
}
