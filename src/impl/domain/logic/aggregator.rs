use std::{cmp::Ordering, collections::HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::entities::{
    CategoryShare, FinancialSummary, InsightStats, PeriodTotals, QueryResult, SortField,
    SortOrder, TimeWindow, Transaction, TransactionQuery, TransactionType,
};

use super::utils::{days_before, months_before, percentage, start_of_day};

pub(crate) const DEFAULT_CATEGORY: &str = "Other";

/// Number of entries shown in the "recent transactions" list.
pub(crate) const RECENT_COUNT: usize = 5;

/// Look-back used by the insight computations.
const INSIGHT_DAYS: i64 = 30;

/// Pure aggregations over a borrowed transaction list. Never reorders or
/// mutates the underlying list.
pub(crate) struct Aggregator<'a> {
    transactions: Vec<&'a Transaction>,
}

impl<'a> Aggregator<'a> {
    pub(crate) fn new(transactions: &'a [Transaction]) -> Self {
        Self {
            transactions: transactions.iter().collect(),
        }
    }

    /// Restricts the aggregation to transactions dated inside the window.
    pub(crate) fn within(self, window: TimeWindow, now: DateTime<Utc>) -> Self {
        match window_start(window, now) {
            None => self,
            Some(start) => Self {
                transactions: self
                    .transactions
                    .into_iter()
                    .filter(|t| start_of_day(t.date) >= start)
                    .collect(),
            },
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn transactions(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions.iter().copied()
    }

    pub(crate) fn total_income(&self) -> f64 {
        self.sum_of(TransactionType::Income)
    }

    pub(crate) fn total_expenses(&self) -> f64 {
        self.sum_of(TransactionType::Expense)
    }

    pub(crate) fn expenses_by_category(&self) -> HashMap<String, f64> {
        self.of_type(TransactionType::Expense)
            .fold(HashMap::new(), |mut map, t| {
                *map.entry(category_of(t).to_string()).or_insert(0.0) += t.amount;
                map
            })
    }

    pub(crate) fn summary(&self) -> FinancialSummary {
        let total_income = self.total_income();
        let total_expenses = self.total_expenses();
        FinancialSummary {
            total_income,
            total_expenses,
            current_balance: total_income - total_expenses,
            expenses_by_category: self.expenses_by_category(),
        }
    }

    /// Most recent transactions first, at most `n`.
    pub(crate) fn recent(&self, n: usize) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.into_iter().take(n).cloned().collect()
    }

    /// Expense categories, largest first, with their share of the expense
    /// total.
    pub(crate) fn category_breakdown(&self) -> Vec<CategoryShare> {
        let by_category = self.expenses_by_category();
        let total: f64 = by_category.values().sum();
        let mut shares: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                percentage: percentage(amount, total),
                category,
                amount,
            })
            .collect();
        shares.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        shares
    }

    pub(crate) fn top_categories(&self, n: usize) -> Vec<CategoryShare> {
        self.category_breakdown().into_iter().take(n).collect()
    }

    /// Income-vs-expense buckets ending at `now`: the last 7 days, the last 12
    /// calendar months, or the last 5 years. `All` has no buckets.
    pub(crate) fn period_series(&self, window: TimeWindow, now: DateTime<Utc>) -> Vec<PeriodTotals> {
        let today = now.date_naive();
        match window {
            TimeWindow::Week => (0..7)
                .rev()
                .map(|i| days_before(today, i))
                .map(|day| self.bucket(day.format("%Y-%m-%d").to_string(), |d| d == day))
                .collect(),
            TimeWindow::Month => (0..12)
                .rev()
                .map(|i| months_before(first_of_month(today), i))
                .map(|month| {
                    self.bucket(month.format("%Y-%m").to_string(), |d| {
                        d.year() == month.year() && d.month() == month.month()
                    })
                })
                .collect(),
            TimeWindow::Year => (0..5)
                .rev()
                .map(|i| today.year() - i)
                .map(|year| self.bucket(year.to_string(), |d| d.year() == year))
                .collect(),
            TimeWindow::All => Vec::new(),
        }
    }

    /// Expenses of the last 30 days larger than twice the 30-day average,
    /// largest first, at most 3.
    pub(crate) fn unusual_expenses(&self, now: DateTime<Utc>) -> Vec<Transaction> {
        let cutoff = now - Duration::days(INSIGHT_DAYS);
        let recent: Vec<&Transaction> = self
            .of_type(TransactionType::Expense)
            .filter(|t| start_of_day(t.date) >= cutoff)
            .collect();
        if recent.is_empty() {
            return Vec::new();
        }
        let average = recent.iter().map(|t| t.amount).sum::<f64>() / recent.len() as f64;
        let mut unusual: Vec<&Transaction> = recent
            .into_iter()
            .filter(|t| t.amount > average * 2.0)
            .collect();
        unusual.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
        unusual.into_iter().take(3).cloned().collect()
    }

    pub(crate) fn insight_stats(&self, now: DateTime<Utc>) -> InsightStats {
        let cutoff = now - Duration::days(INSIGHT_DAYS);
        InsightStats {
            expense_category_count: self.expenses_by_category().len(),
            income_transaction_count: self.of_type(TransactionType::Income).count(),
            transactions_last_30_days: self
                .transactions()
                .filter(|t| start_of_day(t.date) >= cutoff)
                .count(),
        }
    }

    /// Search, type filter and ordering for the transaction list, with totals
    /// of the matching rows.
    pub(crate) fn query(&self, query: &TransactionQuery) -> QueryResult {
        let needle = query.search.trim().to_lowercase();
        let mut matching: Vec<&Transaction> = self
            .transactions()
            .filter(|t| query.transaction_type.map_or(true, |ty| t.transaction_type == ty))
            .filter(|t| needle.is_empty() || matches_search(t, &needle))
            .collect();

        matching.sort_by(|a, b| {
            let ordering = match query.sort_by {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
                SortField::Type => a.transaction_type.key().cmp(b.transaction_type.key()),
            };
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let filtered = Aggregator {
            transactions: matching,
        };
        QueryResult {
            total_income: filtered.total_income(),
            total_expenses: filtered.total_expenses(),
            transactions: filtered.transactions().cloned().collect(),
        }
    }

    fn of_type(&self, ty: TransactionType) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions().filter(move |t| t.transaction_type == ty)
    }

    fn sum_of(&self, ty: TransactionType) -> f64 {
        self.of_type(ty).map(|t| t.amount).sum()
    }

    fn bucket<F>(&self, label: String, contains: F) -> PeriodTotals
    where
        F: Fn(NaiveDate) -> bool,
    {
        let in_bucket = Aggregator {
            transactions: self
                .transactions()
                .filter(|t| contains(t.date))
                .collect(),
        };
        let income = in_bucket.total_income();
        let expenses = in_bucket.total_expenses();
        PeriodTotals {
            label,
            income,
            expenses,
            net: income - expenses,
        }
    }
}

/// Earliest instant still inside the window, or `None` for `All`.
pub(crate) fn window_start(window: TimeWindow, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    match window {
        TimeWindow::Week => Some(now - Duration::days(7)),
        TimeWindow::Month => Some(start_of_day(months_before(today, 1))),
        TimeWindow::Year => Some(start_of_day(months_before(today, 12))),
        TimeWindow::All => None,
    }
}

/// Drops transactions dated before `today - retention_days`. Zero (or a
/// negative value) keeps everything.
pub(crate) fn apply_retention(
    transactions: &[Transaction],
    retention_days: i64,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    if retention_days <= 0 {
        return transactions.to_vec();
    }
    let cutoff = days_before(now.date_naive(), retention_days);
    transactions
        .iter()
        .filter(|t| t.date >= cutoff)
        .cloned()
        .collect()
}

pub(crate) fn category_of(t: &Transaction) -> &str {
    match t.category.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => DEFAULT_CATEGORY,
    }
}

fn matches_search(t: &Transaction, needle: &str) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .map_or(false, |s| s.to_lowercase().contains(needle))
    };
    contains(&t.source)
        || contains(&t.category)
        || contains(&t.description)
        || t.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TransactionId;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn income(id: &str, amount: f64, on: &str) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            transaction_type: TransactionType::Income,
            amount,
            date: date(on),
            source: Some("Salary".to_string()),
            category: None,
            description: None,
            tags: vec!["Monthly".to_string()],
        }
    }

    fn expense(id: &str, amount: f64, on: &str, category: Option<&str>) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            transaction_type: TransactionType::Expense,
            amount,
            date: date(on),
            source: None,
            category: category.map(str::to_string),
            description: Some(format!("expense {id}")),
            tags: Vec::new(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            income("1", 3000.0, "2024-03-01"),
            expense("2", 120.0, "2024-03-10", Some("Food")),
            expense("3", 80.0, "2024-03-12", Some("Food")),
            expense("4", 900.0, "2024-03-14", Some("Rent")),
            expense("5", 40.0, "2024-01-20", None),
            income("6", 500.0, "2023-02-01"),
        ]
    }

    #[test]
    fn totals_and_balance() {
        let txs = sample();
        let summary = Aggregator::new(&txs).summary();
        assert_eq!(summary.total_income, 3500.0);
        assert_eq!(summary.total_expenses, 1140.0);
        assert_eq!(summary.current_balance, 2360.0);
    }

    #[test]
    fn missing_category_is_grouped_as_other() {
        let txs = sample();
        let by_category = Aggregator::new(&txs).expenses_by_category();
        assert_eq!(by_category.get("Other"), Some(&40.0));
        assert_eq!(by_category.get("Food"), Some(&200.0));
        assert_eq!(by_category.len(), 3);
    }

    #[test]
    fn windows_filter_by_date() {
        let txs = sample();
        assert_eq!(Aggregator::new(&txs).within(TimeWindow::Week, now()).len(), 3);
        assert_eq!(Aggregator::new(&txs).within(TimeWindow::Month, now()).len(), 4);
        assert_eq!(Aggregator::new(&txs).within(TimeWindow::Year, now()).len(), 5);
        assert_eq!(Aggregator::new(&txs).within(TimeWindow::All, now()).len(), 6);
    }

    #[test]
    fn recent_is_sorted_descending_and_truncated() {
        let txs = sample();
        let recent = Aggregator::new(&txs).recent(RECENT_COUNT);
        let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1", "5"]);
        // Input order untouched.
        assert_eq!(txs[0].id.as_str(), "1");
    }

    #[test]
    fn breakdown_is_sorted_with_percentages() {
        let txs = sample();
        let shares = Aggregator::new(&txs).top_categories(2);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Rent");
        assert_eq!(shares[1].category, "Food");
        assert!((shares[0].percentage - 900.0 / 1140.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_without_expenses_is_empty() {
        let txs = vec![income("1", 10.0, "2024-03-01")];
        assert!(Aggregator::new(&txs).category_breakdown().is_empty());
    }

    #[test]
    fn weekly_series_has_one_bucket_per_day() {
        let txs = sample();
        let series = Aggregator::new(&txs).period_series(TimeWindow::Week, now());
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].label, "2024-03-09");
        assert_eq!(series[6].label, "2024-03-15");
        let march_14 = series.iter().find(|b| b.label == "2024-03-14").unwrap();
        assert_eq!(march_14.expenses, 900.0);
        assert_eq!(march_14.net, -900.0);
    }

    #[test]
    fn monthly_and_yearly_series() {
        let txs = sample();
        let months = Aggregator::new(&txs).period_series(TimeWindow::Month, now());
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].label, "2023-04");
        assert_eq!(months[11].label, "2024-03");
        assert_eq!(months[11].income, 3000.0);
        assert_eq!(months[9].expenses, 40.0);

        let years = Aggregator::new(&txs).period_series(TimeWindow::Year, now());
        let labels: Vec<&str> = years.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2020", "2021", "2022", "2023", "2024"]);
        assert_eq!(years[3].income, 500.0);

        assert!(Aggregator::new(&txs)
            .period_series(TimeWindow::All, now())
            .is_empty());
    }

    #[test]
    fn unusual_expenses_exceed_twice_the_average() {
        let txs = sample();
        let unusual = Aggregator::new(&txs).unusual_expenses(now());
        // Average of the last 30 days: (120 + 80 + 900) / 3.
        assert_eq!(unusual.len(), 1);
        assert_eq!(unusual[0].id.as_str(), "4");
    }

    #[test]
    fn unusual_expenses_without_recent_expenses() {
        let txs = vec![income("1", 10.0, "2024-03-10")];
        assert!(Aggregator::new(&txs).unusual_expenses(now()).is_empty());
    }

    #[test]
    fn insight_stats_counts() {
        let txs = sample();
        let stats = Aggregator::new(&txs).insight_stats(now());
        assert_eq!(stats.expense_category_count, 3);
        assert_eq!(stats.income_transaction_count, 2);
        assert_eq!(stats.transactions_last_30_days, 4);
    }

    #[test]
    fn query_searches_filters_and_sorts() {
        let txs = sample();
        let result = Aggregator::new(&txs).query(&TransactionQuery {
            search: "FOOD".to_string(),
            ..Default::default()
        });
        let ids: Vec<&str> = result.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
        assert_eq!(result.total_expenses, 200.0);

        let by_amount = Aggregator::new(&txs).query(&TransactionQuery {
            transaction_type: Some(TransactionType::Income),
            sort_by: SortField::Amount,
            order: SortOrder::Asc,
            ..Default::default()
        });
        let ids: Vec<&str> = by_amount.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "1"]);
        assert_eq!(by_amount.total_income, 3500.0);
    }

    #[test]
    fn query_matches_tags_and_empty_search_keeps_all() {
        let txs = sample();
        let tagged = Aggregator::new(&txs).query(&TransactionQuery {
            search: "month".to_string(),
            ..Default::default()
        });
        assert_eq!(tagged.transactions.len(), 2);
        let all = Aggregator::new(&txs).query(&TransactionQuery::default());
        assert_eq!(all.transactions.len(), txs.len());
    }

    #[test]
    fn retention_drops_old_transactions() {
        let txs = sample();
        let kept = apply_retention(&txs, 365, now());
        assert_eq!(kept.len(), 5);
        assert_eq!(apply_retention(&txs, 0, now()).len(), 6);
        assert_eq!(apply_retention(&txs, i64::MAX, now()).len(), 6);
    }

    fn arb_transaction() -> impl Strategy<Value = Transaction> {
        (
            any::<bool>(),
            0.0f64..100_000.0,
            0u32..3000,
            proptest::option::of("[A-C]"),
        )
            .prop_map(|(is_income, amount, offset, category)| Transaction {
                id: TransactionId::from(offset.to_string()),
                transaction_type: if is_income {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                },
                amount,
                date: date("2020-01-01") + Duration::days(offset as i64),
                source: None,
                category,
                description: None,
                tags: Vec::new(),
            })
    }

    proptest! {
        #[test]
        fn balance_is_income_minus_expenses(txs in proptest::collection::vec(arb_transaction(), 0..40)) {
            let summary = Aggregator::new(&txs).summary();
            prop_assert_eq!(summary.total_income - summary.total_expenses, summary.current_balance);
        }

        #[test]
        fn categories_sum_to_total_expenses(txs in proptest::collection::vec(arb_transaction(), 0..40)) {
            let summary = Aggregator::new(&txs).summary();
            let category_total: f64 = summary.expenses_by_category.values().sum();
            prop_assert!((category_total - summary.total_expenses).abs() <= 1e-6 * summary.total_expenses.max(1.0));
        }

        #[test]
        fn aggregation_is_idempotent(txs in proptest::collection::vec(arb_transaction(), 0..40)) {
            let first = Aggregator::new(&txs).summary();
            let second = Aggregator::new(&txs).summary();
            prop_assert_eq!(first, second);
            prop_assert_eq!(Aggregator::new(&txs).recent(5), Aggregator::new(&txs).recent(5));
        }
    }
}
