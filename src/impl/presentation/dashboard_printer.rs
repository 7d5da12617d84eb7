use crate::entities::{
    AppConfig, Dashboard, DashboardLayout, GoalProgress, GoalStatus, Severity, TransactionType,
};

use super::{
    amount_fmt::{format_amount, format_percentage},
    date_fmt::format_relative_date,
};

const WIDTH: usize = 80;
const LABEL_WIDTH: usize = 18;
const MAX_NOTIFICATIONS: usize = 3;

pub(crate) struct DashboardPrinter<'a> {
    config: &'a AppConfig,
}

impl<'a> DashboardPrinter<'a> {
    pub(crate) fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    pub(crate) fn print(&self, dashboard: &Dashboard) -> String {
        let mut output = String::new();

        self.print_overview(&mut output, dashboard);
        if !dashboard.notifications.is_empty() {
            self.print_notifications(&mut output, dashboard);
        }
        if self.config.dashboard_layout == DashboardLayout::Detailed {
            self.print_spending(&mut output, dashboard);
            self.print_recent(&mut output, dashboard);
        }
        self.print_goals(&mut output, dashboard);
        self.print_motivation(&mut output, dashboard);
        if self.config.show_quick_stats {
            self.print_quick_stats(&mut output, dashboard);
        }

        output
    }

    fn amount(&self, amount: f64) -> String {
        format_amount(amount, &self.config.currency, &self.config.number_format)
    }

    fn section(&self, output: &mut String, title: &str) {
        if !output.is_empty() {
            output.push('\n');
        }
        let head = format!("--- {title} ");
        let fill = WIDTH.saturating_sub(head.len());
        output.push_str(&format!("{head}{}\n\n", "-".repeat(fill)));
    }

    fn print_overview(&self, output: &mut String, dashboard: &Dashboard) {
        let summary = &dashboard.summary;
        let status = if summary.total_expenses > summary.total_income {
            "Overspending"
        } else {
            "On Track"
        };
        self.section(output, "Overview");
        for (label, value) in [
            ("Total Income", self.amount(summary.total_income)),
            ("Total Expenses", self.amount(summary.total_expenses)),
            ("Current Balance", self.amount(summary.current_balance)),
            ("Status", status.to_string()),
        ] {
            output.push_str(&format!("{label:<LABEL_WIDTH$}{value}\n"));
        }
    }

    fn print_notifications(&self, output: &mut String, dashboard: &Dashboard) {
        self.section(output, "Notifications");
        for n in dashboard.notifications.iter().take(MAX_NOTIFICATIONS) {
            let marker = match n.severity {
                Severity::High => "[!]",
                Severity::Medium => "[i]",
            };
            output.push_str(&format!("{marker} {}\n", n.message));
        }
        let hidden = dashboard.notifications.len().saturating_sub(MAX_NOTIFICATIONS);
        if hidden > 0 {
            output.push_str(&format!("(+{hidden} more)\n"));
        }
    }

    fn print_spending(&self, output: &mut String, dashboard: &Dashboard) {
        self.section(output, "Spending Overview");
        if dashboard.top_categories.is_empty() {
            output.push_str("No expenses recorded yet\n");
            return;
        }
        for share in &dashboard.top_categories {
            output.push_str(&format!(
                "{:<LABEL_WIDTH$}{} ({})\n",
                share.category,
                self.amount(share.amount),
                format_percentage(share.percentage)
            ));
        }
    }

    fn print_recent(&self, output: &mut String, dashboard: &Dashboard) {
        self.section(output, "Recent Transactions");
        if dashboard.recent_transactions.is_empty() {
            output.push_str("No transactions yet\n");
            return;
        }
        for t in &dashboard.recent_transactions {
            let (sign, label) = match t.transaction_type {
                TransactionType::Income => ("+", t.source.as_deref().unwrap_or("Income")),
                TransactionType::Expense => ("-", t.category.as_deref().unwrap_or("Other")),
            };
            let date = format_relative_date(t.date, dashboard.today, self.config.date_format);
            let mut line = format!("{date:<14}{sign}{:<14}{label}", self.amount(t.amount));
            if self.config.transactions.show_descriptions {
                if let Some(description) = t.description.as_deref().filter(|d| !d.is_empty()) {
                    line.push_str(&format!(" - {description}"));
                }
            }
            output.push_str(&line);
            output.push('\n');
        }
    }

    fn print_goals(&self, output: &mut String, dashboard: &Dashboard) {
        self.section(output, "Goals");
        if dashboard.goals.is_empty() {
            output.push_str("No goals yet\n");
            return;
        }
        for goal in &dashboard.goals {
            output.push_str(&self.goal_line(goal));
            output.push('\n');
        }
    }

    fn goal_line(&self, g: &GoalProgress) -> String {
        let mut line = format!(
            "{}: {} / {}",
            g.goal.title,
            self.amount(g.goal.current_amount),
            self.amount(g.goal.target_amount)
        );
        if self.config.goals.show_progress_percentage {
            line.push_str(&format!(" ({})", format_percentage(g.progress)));
        }
        line.push_str(&format!(" - {}", g.status.key()));
        match g.status {
            GoalStatus::Completed | GoalStatus::Overdue => {}
            _ if g.days_left == 0 => line.push_str(", due today"),
            _ if g.days_left == 1 => line.push_str(", 1 day left"),
            _ => line.push_str(&format!(", {} days left", g.days_left)),
        }
        line
    }

    fn print_motivation(&self, output: &mut String, dashboard: &Dashboard) {
        self.section(output, "Weekly Motivation");
        match &dashboard.quote {
            Some(quote) => {
                let text = if self.config.quotes.show_quote_source {
                    quote.text.as_str()
                } else {
                    without_source(&quote.text)
                };
                for line in textwrap::wrap(&format!("\"{text}\""), WIDTH) {
                    output.push_str(&line);
                    output.push('\n');
                }
                output.push_str(&format!("(Week {})\n", quote.week_number));
            }
            None => output.push_str("No quotes available\n"),
        }
        output.push('\n');
        for line in textwrap::wrap(&format!("Tip: {}", dashboard.savings_tip), WIDTH) {
            output.push_str(&line);
            output.push('\n');
        }
    }

    fn print_quick_stats(&self, output: &mut String, dashboard: &Dashboard) {
        self.section(output, "Quick Stats");
        for (label, value) in [
            ("Transactions", dashboard.total_transactions),
            ("Categories", dashboard.insights.expense_category_count),
            ("Income entries", dashboard.insights.income_transaction_count),
            ("Last 30 days", dashboard.insights.transactions_last_30_days),
        ] {
            output.push_str(&format!("{label:<LABEL_WIDTH$}{value}\n"));
        }
    }
}

/// Quote text without its trailing ` - Author` attribution.
fn without_source(text: &str) -> &str {
    text.rsplit_once(" - ").map_or(text, |(quote, _)| quote)
}
