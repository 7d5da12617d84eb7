use crate::entities::{
    DashboardLayout, DateFormat, ExportDataType, ExportFormat, Frequency, GoalStatus,
    NotificationType, Severity, SortField, SortOrder, Theme, TimeWindow, TransactionType,
};

// Stable string keys, shared by persisted snapshots, exports and printers.

macro_rules! impl_keys {
    ($typ:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        impl $typ {
            pub fn key(&self) -> &'static str {
                match self {
                    $($typ::$variant => $key,)+
                }
            }

            pub fn from_key(s: &str) -> Option<Self> {
                match s {
                    $($key => Some($typ::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

impl_keys!(TransactionType {
    Income => "income",
    Expense => "expense",
});

impl_keys!(TimeWindow {
    Week => "week",
    Month => "month",
    Year => "year",
    All => "all",
});

impl_keys!(DateFormat {
    MonthDayYear => "MM/DD/YYYY",
    DayMonthYear => "DD/MM/YYYY",
    YearMonthDay => "YYYY-MM-DD",
    DayMonthNameYear => "DD MMM YYYY",
});

impl_keys!(Theme {
    Light => "light",
    Dark => "dark",
    System => "system",
});

impl_keys!(DashboardLayout {
    Compact => "compact",
    Detailed => "detailed",
});

impl_keys!(Frequency {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
});

impl_keys!(ExportFormat {
    Csv => "csv",
    Json => "json",
});

impl_keys!(ExportDataType {
    Transactions => "transactions",
    Goals => "goals",
    Summary => "summary",
});

impl_keys!(NotificationType {
    Overspending => "overspending",
    GoalAchievable => "goal-achievable",
    GoalDeadline => "goal-deadline",
    GoalOverdue => "goal-overdue",
});

impl_keys!(Severity {
    High => "high",
    Medium => "medium",
});

impl_keys!(GoalStatus {
    Completed => "completed",
    Overdue => "overdue",
    AlmostThere => "almost there",
    OnTrack => "on track",
    JustStarted => "just started",
});

impl_keys!(SortField {
    Date => "date",
    Amount => "amount",
    Type => "type",
});

impl_keys!(SortOrder {
    Asc => "asc",
    Desc => "desc",
});

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        self.key()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl NotificationType {
    pub fn is_goal_related(&self) -> bool {
        !matches!(self, NotificationType::Overspending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for window in [TimeWindow::Week, TimeWindow::Month, TimeWindow::Year, TimeWindow::All] {
            assert_eq!(TimeWindow::from_key(window.key()), Some(window));
        }
        assert_eq!(
            DateFormat::from_key("DD MMM YYYY"),
            Some(DateFormat::DayMonthNameYear)
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(Theme::from_key("purple"), None);
        assert_eq!(TransactionType::from_key("Income"), None);
    }

    #[test]
    fn notification_keys_match_persisted_names() {
        assert_eq!(NotificationType::GoalOverdue.key(), "goal-overdue");
        assert!(NotificationType::GoalDeadline.is_goal_related());
        assert!(!NotificationType::Overspending.is_goal_related());
    }
}
