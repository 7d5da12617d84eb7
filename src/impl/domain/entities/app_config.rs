use super::{time_window::TimeWindow, transaction::TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// MM/DD/YYYY
    MonthDayYear,
    /// DD/MM/YYYY
    DayMonthYear,
    /// YYYY-MM-DD
    YearMonthDay,
    /// DD MMM YYYY
    DayMonthNameYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardLayout {
    Compact,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pub decimal_places: u32,
    pub thousands_separator: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub overspending_alerts: bool,
    pub goal_deadline_reminders: bool,
    pub weekly_reports: bool,
    pub goal_achievements: bool,
    pub reminder_days: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSettings {
    pub enable_custom_quotes: bool,
    pub custom_quotes_only: bool,
    pub show_quote_source: bool,
    pub change_frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalSettings {
    pub default_deadline_days: i64,
    pub progress_notification_threshold: f64,
    pub auto_complete_goals: bool,
    pub show_progress_percentage: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSettings {
    pub default_categories: Vec<String>,
    pub auto_save: bool,
    pub confirm_delete: bool,
    pub show_descriptions: bool,
    pub default_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub auto_backup: bool,
    pub backup_frequency: Frequency,
    /// Zero keeps everything.
    pub data_retention_days: i64,
    pub export_format: ExportFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrivacySettings {
    pub share_usage_data: bool,
    pub enable_analytics: bool,
    pub data_encryption: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // General.
    pub currency: String,
    pub date_format: DateFormat,
    pub number_format: NumberFormat,
    pub default_transaction_type: TransactionType,
    pub language: String,

    // Display.
    pub theme: Theme,
    pub chart_animations: bool,
    pub default_chart_period: TimeWindow,
    pub dashboard_layout: DashboardLayout,
    pub show_quick_stats: bool,

    // Sections.
    pub notifications: NotificationSettings,
    pub quotes: QuoteSettings,
    pub goals: GoalSettings,
    pub transactions: TransactionSettings,
    pub data: DataSettings,
    pub privacy: PrivacySettings,
}

impl NumberFormat {
    /// Upper bound on `decimal_places`. Larger values are clamped.
    pub const MAX_DECIMAL_PLACES: u32 = 10;
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            thousands_separator: ",".to_string(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            overspending_alerts: true,
            goal_deadline_reminders: true,
            weekly_reports: false,
            goal_achievements: true,
            reminder_days: 7,
        }
    }
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            enable_custom_quotes: true,
            custom_quotes_only: false,
            show_quote_source: true,
            change_frequency: Frequency::Weekly,
        }
    }
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            default_deadline_days: 365,
            progress_notification_threshold: 75.0,
            auto_complete_goals: false,
            show_progress_percentage: true,
        }
    }
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            default_categories: vec![
                "Food & Dining".to_string(),
                "Transportation".to_string(),
                "Shopping".to_string(),
                "Bills & Utilities".to_string(),
            ],
            auto_save: true,
            confirm_delete: true,
            show_descriptions: true,
            default_tags: vec!["Essential".to_string(), "Non-essential".to_string()],
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            auto_backup: false,
            backup_frequency: Frequency::Weekly,
            data_retention_days: 0,
            export_format: ExportFormat::Csv,
        }
    }
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            share_usage_data: false,
            enable_analytics: false,
            data_encryption: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            date_format: DateFormat::MonthDayYear,
            number_format: NumberFormat::default(),
            default_transaction_type: TransactionType::Expense,
            language: "en".to_string(),
            theme: Theme::Light,
            chart_animations: true,
            default_chart_period: TimeWindow::Month,
            dashboard_layout: DashboardLayout::Detailed,
            show_quick_stats: true,
            notifications: NotificationSettings::default(),
            quotes: QuoteSettings::default(),
            goals: GoalSettings::default(),
            transactions: TransactionSettings::default(),
            data: DataSettings::default(),
            privacy: PrivacySettings::default(),
        }
    }
}
