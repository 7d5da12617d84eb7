use tracing::warn;

use crate::entities::{
    AppConfig, DashboardLayout, DataSettings, DateFormat, ExportFormat, Frequency,
    GoalSettings, NotificationSettings, NumberFormat, PrivacySettings, QuoteSettings, Theme,
    TimeWindow, TransactionSettings, TransactionType,
};

// Every field is optional: persisted and imported configs may come from older
// versions, so whatever is present is merged onto a base config field by field.

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct AppConfigModel {
    currency: Option<String>,
    date_format: Option<String>,
    number_format: Option<NumberFormatModel>,
    default_transaction_type: Option<String>,
    language: Option<String>,
    theme: Option<String>,
    chart_animations: Option<bool>,
    default_chart_period: Option<String>,
    dashboard_layout: Option<String>,
    show_quick_stats: Option<bool>,
    notifications: Option<NotificationSettingsModel>,
    quotes: Option<QuoteSettingsModel>,
    goals: Option<GoalSettingsModel>,
    transactions: Option<TransactionSettingsModel>,
    data: Option<DataSettingsModel>,
    privacy: Option<PrivacySettingsModel>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NumberFormatModel {
    decimal_places: Option<u32>,
    thousands_separator: Option<String>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NotificationSettingsModel {
    enabled: Option<bool>,
    overspending_alerts: Option<bool>,
    goal_deadline_reminders: Option<bool>,
    weekly_reports: Option<bool>,
    goal_achievements: Option<bool>,
    reminder_days: Option<i64>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QuoteSettingsModel {
    enable_custom_quotes: Option<bool>,
    custom_quotes_only: Option<bool>,
    show_quote_source: Option<bool>,
    change_frequency: Option<String>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalSettingsModel {
    default_deadline_days: Option<i64>,
    progress_notification_threshold: Option<f64>,
    auto_complete_goals: Option<bool>,
    show_progress_percentage: Option<bool>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TransactionSettingsModel {
    default_categories: Option<Vec<String>>,
    auto_save: Option<bool>,
    confirm_delete: Option<bool>,
    show_descriptions: Option<bool>,
    default_tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DataSettingsModel {
    auto_backup: Option<bool>,
    backup_frequency: Option<String>,
    data_retention_days: Option<i64>,
    export_format: Option<String>,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PrivacySettingsModel {
    share_usage_data: Option<bool>,
    enable_analytics: Option<bool>,
    data_encryption: Option<bool>,
}

trait MergeOnto<T> {
    fn merge_onto(self, base: &T) -> T;
}

fn merge_section<M, T>(model: Option<M>, base: &T) -> T
where
    M: MergeOnto<T>,
    T: Clone,
{
    match model {
        Some(m) => m.merge_onto(base),
        None => base.clone(),
    }
}

fn merge_key<T: Copy>(raw: Option<String>, base: T, parse: fn(&str) -> Option<T>, field: &str) -> T {
    match raw {
        None => base,
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            warn!(setting = field, value = %raw, "Unknown config value; keeping the current one.");
            base
        }),
    }
}

impl AppConfigModel {
    pub(crate) fn merge_onto(self, base: &AppConfig) -> AppConfig {
        AppConfig {
            currency: self.currency.unwrap_or_else(|| base.currency.clone()),
            date_format: merge_key(
                self.date_format,
                base.date_format,
                DateFormat::from_key,
                "dateFormat",
            ),
            number_format: merge_section(self.number_format, &base.number_format),
            default_transaction_type: merge_key(
                self.default_transaction_type,
                base.default_transaction_type,
                TransactionType::from_key,
                "defaultTransactionType",
            ),
            language: self.language.unwrap_or_else(|| base.language.clone()),
            theme: merge_key(self.theme, base.theme, Theme::from_key, "theme"),
            chart_animations: self.chart_animations.unwrap_or(base.chart_animations),
            default_chart_period: merge_key(
                self.default_chart_period,
                base.default_chart_period,
                TimeWindow::from_key,
                "defaultChartPeriod",
            ),
            dashboard_layout: merge_key(
                self.dashboard_layout,
                base.dashboard_layout,
                DashboardLayout::from_key,
                "dashboardLayout",
            ),
            show_quick_stats: self.show_quick_stats.unwrap_or(base.show_quick_stats),
            notifications: merge_section(self.notifications, &base.notifications),
            quotes: merge_section(self.quotes, &base.quotes),
            goals: merge_section(self.goals, &base.goals),
            transactions: merge_section(self.transactions, &base.transactions),
            data: merge_section(self.data, &base.data),
            privacy: merge_section(self.privacy, &base.privacy),
        }
    }
}

impl MergeOnto<NumberFormat> for NumberFormatModel {
    fn merge_onto(self, base: &NumberFormat) -> NumberFormat {
        NumberFormat {
            decimal_places: match self.decimal_places {
                Some(places) if places > NumberFormat::MAX_DECIMAL_PLACES => {
                    warn!(
                        setting = "decimalPlaces",
                        value = places,
                        "Decimal places out of range; clamping."
                    );
                    NumberFormat::MAX_DECIMAL_PLACES
                }
                Some(places) => places,
                None => base.decimal_places,
            },
            thousands_separator: self
                .thousands_separator
                .unwrap_or_else(|| base.thousands_separator.clone()),
        }
    }
}

impl MergeOnto<NotificationSettings> for NotificationSettingsModel {
    fn merge_onto(self, base: &NotificationSettings) -> NotificationSettings {
        NotificationSettings {
            enabled: self.enabled.unwrap_or(base.enabled),
            overspending_alerts: self.overspending_alerts.unwrap_or(base.overspending_alerts),
            goal_deadline_reminders: self
                .goal_deadline_reminders
                .unwrap_or(base.goal_deadline_reminders),
            weekly_reports: self.weekly_reports.unwrap_or(base.weekly_reports),
            goal_achievements: self.goal_achievements.unwrap_or(base.goal_achievements),
            reminder_days: self.reminder_days.unwrap_or(base.reminder_days),
        }
    }
}

impl MergeOnto<QuoteSettings> for QuoteSettingsModel {
    fn merge_onto(self, base: &QuoteSettings) -> QuoteSettings {
        QuoteSettings {
            enable_custom_quotes: self.enable_custom_quotes.unwrap_or(base.enable_custom_quotes),
            custom_quotes_only: self.custom_quotes_only.unwrap_or(base.custom_quotes_only),
            show_quote_source: self.show_quote_source.unwrap_or(base.show_quote_source),
            change_frequency: merge_key(
                self.change_frequency,
                base.change_frequency,
                Frequency::from_key,
                "quotes.changeFrequency",
            ),
        }
    }
}

impl MergeOnto<GoalSettings> for GoalSettingsModel {
    fn merge_onto(self, base: &GoalSettings) -> GoalSettings {
        GoalSettings {
            default_deadline_days: self
                .default_deadline_days
                .unwrap_or(base.default_deadline_days),
            progress_notification_threshold: self
                .progress_notification_threshold
                .unwrap_or(base.progress_notification_threshold),
            auto_complete_goals: self.auto_complete_goals.unwrap_or(base.auto_complete_goals),
            show_progress_percentage: self
                .show_progress_percentage
                .unwrap_or(base.show_progress_percentage),
        }
    }
}

impl MergeOnto<TransactionSettings> for TransactionSettingsModel {
    fn merge_onto(self, base: &TransactionSettings) -> TransactionSettings {
        TransactionSettings {
            default_categories: self
                .default_categories
                .unwrap_or_else(|| base.default_categories.clone()),
            auto_save: self.auto_save.unwrap_or(base.auto_save),
            confirm_delete: self.confirm_delete.unwrap_or(base.confirm_delete),
            show_descriptions: self.show_descriptions.unwrap_or(base.show_descriptions),
            default_tags: self
                .default_tags
                .unwrap_or_else(|| base.default_tags.clone()),
        }
    }
}

impl MergeOnto<DataSettings> for DataSettingsModel {
    fn merge_onto(self, base: &DataSettings) -> DataSettings {
        DataSettings {
            auto_backup: self.auto_backup.unwrap_or(base.auto_backup),
            backup_frequency: merge_key(
                self.backup_frequency,
                base.backup_frequency,
                Frequency::from_key,
                "data.backupFrequency",
            ),
            data_retention_days: self.data_retention_days.unwrap_or(base.data_retention_days),
            export_format: merge_key(
                self.export_format,
                base.export_format,
                ExportFormat::from_key,
                "data.exportFormat",
            ),
        }
    }
}

impl MergeOnto<PrivacySettings> for PrivacySettingsModel {
    fn merge_onto(self, base: &PrivacySettings) -> PrivacySettings {
        PrivacySettings {
            share_usage_data: self.share_usage_data.unwrap_or(base.share_usage_data),
            enable_analytics: self.enable_analytics.unwrap_or(base.enable_analytics),
            data_encryption: self.data_encryption.unwrap_or(base.data_encryption),
        }
    }
}

impl From<&AppConfig> for AppConfigModel {
    fn from(c: &AppConfig) -> Self {
        AppConfigModel {
            currency: Some(c.currency.clone()),
            date_format: Some(c.date_format.key().to_string()),
            number_format: Some(NumberFormatModel {
                decimal_places: Some(c.number_format.decimal_places),
                thousands_separator: Some(c.number_format.thousands_separator.clone()),
            }),
            default_transaction_type: Some(c.default_transaction_type.key().to_string()),
            language: Some(c.language.clone()),
            theme: Some(c.theme.key().to_string()),
            chart_animations: Some(c.chart_animations),
            default_chart_period: Some(c.default_chart_period.key().to_string()),
            dashboard_layout: Some(c.dashboard_layout.key().to_string()),
            show_quick_stats: Some(c.show_quick_stats),
            notifications: Some(NotificationSettingsModel {
                enabled: Some(c.notifications.enabled),
                overspending_alerts: Some(c.notifications.overspending_alerts),
                goal_deadline_reminders: Some(c.notifications.goal_deadline_reminders),
                weekly_reports: Some(c.notifications.weekly_reports),
                goal_achievements: Some(c.notifications.goal_achievements),
                reminder_days: Some(c.notifications.reminder_days),
            }),
            quotes: Some(QuoteSettingsModel {
                enable_custom_quotes: Some(c.quotes.enable_custom_quotes),
                custom_quotes_only: Some(c.quotes.custom_quotes_only),
                show_quote_source: Some(c.quotes.show_quote_source),
                change_frequency: Some(c.quotes.change_frequency.key().to_string()),
            }),
            goals: Some(GoalSettingsModel {
                default_deadline_days: Some(c.goals.default_deadline_days),
                progress_notification_threshold: Some(c.goals.progress_notification_threshold),
                auto_complete_goals: Some(c.goals.auto_complete_goals),
                show_progress_percentage: Some(c.goals.show_progress_percentage),
            }),
            transactions: Some(TransactionSettingsModel {
                default_categories: Some(c.transactions.default_categories.clone()),
                auto_save: Some(c.transactions.auto_save),
                confirm_delete: Some(c.transactions.confirm_delete),
                show_descriptions: Some(c.transactions.show_descriptions),
                default_tags: Some(c.transactions.default_tags.clone()),
            }),
            data: Some(DataSettingsModel {
                auto_backup: Some(c.data.auto_backup),
                backup_frequency: Some(c.data.backup_frequency.key().to_string()),
                data_retention_days: Some(c.data.data_retention_days),
                export_format: Some(c.data.export_format.key().to_string()),
            }),
            privacy: Some(PrivacySettingsModel {
                share_usage_data: Some(c.privacy.share_usage_data),
                enable_analytics: Some(c.privacy.enable_analytics),
                data_encryption: Some(c.privacy.data_encryption),
            }),
        }
    }
}
