use chrono::{DateTime, Utc};

use crate::entities::{
    FinancialSummary, Goal, Notification, NotificationCounts, NotificationSettings,
    NotificationType, Severity,
};

pub(crate) struct NotificationDeriver<'a> {
    summary: &'a FinancialSummary,
    goals: &'a [Goal],
    settings: &'a NotificationSettings,
}

impl<'a> NotificationDeriver<'a> {
    pub(crate) fn new(
        summary: &'a FinancialSummary,
        goals: &'a [Goal],
        settings: &'a NotificationSettings,
    ) -> Self {
        Self {
            summary,
            goals,
            settings,
        }
    }

    /// Overspending first, then each goal in list order, each goal's checks in
    /// the order achievable, deadline, overdue.
    pub(crate) fn derive(&self, now: DateTime<Utc>) -> Vec<Notification> {
        if !self.settings.enabled {
            return Vec::new();
        }

        let overspending = (self.settings.overspending_alerts
            && self.summary.total_expenses > self.summary.total_income)
            .then(|| Notification {
                notification_type: NotificationType::Overspending,
                message: "Expenses exceed income".to_string(),
                severity: Severity::High,
            });

        overspending
            .into_iter()
            .chain(self.goals.iter().flat_map(|goal| self.goal_notifications(goal, now)))
            .collect()
    }

    fn goal_notifications(&self, goal: &Goal, now: DateTime<Utc>) -> Vec<Notification> {
        if goal.is_complete() {
            return Vec::new();
        }
        let days = goal.days_until_deadline(now);
        let mut notifications = Vec::new();

        if self.settings.goal_achievements && goal.is_affordable_with(self.summary.current_balance) {
            notifications.push(Notification {
                notification_type: NotificationType::GoalAchievable,
                message: format!("You can complete \"{}\"", goal.title),
                severity: Severity::Medium,
            });
        }
        if self.settings.goal_deadline_reminders && days > 0 && days <= self.settings.reminder_days {
            notifications.push(Notification {
                notification_type: NotificationType::GoalDeadline,
                message: format!("\"{}\" due in {} days", goal.title, days),
                severity: Severity::Medium,
            });
        }
        if self.settings.goal_deadline_reminders && days < 0 {
            notifications.push(Notification {
                notification_type: NotificationType::GoalOverdue,
                message: format!("\"{}\" is overdue", goal.title),
                severity: Severity::High,
            });
        }

        notifications
    }
}

pub(crate) fn high_priority_count(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|n| n.severity == Severity::High)
        .count()
}

pub(crate) fn counts(notifications: &[Notification]) -> NotificationCounts {
    NotificationCounts {
        total: notifications.len(),
        high_priority: high_priority_count(notifications),
        goals: notifications
            .iter()
            .filter(|n| n.notification_type.is_goal_related())
            .count(),
        overspending: notifications
            .iter()
            .filter(|n| n.notification_type == NotificationType::Overspending)
            .count(),
    }
}
