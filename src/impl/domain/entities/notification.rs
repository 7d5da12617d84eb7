#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    Overspending,
    GoalAchievable,
    GoalDeadline,
    GoalOverdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
    pub severity: Severity,
}

/// Badge counts shown next to navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationCounts {
    pub total: usize,
    pub high_priority: usize,
    pub goals: usize,
    pub overspending: usize,
}
