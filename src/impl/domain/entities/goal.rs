use chrono::NaiveDate;

use super::entity_id::GoalId;

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub target_amount: f64,
    /// Intended to stay within [0, target_amount]. Commands clamp it, imported
    /// data may not respect it.
    pub current_amount: f64,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub target_amount: f64,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Completed,
    Overdue,
    AlmostThere,
    OnTrack,
    JustStarted,
}
