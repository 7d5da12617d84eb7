use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::entities::{Goal, GoalDraft, GoalId, GoalSettings, GoalStatus};

use super::utils::{days_until, start_of_day};

/// Progress at or above which a goal is "on track".
const ON_TRACK_THRESHOLD: f64 = 50.0;

impl Goal {
    /// Saved share of the target in percent. A non-positive target counts as
    /// already reached.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            100.0
        } else {
            self.current_amount / self.target_amount * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 100.0
    }

    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.deadline, now)
    }

    /// Whether `balance` covers what is still missing.
    pub fn is_affordable_with(&self, balance: f64) -> bool {
        balance >= self.target_amount - self.current_amount
    }

    pub fn status(&self, now: DateTime<Utc>, settings: &GoalSettings) -> GoalStatus {
        let progress = self.progress();
        if progress >= 100.0 {
            GoalStatus::Completed
        } else if start_of_day(self.deadline) < now {
            GoalStatus::Overdue
        } else if progress >= settings.progress_notification_threshold {
            GoalStatus::AlmostThere
        } else if progress >= ON_TRACK_THRESHOLD {
            GoalStatus::OnTrack
        } else {
            GoalStatus::JustStarted
        }
    }

    /// Copy of the goal with `current_amount` set to `amount`, clamped to
    /// [0, target].
    pub fn with_current_amount(&self, amount: f64) -> Goal {
        Goal {
            current_amount: self.clamp(amount),
            ..self.clone()
        }
    }

    pub fn with_added_funds(&self, delta: f64) -> Goal {
        self.with_current_amount(self.current_amount + delta)
    }

    fn clamp(&self, amount: f64) -> f64 {
        // NaN collapses to 0 through f64::max.
        self.target_amount.min(amount.max(0.0))
    }
}

impl GoalDraft {
    pub fn new(title: impl Into<String>, target_amount: f64, deadline: NaiveDate) -> Self {
        Self {
            title: title.into(),
            target_amount,
            deadline,
        }
    }

    /// Draft whose deadline is `default_deadline_days` after `today`.
    pub fn with_default_deadline(
        title: impl Into<String>,
        target_amount: f64,
        today: NaiveDate,
        settings: &GoalSettings,
    ) -> Self {
        let deadline = Duration::try_days(settings.default_deadline_days)
            .and_then(|d| today.checked_add_signed(d))
            .unwrap_or(today);
        Self::new(title, target_amount, deadline)
    }

    pub(crate) fn into_goal(self, id: GoalId) -> Goal {
        Goal {
            id,
            title: self.title,
            target_amount: self.target_amount,
            current_amount: 0.0,
            deadline: self.deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn goal(target: f64, current: f64, deadline: &str) -> Goal {
        Goal {
            id: GoalId::from("g1"),
            title: "Emergency fund".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: NaiveDate::parse_from_str(deadline, "%Y-%m-%d").unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn progress_is_percentage_of_target() {
        assert_eq!(goal(500.0, 125.0, "2025-01-01").progress(), 25.0);
        assert_eq!(goal(500.0, 500.0, "2025-01-01").progress(), 100.0);
    }

    #[test]
    fn zero_target_counts_as_complete() {
        let g = goal(0.0, 0.0, "2025-01-01");
        assert_eq!(g.progress(), 100.0);
        assert!(g.is_complete());
    }

    #[test]
    fn status_follows_progress_bands() {
        let settings = GoalSettings::default();
        assert_eq!(goal(100.0, 100.0, "2020-01-01").status(now(), &settings), GoalStatus::Completed);
        assert_eq!(goal(100.0, 10.0, "2024-06-14").status(now(), &settings), GoalStatus::Overdue);
        assert_eq!(goal(100.0, 80.0, "2025-01-01").status(now(), &settings), GoalStatus::AlmostThere);
        assert_eq!(goal(100.0, 60.0, "2025-01-01").status(now(), &settings), GoalStatus::OnTrack);
        assert_eq!(goal(100.0, 10.0, "2025-01-01").status(now(), &settings), GoalStatus::JustStarted);
    }

    #[test]
    fn update_clamps_into_range() {
        let g = goal(500.0, 100.0, "2025-01-01");
        assert_eq!(g.with_current_amount(900.0).current_amount, 500.0);
        assert_eq!(g.with_current_amount(-20.0).current_amount, 0.0);
        assert_eq!(g.with_added_funds(150.0).current_amount, 250.0);
        assert_eq!(g.with_added_funds(-400.0).current_amount, 0.0);
        assert_eq!(g.with_current_amount(f64::NAN).current_amount, 0.0);
    }

    #[test]
    fn default_deadline_uses_settings() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let draft = GoalDraft::with_default_deadline("Trip", 1000.0, today, &GoalSettings::default());
        assert_eq!(draft.deadline, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

        let settings = GoalSettings {
            default_deadline_days: i64::MAX,
            ..GoalSettings::default()
        };
        let draft = GoalDraft::with_default_deadline("Trip", 1000.0, today, &settings);
        assert_eq!(draft.deadline, today);
    }

    proptest! {
        #[test]
        fn progress_is_monotonic_in_current_amount(
            target in 1.0f64..1_000_000.0,
            a in 0.0f64..1_000_000.0,
            b in 0.0f64..1_000_000.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let g = goal(target, 0.0, "2025-01-01");
            prop_assert!(g.with_current_amount(lo).progress() <= g.with_current_amount(hi).progress());
        }

        #[test]
        fn clamped_amount_stays_in_range(
            target in 0.0f64..1_000_000.0,
            start in 0.0f64..1_000_000.0,
            delta in -2_000_000.0f64..2_000_000.0,
        ) {
            let g = goal(target, start.min(target), "2025-01-01").with_added_funds(delta);
            prop_assert!(g.current_amount >= 0.0);
            prop_assert!(g.current_amount <= target);
        }
    }
}
