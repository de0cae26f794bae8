//! Bottleneck detection heuristic.
//!
//! A task is a bottleneck when it has sat in progress past the configured
//! threshold, or when its target date has passed without the task being
//! done. The engine, the bottleneck-only filter, and the portfolio roll-ups
//! all go through this one predicate.

use chrono::NaiveDate;

use crate::task::TaskStatus;

/// Why a task was flagged as a bottleneck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bottleneck {
    /// In progress for more days past its target than the threshold allows.
    Stalled { days: i64 },
    /// Target date passed without completion.
    Overdue { days: i64 },
}

impl Bottleneck {
    /// Evaluate the heuristic for one dated task.
    ///
    /// Both rules are independently sufficient; when both hold, the stalled
    /// rule supplies the reason.
    pub fn detect(
        status: TaskStatus,
        target_date: NaiveDate,
        today: NaiveDate,
        threshold_days: i64,
    ) -> Option<Self> {
        let days_since = (today - target_date).num_days();

        if status == TaskStatus::InProgress && days_since > threshold_days {
            return Some(Self::Stalled { days: days_since });
        }

        if status != TaskStatus::Done && target_date < today {
            return Some(Self::Overdue { days: days_since });
        }

        None
    }

    /// Reason string surfaced alongside the flag.
    pub fn reason(&self) -> String {
        match self {
            Self::Stalled { days } => format!("in progress {days} days past target"),
            Self::Overdue { days } => format!("overdue by {days} days"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stalled_in_progress_past_threshold() {
        let hit = Bottleneck::detect(
            TaskStatus::InProgress,
            day(2024, 1, 1),
            day(2024, 1, 21),
            14,
        );
        assert_eq!(hit, Some(Bottleneck::Stalled { days: 20 }));
        assert!(hit.unwrap().reason().contains("20 days"));
    }

    #[test]
    fn in_progress_within_threshold_is_just_overdue() {
        let hit = Bottleneck::detect(
            TaskStatus::InProgress,
            day(2024, 1, 11),
            day(2024, 1, 21),
            14,
        );
        assert_eq!(hit, Some(Bottleneck::Overdue { days: 10 }));
    }

    #[test]
    fn overdue_todo_task() {
        let hit = Bottleneck::detect(TaskStatus::Todo, day(2024, 1, 20), day(2024, 1, 21), 14);
        assert_eq!(hit, Some(Bottleneck::Overdue { days: 1 }));
        assert!(hit.unwrap().reason().contains("overdue"));
    }

    #[test]
    fn done_is_never_a_bottleneck() {
        assert_eq!(
            Bottleneck::detect(TaskStatus::Done, day(2023, 1, 1), day(2024, 1, 21), 14),
            None
        );
    }

    #[test]
    fn future_and_same_day_targets_pass() {
        assert_eq!(
            Bottleneck::detect(TaskStatus::Todo, day(2024, 2, 1), day(2024, 1, 21), 14),
            None
        );
        assert_eq!(
            Bottleneck::detect(TaskStatus::Todo, day(2024, 1, 21), day(2024, 1, 21), 14),
            None
        );
    }

    #[test]
    fn stalled_wins_the_reason_when_both_rules_hold() {
        let hit = Bottleneck::detect(
            TaskStatus::InProgress,
            day(2024, 1, 1),
            day(2024, 2, 1),
            14,
        )
        .unwrap();
        assert!(matches!(hit, Bottleneck::Stalled { .. }));
    }
}
