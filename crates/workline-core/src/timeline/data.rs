//! Timeline layout output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::TimelineLayoutConfig;
use crate::task::AppTask;

/// A task placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTask {
    pub task: AppTask,
    /// Resolved target date.
    pub target_date: NaiveDate,
    /// Normalized horizontal position (0.0 - 1.0).
    pub x_position: f64,
    /// Lane index (0, 1, 2...).
    pub y_lane: usize,
    /// Whether this task tripped the bottleneck heuristic.
    pub is_bottleneck: bool,
    /// Why it tripped, when it did.
    pub bottleneck_reason: Option<String>,
}

/// A version milestone marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMilestone {
    pub version: String,
    /// Position of the group's earliest-dated task.
    pub x_position: f64,
    /// Tasks belonging to this version.
    pub tasks: Vec<AppTask>,
    /// True iff the version string equals the app's current version.
    pub is_current: bool,
}

/// Full timeline layout for one app.
///
/// Constructed fresh on every engine call; there is no incremental update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineData {
    pub tasks: Vec<TimelineTask>,
    pub milestones: Vec<VersionMilestone>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub config: TimelineLayoutConfig,
}

impl TimelineData {
    /// Empty layout for the no-dated-tasks case.
    pub fn empty(today: NaiveDate, config: TimelineLayoutConfig) -> Self {
        Self {
            tasks: Vec::new(),
            milestones: Vec::new(),
            start_date: today,
            end_date: today,
            canvas_width: 0.0,
            canvas_height: 0.0,
            config,
        }
    }

    /// Span of the layout in days.
    pub fn date_range_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Number of lanes actually used.
    pub fn used_lanes(&self) -> usize {
        self.tasks.iter().map(|t| t.y_lane + 1).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn placed(name: &str, lane: usize) -> TimelineTask {
        TimelineTask {
            task: AppTask::new(name, TaskStatus::Todo),
            target_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            x_position: 0.0,
            y_lane: lane,
            is_bottleneck: false,
            bottleneck_reason: None,
        }
    }

    #[test]
    fn empty_layout_is_zero_sized() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let data = TimelineData::empty(today, TimelineLayoutConfig::default());
        assert!(data.tasks.is_empty());
        assert!(data.milestones.is_empty());
        assert_eq!(data.start_date, today);
        assert_eq!(data.end_date, today);
        assert_eq!(data.canvas_width, 0.0);
        assert_eq!(data.canvas_height, 0.0);
        assert_eq!(data.date_range_days(), 0);
        assert_eq!(data.used_lanes(), 0);
    }

    #[test]
    fn used_lanes_counts_highest_lane() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let mut data = TimelineData::empty(today, TimelineLayoutConfig::default());
        data.tasks = vec![placed("a", 0), placed("b", 2), placed("c", 1)];
        assert_eq!(data.used_lanes(), 3);
    }
}
