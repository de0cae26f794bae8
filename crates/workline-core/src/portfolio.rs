//! Portfolio-level roll-ups over app records.
//!
//! An app record is the caller-supplied snapshot of one app: its current
//! version and its full task list. The helpers here compute the summary
//! numbers a portfolio overview is built from: per-status counts,
//! completion health, bottleneck totals, and app-list filtering/sorting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::{AppTask, TaskStatus};
use crate::timeline::Bottleneck;

/// App priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPriority {
    High,
    Medium,
    Low,
}

impl AppPriority {
    fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl Default for AppPriority {
    fn default() -> Self {
        AppPriority::Medium
    }
}

/// One app in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub name: String,
    pub current_version: String,
    #[serde(default)]
    pub priority: AppPriority,
    #[serde(default)]
    pub tasks: Vec<AppTask>,
}

impl AppRecord {
    /// Per-status counts over this app's tasks.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Tasks carrying a parseable target date.
    pub fn scheduled_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.parsed_target_date().is_some())
            .count()
    }
}

/// Per-status task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub not_started: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[AppTask]) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            done: 0,
            in_progress: 0,
            todo: 0,
            not_started: 0,
        };
        for task in tasks {
            match task.status {
                TaskStatus::Done => stats.done += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::NotStarted => stats.not_started += 1,
            }
        }
        stats
    }

    /// Completion percentage (0-100); 0 for an empty list.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64 * 100.0
    }

    /// Traffic-light health derived from the completion rate.
    pub fn health(&self) -> HealthStatus {
        let rate = self.completion_rate();
        if rate >= 60.0 {
            HealthStatus::Healthy
        } else if rate >= 30.0 {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }
}

/// App health buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

/// Count bottleneck tasks in a list.
pub fn count_bottlenecks(tasks: &[AppTask], today: NaiveDate, threshold_days: i64) -> usize {
    tasks
        .iter()
        .filter(|t| {
            t.parsed_target_date()
                .and_then(|date| Bottleneck::detect(t.status, date, today, threshold_days))
                .is_some()
        })
        .count()
}

/// Sort orders for the app overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppSortOrder {
    /// Keep the incoming order
    Default,
    /// Most bottlenecks first
    Bottleneck,
    /// Most in-progress tasks first
    InProgress,
    /// Most scheduled (dated) tasks first
    Schedule,
    /// High priority first
    Priority,
}

impl Default for AppSortOrder {
    fn default() -> Self {
        AppSortOrder::Default
    }
}

/// Filter and sort criteria for the app overview.
#[derive(Debug, Clone, Default)]
pub struct AppQuery {
    pub only_with_bottleneck: bool,
    pub only_with_schedule: bool,
    pub only_high_priority: bool,
    pub sort: AppSortOrder,
}

impl AppQuery {
    /// Apply the query to a portfolio. All sorts are stable with a name
    /// tiebreak, so the result is deterministic.
    pub fn apply(
        &self,
        apps: &[AppRecord],
        today: NaiveDate,
        threshold_days: i64,
    ) -> Vec<AppRecord> {
        let mut selected: Vec<AppRecord> = apps
            .iter()
            .filter(|app| {
                !self.only_with_bottleneck
                    || count_bottlenecks(&app.tasks, today, threshold_days) > 0
            })
            .filter(|app| !self.only_with_schedule || app.scheduled_task_count() > 0)
            .filter(|app| !self.only_high_priority || app.priority == AppPriority::High)
            .cloned()
            .collect();

        match self.sort {
            AppSortOrder::Default => {}
            AppSortOrder::Bottleneck => {
                selected.sort_by(|a, b| {
                    count_bottlenecks(&b.tasks, today, threshold_days)
                        .cmp(&count_bottlenecks(&a.tasks, today, threshold_days))
                        .then_with(|| a.name.cmp(&b.name))
                });
            }
            AppSortOrder::InProgress => {
                selected.sort_by(|a, b| {
                    b.stats()
                        .in_progress
                        .cmp(&a.stats().in_progress)
                        .then_with(|| a.name.cmp(&b.name))
                });
            }
            AppSortOrder::Schedule => {
                selected.sort_by(|a, b| {
                    b.scheduled_task_count()
                        .cmp(&a.scheduled_task_count())
                        .then_with(|| a.name.cmp(&b.name))
                });
            }
            AppSortOrder::Priority => {
                selected.sort_by(|a, b| {
                    a.priority
                        .rank()
                        .cmp(&b.priority.rank())
                        .then_with(|| a.name.cmp(&b.name))
                });
            }
        }

        selected
    }
}

/// Parse a portfolio from the caller's JSON record shape.
pub fn load_apps(json: &str) -> Result<Vec<AppRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Find an app record by name.
pub fn find_app<'a>(apps: &'a [AppRecord], name: &str) -> Option<&'a AppRecord> {
    apps.iter().find(|a| a.name == name)
}
