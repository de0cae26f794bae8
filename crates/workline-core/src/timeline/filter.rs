//! Caller-side task selection.
//!
//! The surrounding application narrows and orders an app's task list before
//! handing it to the engine. These helpers keep that selection logic in one
//! place so every caller applies the same rules.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bottleneck::Bottleneck;
use crate::task::{AppTask, TaskStatus};

/// Sort orders for a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSortOrder {
    /// Chronological; the engine applies this order itself
    Date,
    /// Status rank, then date, then name
    Status,
    /// Version string, then date, then name; versionless last
    Version,
}

/// Filter criteria for a task list.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Keep only these statuses (None keeps all)
    pub statuses: Option<Vec<TaskStatus>>,
    /// Keep only tasks tripping the bottleneck heuristic
    pub bottleneck_only: bool,
    /// Keep only tasks targeting this exact version string
    pub version: Option<String>,
}

impl TaskFilter {
    /// Apply the filter, returning the surviving tasks.
    pub fn apply(&self, tasks: &[AppTask], today: NaiveDate, threshold_days: i64) -> Vec<AppTask> {
        tasks
            .iter()
            .filter(|t| match &self.statuses {
                Some(keep) => keep.contains(&t.status),
                None => true,
            })
            .filter(|t| {
                if !self.bottleneck_only {
                    return true;
                }
                t.parsed_target_date()
                    .and_then(|date| Bottleneck::detect(t.status, date, today, threshold_days))
                    .is_some()
            })
            .filter(|t| match &self.version {
                Some(v) => t.target_version.as_deref() == Some(v.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }
}

/// Sort a task list in place by the chosen order.
pub fn sort_tasks(tasks: &mut [AppTask], order: TaskSortOrder) {
    match order {
        TaskSortOrder::Date => {
            tasks.sort_by(|a, b| cmp_dates(a, b).then_with(|| a.name.cmp(&b.name)));
        }
        TaskSortOrder::Status => {
            tasks.sort_by(|a, b| {
                a.status
                    .display_rank()
                    .cmp(&b.status.display_rank())
                    .then_with(|| cmp_dates(a, b))
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
        TaskSortOrder::Version => {
            tasks.sort_by(|a, b| {
                cmp_versions(a, b)
                    .then_with(|| cmp_dates(a, b))
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }
}

/// Distinct target versions in a task list, sorted.
pub fn unique_versions(tasks: &[AppTask]) -> Vec<String> {
    let mut versions: Vec<String> = tasks
        .iter()
        .filter_map(|t| t.target_version.clone())
        .collect();
    versions.sort();
    versions.dedup();
    versions
}

// Dateless tasks sort behind any dated task.
fn cmp_dates(a: &AppTask, b: &AppTask) -> Ordering {
    match (a.parsed_target_date(), b.parsed_target_date()) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// Versionless tasks sort behind any explicit version.
fn cmp_versions(a: &AppTask, b: &AppTask) -> Ordering {
    match (a.target_version.as_deref(), b.target_version.as_deref()) {
        (Some(va), Some(vb)) => va.cmp(vb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
