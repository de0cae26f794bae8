//! Task input records for the timeline engine.
//!
//! Tasks arrive from the surrounding application as loosely-typed records:
//! the target date is a raw string that may fail to parse and the target
//! version is free-form. A parse failure is never an error here; a task
//! without a usable date simply stays off the timeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted target date formats, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"];

/// Status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Done,
    InProgress,
    Todo,
    NotStarted,
}

impl TaskStatus {
    /// Display ordering: done before in-progress before todo before
    /// not-started. Used as a deterministic sort key.
    pub fn display_rank(&self) -> u8 {
        match self {
            Self::Done => 0,
            Self::InProgress => 1,
            Self::Todo => 2,
            Self::NotStarted => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::InProgress => "in-progress",
            Self::Todo => "todo",
            Self::NotStarted => "not-started",
        }
    }
}

/// A task record supplied by the caller.
///
/// `name` is a display label, not a unique key. `labels` is carried through
/// for display and plays no part in layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTask {
    pub name: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl AppTask {
    /// Create a task with no date, version, or labels.
    pub fn new(name: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            name: name.into(),
            status,
            target_date: None,
            target_version: None,
            labels: None,
        }
    }

    /// Set the raw target date string.
    pub fn with_target_date(mut self, date: impl Into<String>) -> Self {
        self.target_date = Some(date.into());
        self
    }

    /// Set the target version string.
    pub fn with_target_version(mut self, version: impl Into<String>) -> Self {
        self.target_version = Some(version.into());
        self
    }

    /// Set display labels.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Parse the raw target date.
    ///
    /// Tries each accepted format in order; an absent or malformed date
    /// uniformly yields `None`.
    pub fn parsed_target_date(&self) -> Option<NaiveDate> {
        let raw = self.target_date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }
}
