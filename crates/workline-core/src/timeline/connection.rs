//! Heuristic connection inference between positioned tasks.
//!
//! Connections are recomputed for every render and never stored: the edge
//! set is a pure function of the positioned task list. Tasks sharing a
//! target version are chained in time order; versionless tasks form their
//! own chain. The inferred edges are plausible sequencing, not a real
//! dependency graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::data::TimelineTask;
use crate::task::TaskStatus;

/// An inferred edge between two positioned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConnection {
    pub from: TimelineTask,
    pub to: TimelineTask,
}

impl TimelineConnection {
    /// A connection is active when neither endpoint is still unstarted.
    pub fn is_active(&self) -> bool {
        self.from.task.status != TaskStatus::NotStarted
            && self.to.task.status != TaskStatus::NotStarted
    }
}

/// Infer sequential connections between tasks sharing a version.
///
/// The result is deterministic and independent of input order: tasks are
/// re-sorted by (date, display rank, name) and version groups are visited
/// in key order.
pub fn infer_connections(tasks: &[TimelineTask]) -> Vec<TimelineConnection> {
    let mut ordered = tasks.to_vec();
    ordered.sort_by(|a, b| {
        a.target_date
            .cmp(&b.target_date)
            .then_with(|| a.task.status.display_rank().cmp(&b.task.status.display_rank()))
            .then_with(|| a.task.name.cmp(&b.task.name))
    });

    let mut groups: BTreeMap<Option<String>, Vec<TimelineTask>> = BTreeMap::new();
    for task in ordered {
        groups
            .entry(task.task.target_version.clone())
            .or_default()
            .push(task);
    }

    let mut connections = Vec::new();
    for chain in groups.values() {
        for pair in chain.windows(2) {
            connections.push(TimelineConnection {
                from: pair[0].clone(),
                to: pair[1].clone(),
            });
        }
    }
    connections
}
