//! Timeline inference engine.
//!
//! Derives a full 2D layout from a flat task list:
//! - Tasks without a parseable target date are skipped
//! - Each remaining task gets a normalized x position and a packed lane
//! - Bottlenecks are flagged against the engine's clock
//! - Version milestones anchor at their group's earliest task
//!
//! The engine is pure and stateless between calls: no I/O, no shared
//! mutable state, and every call recomputes the layout from scratch, so
//! concurrent calls with different inputs are safe.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::bottleneck::Bottleneck;
use super::config::TimelineLayoutConfig;
use super::data::{TimelineData, TimelineTask, VersionMilestone};
use crate::task::AppTask;

/// Horizontal clearance between nodes sharing a lane, in pixels.
const NODE_GAP: f64 = 20.0;

/// Timeline inference engine.
///
/// Holds the layout configuration and the clock used for bottleneck
/// detection. The clock is injectable so layouts are reproducible in tests.
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    config: TimelineLayoutConfig,
    now: DateTime<Utc>,
}

impl TimelineEngine {
    /// Create an engine with the default layout configuration.
    pub fn new() -> Self {
        Self {
            config: TimelineLayoutConfig::default(),
            now: Utc::now(),
        }
    }

    /// Create with a custom configuration.
    pub fn with_config(config: TimelineLayoutConfig) -> Self {
        Self {
            config,
            now: Utc::now(),
        }
    }

    /// Pin the clock used for bottleneck detection.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Infer the timeline layout for one app's task list.
    pub fn infer(&self, tasks: &[AppTask], current_version: &str) -> TimelineData {
        let today = self.now.date_naive();

        // 1. Keep only tasks with a parseable target date
        let mut dated: Vec<(AppTask, NaiveDate)> = tasks
            .iter()
            .filter_map(|t| t.parsed_target_date().map(|d| (t.clone(), d)))
            .collect();

        if dated.is_empty() {
            return TimelineData::empty(today, self.config.clone());
        }

        // 2. Deterministic order: date, then display rank, then name
        dated.sort_by(|(a, da), (b, db)| {
            da.cmp(db)
                .then_with(|| a.status.display_rank().cmp(&b.status.display_rank()))
                .then_with(|| a.name.cmp(&b.name))
        });

        // 3. Date range across the dated tasks
        let start_date = dated[0].1;
        let end_date = dated[dated.len() - 1].1;
        let range_days = (end_date - start_date).num_days();

        // 4. Positions and lanes
        let mut placed = self.assign_lanes(&dated, start_date, range_days);

        // 5. Bottleneck flags
        for task in &mut placed {
            if let Some(hit) = Bottleneck::detect(
                task.task.status,
                task.target_date,
                today,
                self.config.bottleneck_threshold_days,
            ) {
                task.is_bottleneck = true;
                task.bottleneck_reason = Some(hit.reason());
            }
        }

        // 6. Version milestones
        let milestones = self.create_milestones(&dated, current_version, start_date, range_days);

        // 7. Canvas size from the date span and the lanes actually used
        let used_lanes = placed.iter().map(|t| t.y_lane + 1).max().unwrap_or(0);
        let canvas_width = range_days as f64 * self.config.pixels_per_day
            + self.config.left_margin
            + self.config.right_margin;
        let canvas_height = used_lanes as f64 * (self.config.lane_height + self.config.lane_spacing)
            + self.config.top_margin
            + self.config.bottom_margin;

        TimelineData {
            tasks: placed,
            milestones,
            start_date,
            end_date,
            canvas_width,
            canvas_height,
            config: self.config.clone(),
        }
    }

    /// Place tasks left to right, packing lanes greedily.
    ///
    /// First-fit over lanes in index order while a free lane exists; at
    /// `max_lanes` the lane whose occupancy ends earliest absorbs the
    /// overflow. Lanes are a bounded resource and crowding is accepted
    /// over unbounded growth.
    fn assign_lanes(
        &self,
        dated: &[(AppTask, NaiveDate)],
        start_date: NaiveDate,
        range_days: i64,
    ) -> Vec<TimelineTask> {
        // Node footprint as a fraction of the full span. A zero-day span
        // collapses every x to 0.0, so the footprint is pinned to the whole
        // window and same-day tasks still stack into separate lanes.
        let node_ratio = if range_days > 0 {
            (self.config.node_width + NODE_GAP) / (range_days as f64 * self.config.pixels_per_day)
        } else {
            1.0
        };
        let max_lanes = self.config.max_lanes.max(1);

        // Normalized x where each lane's last node ends
        let mut lane_ends: Vec<f64> = Vec::new();
        let mut placed = Vec::with_capacity(dated.len());

        for (task, date) in dated {
            let x = if range_days > 0 {
                ((*date - start_date).num_days() as f64 / range_days as f64).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let lane = match lane_ends.iter().position(|&end| x >= end) {
                Some(free) => free,
                None if lane_ends.len() < max_lanes => {
                    lane_ends.push(0.0);
                    lane_ends.len() - 1
                }
                None => earliest_free_lane(&lane_ends),
            };
            lane_ends[lane] = x + node_ratio;

            placed.push(TimelineTask {
                task: task.clone(),
                target_date: *date,
                x_position: x,
                y_lane: lane,
                is_bottleneck: false,
                bottleneck_reason: None,
            });
        }

        placed
    }

    /// Group dated tasks by exact version string and anchor each milestone
    /// at its earliest task. Versionless tasks stay on the timeline but
    /// join no milestone.
    fn create_milestones(
        &self,
        dated: &[(AppTask, NaiveDate)],
        current_version: &str,
        start_date: NaiveDate,
        range_days: i64,
    ) -> Vec<VersionMilestone> {
        let mut groups: BTreeMap<&str, Vec<&(AppTask, NaiveDate)>> = BTreeMap::new();
        for entry in dated {
            if let Some(version) = entry.0.target_version.as_deref() {
                groups.entry(version).or_default().push(entry);
            }
        }

        let mut milestones: Vec<VersionMilestone> = groups
            .into_iter()
            .map(|(version, entries)| {
                // dated is sorted by date, so the first entry is the anchor
                let anchor = entries[0].1;
                let x = if range_days > 0 {
                    ((anchor - start_date).num_days() as f64 / range_days as f64).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                VersionMilestone {
                    version: version.to_string(),
                    x_position: x,
                    tasks: entries.iter().map(|(t, _)| t.clone()).collect(),
                    is_current: version == current_version,
                }
            })
            .collect();

        // Stable sort: x decides, the BTreeMap's version order breaks ties
        milestones.sort_by(|a, b| a.x_position.total_cmp(&b.x_position));
        milestones
    }
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the lane whose occupancy ends earliest (lowest index on ties).
fn earliest_free_lane(lane_ends: &[f64]) -> usize {
    let mut best = 0;
    for (i, &end) in lane_ends.iter().enumerate().skip(1) {
        if end < lane_ends[best] {
            best = i;
        }
    }
    best
}

/// Convenience wrapper using the current wall clock.
pub fn infer_timeline(
    tasks: &[AppTask],
    current_version: &str,
    config: TimelineLayoutConfig,
) -> TimelineData {
    TimelineEngine::with_config(config).infer(tasks, current_version)
}
