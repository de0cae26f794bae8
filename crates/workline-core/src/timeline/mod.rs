//! Timeline inference engine and its supporting layout types.
//!
//! This module provides:
//! - Deterministic 2D layout of dated tasks (normalized x positions,
//!   greedily packed lanes, version milestones, canvas bounds)
//! - Bottleneck detection against an injected clock
//! - Heuristic connection inference between positioned tasks
//! - Caller-side task filtering and sorting

mod bottleneck;
mod config;
mod connection;
mod data;
mod engine;
mod filter;

pub use bottleneck::Bottleneck;
pub use config::TimelineLayoutConfig;
pub use connection::{infer_connections, TimelineConnection};
pub use data::{TimelineData, TimelineTask, VersionMilestone};
pub use engine::{infer_timeline, TimelineEngine};
pub use filter::{sort_tasks, unique_versions, TaskFilter, TaskSortOrder};
