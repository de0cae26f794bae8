use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use workline_core::portfolio::{count_bottlenecks, load_apps, AppQuery, AppSortOrder};
use workline_core::{HealthStatus, TaskStats, TimelineLayoutConfig};

#[derive(Subcommand)]
pub enum AppsAction {
    /// List apps with roll-up statistics
    List {
        /// Portfolio JSON file
        file: PathBuf,
        /// Keep only apps with at least one bottleneck
        #[arg(long)]
        with_bottleneck: bool,
        /// Keep only apps with at least one dated task
        #[arg(long)]
        with_schedule: bool,
        /// Keep only high-priority apps
        #[arg(long)]
        high_priority: bool,
        /// Sort order (default, bottleneck, inprogress, schedule, priority)
        #[arg(long)]
        sort: Option<String>,
        /// Pin the clock (YYYY-MM-DD) for reproducible output
        #[arg(long)]
        now: Option<NaiveDate>,
    },
}

pub fn run(action: AppsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AppsAction::List {
            file,
            with_bottleneck,
            with_schedule,
            high_priority,
            sort,
            now,
        } => {
            let json = fs::read_to_string(&file)?;
            let apps = load_apps(&json)?;
            let today = super::resolve_now(now).date_naive();
            let threshold = TimelineLayoutConfig::default().bottleneck_threshold_days;

            let query = AppQuery {
                only_with_bottleneck: with_bottleneck,
                only_with_schedule: with_schedule,
                only_high_priority: high_priority,
                sort: match sort.as_deref() {
                    None => AppSortOrder::Default,
                    Some(raw) => parse_sort_order(raw)?,
                },
            };

            let report: Vec<AppSummary> = query
                .apply(&apps, today, threshold)
                .into_iter()
                .map(|app| {
                    let stats = app.stats();
                    AppSummary {
                        name: app.name.clone(),
                        current_version: app.current_version.clone(),
                        completion_rate: stats.completion_rate(),
                        health: stats.health(),
                        stats,
                        bottlenecks: count_bottlenecks(&app.tasks, today, threshold),
                        scheduled_tasks: app.scheduled_task_count(),
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppSummary {
    name: String,
    current_version: String,
    stats: TaskStats,
    completion_rate: f64,
    health: HealthStatus,
    bottlenecks: usize,
    scheduled_tasks: usize,
}

fn parse_sort_order(raw: &str) -> Result<AppSortOrder, Box<dyn std::error::Error>> {
    match raw {
        "default" => Ok(AppSortOrder::Default),
        "bottleneck" => Ok(AppSortOrder::Bottleneck),
        "inprogress" => Ok(AppSortOrder::InProgress),
        "schedule" => Ok(AppSortOrder::Schedule),
        "priority" => Ok(AppSortOrder::Priority),
        other => Err(format!("unknown sort order: {other}").into()),
    }
}
