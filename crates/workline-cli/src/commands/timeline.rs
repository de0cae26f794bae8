use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use workline_core::portfolio::{find_app, load_apps};
use workline_core::timeline::{
    infer_connections, sort_tasks, TaskFilter, TaskSortOrder, TimelineEngine,
    TimelineLayoutConfig,
};
use workline_core::{AppRecord, CoreError, TaskStatus};

#[derive(Args)]
pub struct TimelineOpts {
    /// Portfolio JSON file
    pub file: PathBuf,
    /// App name to lay out
    #[arg(long)]
    pub app: String,
    /// Pin the clock (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub now: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Compute the full layout
    Layout {
        #[command(flatten)]
        opts: TimelineOpts,
        /// Pixels per day (zoom)
        #[arg(long)]
        zoom: Option<f64>,
        /// Keep only these statuses (done, in-progress, todo, not-started)
        #[arg(long = "status")]
        statuses: Vec<String>,
        /// Keep only bottleneck tasks
        #[arg(long)]
        bottleneck_only: bool,
        /// Keep only tasks targeting this version
        #[arg(long)]
        version: Option<String>,
        /// Pre-sort tasks (date, status, version)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Infer connections between positioned tasks
    Connections {
        #[command(flatten)]
        opts: TimelineOpts,
    },
    /// List bottleneck tasks
    Bottlenecks {
        #[command(flatten)]
        opts: TimelineOpts,
    },
}

pub fn run(action: TimelineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimelineAction::Layout {
            opts,
            zoom,
            statuses,
            bottleneck_only,
            version,
            sort,
        } => {
            let (app, now) = load(&opts)?;
            let mut config = TimelineLayoutConfig::default();
            if let Some(ppd) = zoom {
                config.pixels_per_day = ppd;
            }
            config.validate()?;

            let filter = TaskFilter {
                statuses: parse_statuses(&statuses)?,
                bottleneck_only,
                version,
            };
            let mut tasks =
                filter.apply(&app.tasks, now.date_naive(), config.bottleneck_threshold_days);
            if let Some(raw) = sort {
                sort_tasks(&mut tasks, parse_sort_order(&raw)?);
            }

            let data = TimelineEngine::with_config(config)
                .with_now(now)
                .infer(&tasks, &app.current_version);
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        TimelineAction::Connections { opts } => {
            let (app, now) = load(&opts)?;
            let data = TimelineEngine::new()
                .with_now(now)
                .infer(&app.tasks, &app.current_version);
            let connections = infer_connections(&data.tasks);
            let report: Vec<ConnectionReport> = connections
                .iter()
                .map(|c| ConnectionReport {
                    from: c.from.task.name.clone(),
                    to: c.to.task.name.clone(),
                    is_active: c.is_active(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        TimelineAction::Bottlenecks { opts } => {
            let (app, now) = load(&opts)?;
            let data = TimelineEngine::new()
                .with_now(now)
                .infer(&app.tasks, &app.current_version);
            let report: Vec<BottleneckReport> = data
                .tasks
                .iter()
                .filter(|t| t.is_bottleneck)
                .map(|t| BottleneckReport {
                    name: t.task.name.clone(),
                    status: t.task.status.as_str(),
                    target_date: t.target_date,
                    reason: t.bottleneck_reason.clone().unwrap_or_default(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionReport {
    from: String,
    to: String,
    is_active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BottleneckReport {
    name: String,
    status: &'static str,
    target_date: NaiveDate,
    reason: String,
}

fn load(opts: &TimelineOpts) -> Result<(AppRecord, chrono::DateTime<chrono::Utc>), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(&opts.file)?;
    let apps = load_apps(&json)?;
    let app = find_app(&apps, &opts.app)
        .cloned()
        .ok_or_else(|| CoreError::AppNotFound {
            name: opts.app.clone(),
        })?;
    Ok((app, super::resolve_now(opts.now)))
}

fn parse_statuses(raw: &[String]) -> Result<Option<Vec<TaskStatus>>, Box<dyn std::error::Error>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.iter()
        .map(|s| parse_status(s))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_status(raw: &str) -> Result<TaskStatus, Box<dyn std::error::Error>> {
    match raw {
        "done" => Ok(TaskStatus::Done),
        "in-progress" => Ok(TaskStatus::InProgress),
        "todo" => Ok(TaskStatus::Todo),
        "not-started" => Ok(TaskStatus::NotStarted),
        other => Err(format!("unknown status: {other}").into()),
    }
}

fn parse_sort_order(raw: &str) -> Result<TaskSortOrder, Box<dyn std::error::Error>> {
    match raw {
        "date" => Ok(TaskSortOrder::Date),
        "status" => Ok(TaskSortOrder::Status),
        "version" => Ok(TaskSortOrder::Version),
        other => Err(format!("unknown sort order: {other}").into()),
    }
}
