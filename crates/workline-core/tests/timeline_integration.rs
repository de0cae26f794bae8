//! Integration tests for the timeline inference workflow.

use chrono::{DateTime, NaiveDate, Utc};
use workline_core::{
    infer_connections, AppTask, TaskFilter, TaskStatus, TimelineEngine, TimelineLayoutConfig,
};

/// Fixed clock at noon to avoid date boundary issues.
fn clock(date: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&format!("{date}T12:00:00+00:00"))
        .unwrap()
        .with_timezone(&Utc)
}

fn task(name: &str, status: TaskStatus, date: &str, version: &str) -> AppTask {
    AppTask::new(name, status)
        .with_target_date(date)
        .with_target_version(version)
}

#[test]
fn two_task_release_scenario() {
    let tasks = vec![
        task("A", TaskStatus::InProgress, "2024-01-01", "1.0"),
        task("B", TaskStatus::Todo, "2024-01-15", "1.0"),
    ];
    let engine = TimelineEngine::new().with_now(clock("2024-01-20"));
    let data = engine.infer(&tasks, "1.0");

    let a = data.tasks.iter().find(|t| t.task.name == "A").unwrap();
    let b = data.tasks.iter().find(|t| t.task.name == "B").unwrap();
    assert_eq!(a.x_position, 0.0);
    assert_eq!(b.x_position, 1.0);

    // One milestone for "1.0", current, anchored at A's position
    assert_eq!(data.milestones.len(), 1);
    let milestone = &data.milestones[0];
    assert_eq!(milestone.version, "1.0");
    assert!(milestone.is_current);
    assert_eq!(milestone.x_position, a.x_position);
    assert_eq!(milestone.tasks.len(), 2);

    // A has been in progress 19 days against a 14-day threshold
    assert!(a.is_bottleneck);
    assert!(a
        .bottleneck_reason
        .as_deref()
        .unwrap()
        .contains("in progress"));

    // B's target passed five days ago without completion
    assert!(b.is_bottleneck);
    assert!(b.bottleneck_reason.as_deref().unwrap().contains("overdue"));
}

#[test]
fn labels_are_carried_through_untouched() {
    let tasks = vec![task("A", TaskStatus::Todo, "2024-01-01", "1.0")
        .with_labels(vec!["ui".to_string(), "feedback".to_string()])];
    let data = TimelineEngine::new()
        .with_now(clock("2024-01-01"))
        .infer(&tasks, "1.0");
    assert_eq!(
        data.tasks[0].task.labels,
        Some(vec!["ui".to_string(), "feedback".to_string()])
    );
}

#[test]
fn empty_input_yields_empty_layout_without_raising() {
    let engine = TimelineEngine::new().with_now(clock("2024-01-20"));
    let data = engine.infer(&[], "1.0.0");
    assert!(data.tasks.is_empty());
    assert!(data.milestones.is_empty());
    assert_eq!(data.start_date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    assert_eq!(data.end_date, data.start_date);
    assert_eq!(data.canvas_width * data.canvas_height, 0.0);
}

#[test]
fn repeated_invocations_are_bit_identical() {
    let tasks = vec![
        task("release", TaskStatus::InProgress, "2024-02-01", "1.1"),
        task("beta", TaskStatus::Done, "2024-01-10", "1.1"),
        task("polish", TaskStatus::Todo, "2024-02-20", "1.2"),
        AppTask::new("someday", TaskStatus::NotStarted),
    ];
    let engine = TimelineEngine::new().with_now(clock("2024-02-10"));
    let first = engine.infer(&tasks, "1.1");
    let second = engine.infer(&tasks, "1.1");
    assert_eq!(first, second);
    assert_eq!(
        infer_connections(&first.tasks),
        infer_connections(&second.tasks)
    );
}

#[test]
fn filter_then_infer_matches_caller_workflow() {
    let tasks = vec![
        task("ship", TaskStatus::InProgress, "2024-01-01", "1.0"),
        task("fix", TaskStatus::Todo, "2024-01-10", "1.0"),
        task("plan", TaskStatus::NotStarted, "2024-03-01", "2.0"),
    ];
    let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let config = TimelineLayoutConfig::default();

    let filter = TaskFilter {
        version: Some("1.0".to_string()),
        ..Default::default()
    };
    let selected = filter.apply(&tasks, today, config.bottleneck_threshold_days);
    assert_eq!(selected.len(), 2);

    let data = TimelineEngine::with_config(config)
        .with_now(clock("2024-01-20"))
        .infer(&selected, "1.0");
    assert_eq!(data.tasks.len(), 2);
    assert_eq!(data.date_range_days(), 9);
    assert_eq!(data.milestones.len(), 1);
}

#[test]
fn connections_chain_version_groups_in_time_order() {
    let tasks = vec![
        task("design", TaskStatus::Done, "2024-01-01", "1.0"),
        task("build", TaskStatus::InProgress, "2024-01-10", "1.0"),
        task("launch", TaskStatus::NotStarted, "2024-01-20", "1.0"),
        task("spike", TaskStatus::Todo, "2024-01-05", "2.0"),
    ];
    let data = TimelineEngine::new()
        .with_now(clock("2024-01-02"))
        .infer(&tasks, "1.0");

    let connections = infer_connections(&data.tasks);
    assert_eq!(connections.len(), 2);
    assert!(connections[0].is_active()); // design -> build
    assert!(!connections[1].is_active()); // build -> launch (unstarted)
}

#[test]
fn overlapping_window_tasks_never_share_a_lane_below_capacity() {
    // 40-day span at 8 px/day: each node occupies 200 px = 25 days, so
    // four tasks 10 days apart force staggered lanes.
    let tasks = vec![
        task("w1", TaskStatus::Todo, "2024-01-01", "1.0"),
        task("w2", TaskStatus::Todo, "2024-01-11", "1.0"),
        task("w3", TaskStatus::Todo, "2024-01-21", "1.0"),
        task("w4", TaskStatus::Todo, "2024-02-10", "1.0"),
    ];
    let data = TimelineEngine::new()
        .with_now(clock("2024-01-01"))
        .infer(&tasks, "1.0");

    let ratio = (180.0 + 20.0) / (40.0 * 8.0);
    for (i, a) in data.tasks.iter().enumerate() {
        for b in data.tasks.iter().skip(i + 1) {
            if a.y_lane == b.y_lane {
                let (first, second) = if a.x_position <= b.x_position {
                    (a, b)
                } else {
                    (b, a)
                };
                assert!(
                    second.x_position >= first.x_position + ratio,
                    "{} and {} overlap in lane {}",
                    first.task.name,
                    second.task.name,
                    a.y_lane
                );
            }
        }
    }
}
