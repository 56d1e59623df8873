mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use monoguard_core::api::{
    ExecutorOptions, LintTask, TargetKind, TaskExecutor, TaskResult, TaskState, UnifiedTask,
};

use common::{target_with_outcomes, RecordingReporter};

fn executor_with(
    reporter: Arc<RecordingReporter>,
    max_concurrency: usize,
) -> TaskExecutor {
    TaskExecutor::new(reporter, ExecutorOptions { max_concurrency })
}

#[tokio::test]
async fn empty_task_list_passes_without_completion_hook() {
    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter.clone(), 4);

    assert!(executor.execute(Vec::new()).await);
    assert_eq!(reporter.completions.load(Ordering::SeqCst), 0);
    assert!(reporter.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn statuses_fully_populated_before_any_resolution() {
    // Commands that never resolve: the status structure must still be fully
    // populated, and nothing may ever reach a terminal state.
    let make_target = |id: &str| {
        let subtasks = (0..3)
            .map(|idx| {
                LintTask::new(format!("check-{idx}"), format!("Check {idx}"), || async {
                    futures::future::pending::<()>().await;
                    Ok(TaskResult::passed("unreachable"))
                })
            })
            .collect();
        UnifiedTask::new(id, TargetKind::Backend, subtasks)
    };

    let reporter = Arc::new(RecordingReporter::default());
    let executor = Arc::new(executor_with(reporter, 2));
    let statuses = executor.statuses();

    let runner = executor.clone();
    let handle = tokio::spawn(async move {
        runner
            .execute(vec![make_target("svc-a"), make_target("svc-b")])
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    {
        let map = statuses.lock().unwrap();
        assert_eq!(map.len(), 2);
        for target in map.values() {
            assert_eq!(target.tasks.len(), 3);
            // Only the first subtask of each target may have started; nothing
            // is terminal and every later subtask still waits.
            for (idx, status) in target.tasks.values().enumerate() {
                assert!(!status.is_terminal());
                if idx > 0 {
                    assert_eq!(status.state, TaskState::Waiting);
                }
            }
        }
    }

    handle.abort();
}

#[tokio::test]
async fn subtasks_run_sequentially_within_a_target() {
    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter.clone(), 4);

    let subtasks = (0..3)
        .map(|idx| {
            LintTask::new(format!("step-{idx}"), format!("Step {idx}"), move || {
                async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok(TaskResult::passed("ok"))
                }
            })
        })
        .collect();
    let task = UnifiedTask::new("svc", TargetKind::Backend, subtasks);

    assert!(executor.execute(vec![task]).await);

    // started/completed pairs must be strictly interleaved in declaration
    // order: B never starts before A completes.
    let events = reporter.task_events_for("svc");
    let expected: Vec<(String, bool)> = (0..3)
        .flat_map(|idx| {
            vec![
                (format!("step-{idx}"), true),
                (format!("step-{idx}"), false),
            ]
        })
        .collect();
    assert_eq!(events, expected);
}

#[tokio::test]
async fn concurrency_never_exceeds_the_configured_bound() {
    const MAX_CONCURRENCY: usize = 2;
    const TARGETS: usize = 6;

    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let tasks: Vec<UnifiedTask> = (0..TARGETS)
        .map(|idx| {
            let active = active.clone();
            let peak = peak.clone();
            let subtask = LintTask::new("probe", "Probe", move || {
                let active = active.clone();
                let peak = peak.clone();
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(30)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(TaskResult::passed("ok"))
                }
            });
            UnifiedTask::new(format!("svc-{idx}"), TargetKind::Backend, vec![subtask])
        })
        .collect();

    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter, MAX_CONCURRENCY);

    assert!(executor.execute(tasks).await);
    assert!(peak.load(Ordering::SeqCst) <= MAX_CONCURRENCY);
    assert_eq!(active.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn aggregate_boolean_reflects_any_failure() {
    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter, 4);
    let tasks = vec![
        target_with_outcomes("svc-a", &[true, true]),
        target_with_outcomes("svc-b", &[true, false]),
    ];
    assert!(!executor.execute(tasks).await);

    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter, 4);
    let tasks = vec![
        target_with_outcomes("svc-a", &[true, true]),
        target_with_outcomes("svc-b", &[true, true]),
    ];
    assert!(executor.execute(tasks).await);
}

#[tokio::test]
async fn erroring_command_is_contained_as_failed_status() {
    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter, 4);
    let statuses = executor.statuses();

    let boom = LintTask::new("boom", "Boom", || async {
        anyhow::bail!("boom")
    });
    let after = LintTask::new("after", "After", || async {
        Ok(TaskResult::passed("still ran"))
    });
    let task = UnifiedTask::new("svc", TargetKind::Backend, vec![boom, after]);

    // execute resolves normally; the error is recorded, not propagated.
    assert!(!executor.execute(vec![task]).await);

    let map = statuses.lock().unwrap();
    let target = map.get("svc").expect("target present");
    let failed = target.tasks.get("boom").expect("status present");
    assert_eq!(failed.state, TaskState::Failed);
    assert_eq!(
        failed.result.as_ref().and_then(|r| r.error.as_deref()),
        Some("boom")
    );

    // No fail-fast: the sibling after the error still ran to completion.
    assert!(target.tasks.get("after").expect("status present").is_passed());
}

#[tokio::test]
async fn end_to_end_three_targets_with_one_failure() {
    let reporter = Arc::new(RecordingReporter::default());
    let executor = executor_with(reporter.clone(), 4);
    let statuses = executor.statuses();

    let tasks = vec![
        target_with_outcomes("svc-1", &[true, true]),
        target_with_outcomes("svc-2", &[false, true]),
        target_with_outcomes("svc-3", &[true, true]),
    ];

    assert!(!executor.execute(tasks).await);
    assert_eq!(reporter.completions.load(Ordering::SeqCst), 1);
    assert_eq!(*reporter.final_target_count.lock().unwrap(), Some(3));

    let map = statuses.lock().unwrap();
    assert!(!map.get("svc-1").unwrap().is_failed());
    assert!(map.get("svc-2").unwrap().is_failed());
    assert!(!map.get("svc-3").unwrap().is_failed());
    // The failure did not stop svc-2's second subtask.
    assert!(map.get("svc-2").unwrap().tasks.get("check-1").unwrap().is_passed());
}
