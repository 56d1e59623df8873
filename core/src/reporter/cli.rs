use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::task::{ProgressEvent, StatusMap, TaskStatus};

use super::colors::{BLUE, CYAN, GREEN, NC, RED};
use super::{calculate_stats, status_icon, Reporter};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const BOX_WIDTH: usize = 59;
const BAR_WIDTH: usize = 40;

/// Full-redraw reporter for interactive terminals. Every progress callback
/// clears the screen and re-renders the entire status map; there is no timer,
/// the executor's event emission drives the render loop. After `on_complete`
/// the final frame stays in place and further events are ignored.
pub struct CliReporter {
    title: String,
    task_names: HashMap<String, String>,
    completed: AtomicBool,
}

impl CliReporter {
    pub fn new(title: impl Into<String>, task_names: HashMap<String, String>) -> Self {
        Self {
            title: title.into(),
            task_names,
            completed: AtomicBool::new(false),
        }
    }

    fn display_name(&self, task_id: &str) -> String {
        self.task_names
            .get(task_id)
            .cloned()
            .unwrap_or_else(|| task_id.to_string())
    }

    /// Builds one live frame. Pure string assembly so rendering is testable
    /// without capturing stdout.
    fn render_frame(&self, statuses: &StatusMap) -> String {
        let stats = calculate_stats(statuses);
        let completed_tasks = stats.passed_tasks + stats.failed_tasks;
        let percent = if stats.total_tasks > 0 {
            completed_tasks * 100 / stats.total_tasks
        } else {
            0
        };

        let mut frame = String::new();
        frame.push_str(CLEAR_SCREEN);
        render_box_header(
            &mut frame,
            &format!("{} ({} targets)", self.title, statuses.len()),
        );
        frame.push('\n');

        for (target_id, target) in statuses {
            let _ = writeln!(frame, "{CYAN}{target_id}{NC}");
            for (task_id, status) in &target.tasks {
                let _ = writeln!(frame, "  {}", self.format_task(task_id, status));
            }
            frame.push('\n');
        }

        let filled = BAR_WIDTH * percent / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let _ = writeln!(
            frame,
            "Progress: [{bar}] {percent}% ({completed_tasks}/{} tasks)",
            stats.total_tasks
        );

        frame
    }

    /// Builds the final frame: complete banner, per-target verdict icons, and
    /// the pass/fail summary.
    fn render_final_frame(&self, statuses: &StatusMap) -> String {
        let stats = calculate_stats(statuses);

        let mut frame = String::new();
        frame.push_str(CLEAR_SCREEN);
        render_box_header(&mut frame, &format!("{} Complete", self.title));
        frame.push('\n');

        for (target_id, target) in statuses {
            let prefix = if target.is_failed() {
                format!("{RED}✖{NC}")
            } else {
                format!("{GREEN}✔{NC}")
            };
            let _ = writeln!(frame, "{prefix} {CYAN}{target_id}{NC}");
            for (task_id, status) in &target.tasks {
                let _ = writeln!(frame, "  {}", self.format_task(task_id, status));
            }
            frame.push('\n');
        }

        let all_passed = stats.failed_targets == 0;
        let (color, verdict) = if all_passed {
            (GREEN, "✔ All checks passed!")
        } else {
            (RED, "✖ Some checks failed")
        };

        let _ = writeln!(frame, "{BLUE}{}{NC}", "═".repeat(BOX_WIDTH));
        let _ = writeln!(frame, "{color}{verdict}{NC}");
        let _ = writeln!(
            frame,
            "Targets: {}/{} passed",
            stats.passed_targets, stats.total_targets
        );
        let _ = writeln!(
            frame,
            "Tasks: {}/{} passed",
            stats.passed_tasks, stats.total_tasks
        );

        frame
    }

    fn format_task(&self, task_id: &str, status: &TaskStatus) -> String {
        let name = self.display_name(task_id);
        let (icon, color) = status_icon(status);
        let duration = match status.duration_ms() {
            Some(ms) if status.is_terminal() => format!(" ({:.1}s)", ms as f64 / 1000.0),
            _ => String::new(),
        };
        format!("{color}{icon}{NC} {name}{duration}")
    }

    fn draw(&self, frame: &str) {
        print!("{frame}");
        let _ = std::io::stdout().flush();
    }
}

impl Reporter for CliReporter {
    fn on_progress(&self, _event: &ProgressEvent, statuses: &StatusMap) {
        if self.completed.load(Ordering::SeqCst) {
            return;
        }
        self.draw(&self.render_frame(statuses));
    }

    fn on_complete(&self, statuses: &StatusMap) {
        self.completed.store(true, Ordering::SeqCst);
        self.draw(&self.render_final_frame(statuses));
    }
}

fn render_box_header(frame: &mut String, text: &str) {
    let rule = "═".repeat(BOX_WIDTH);
    let _ = writeln!(frame, "{BLUE}╔{rule}╗{NC}");
    let _ = writeln!(
        frame,
        "{BLUE}║{:^width$}║{NC}",
        truncate(text, BOX_WIDTH),
        width = BOX_WIDTH
    );
    let _ = writeln!(frame, "{BLUE}╚{rule}╝{NC}");
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
