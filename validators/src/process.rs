use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

/// Captured output of an external check command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Error payload on failure: stdout first (linters print findings
    /// there), then stderr, then a generic message.
    pub fn error_payload(&self) -> String {
        if !self.stdout.trim().is_empty() {
            self.stdout.clone()
        } else if !self.stderr.trim().is_empty() {
            self.stderr.clone()
        } else {
            "command failed".to_string()
        }
    }
}

/// Runs an external command, capturing stdout and stderr. Timeouts are a
/// property of individual leaf commands, never of the executor; on timeout
/// the child is killed and an error is returned.
pub async fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Option<Duration>,
) -> anyhow::Result<CommandOutput> {
    tracing::debug!(program, ?args, cwd = %cwd.display(), "running command");

    let mut command = tokio::process::Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, command.output())
            .await
            .map_err(|_| {
                anyhow::anyhow!("{program} timed out after {}s", limit.as_secs())
            })??,
        None => command.output().await?,
    };

    Ok(CommandOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
