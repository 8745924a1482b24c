//! Running build tools to list dependencies.
//!
//! The invoker runs a tool's dependency-tree command (`lein deps :tree`,
//! `boot show --deps`) in the manifest's directory and keeps only the stdout
//! lines that look like coordinate vectors. Tree-drawing prefixes are replaced
//! by spaces so the depth stays visible while the line itself starts at `[`:
//!
//! ```text
//! │   └── [ring/ring-codec "1.1.1"]   ->         [ring/ring-codec "1.1.1"]
//! ```
//!
//! Launch failures, non-zero exits and empty output are logged and produce an
//! empty or partial list; the invoker never returns an error.

use crate::core::CljdepsError;
use crate::tool::Tool;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

/// Runs dependency-listing commands for each [`Tool`].
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    overrides: HashMap<Tool, String>,
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the command used for `tool`.
    ///
    /// The command is split on whitespace; the first word is the program.
    #[must_use]
    pub fn with_command(mut self, tool: Tool, command: impl Into<String>) -> Self {
        self.overrides.insert(tool, command.into());
        self
    }

    /// The command line that will be run for `tool`.
    #[must_use]
    pub fn command_for(&self, tool: Tool) -> &str {
        match self.overrides.get(&tool) {
            Some(command) => command,
            None => tool.default_command(),
        }
    }

    /// Runs `tool` in `work_dir` and returns its coordinate lines in output order.
    ///
    /// Waits for the process to exit; there is no timeout.
    pub async fn list_dependencies(&self, tool: Tool, work_dir: &Path) -> Vec<String> {
        let command = self.command_for(tool).to_string();
        match run_and_collect(&command, work_dir).await {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(target: "invoker", "{:#}", e);
                Vec::new()
            }
        }
    }
}

async fn run_and_collect(command: &str, work_dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut words = command.split_whitespace();
    let Some(program) = words.next() else {
        return Err(CljdepsError::ConfigError {
            message: "empty dependency command".to_string(),
        }
        .into());
    };
    let args: Vec<&str> = words.collect();

    let launch_error = |reason: String| CljdepsError::ToolLaunchFailed {
        command: command.to_string(),
        work_dir: work_dir.display().to_string(),
        reason,
    };

    // Resolve through PATH (and PATHEXT on Windows, so lein.bat is found)
    let program_path: PathBuf = which::which(program).map_err(|e| launch_error(e.to_string()))?;

    tracing::debug!(
        target: "invoker",
        "Executing command: {} {} (in {})",
        program_path.display(),
        args.join(" "),
        work_dir.display()
    );
    let start = std::time::Instant::now();

    let mut child = Command::new(&program_path)
        .args(&args)
        .current_dir(work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| launch_error(e.to_string()))?;

    // Drain stderr concurrently so a chatty tool cannot block on a full pipe
    let stderr_task = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            String::from_utf8_lossy(&buf).into_owned()
        })
    });

    let mut lines = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    if let Some(coordinate) = extract_coordinate_line(&line) {
                        lines.push(coordinate);
                    }
                }
                Err(e) => {
                    tracing::debug!(target: "invoker", "Stopped reading stdout: {}", e);
                    break;
                }
            }
        }
    }

    let status = child.wait().await;
    if let Some(task) = stderr_task
        && let Ok(stderr) = task.await
        && !stderr.trim().is_empty()
    {
        tracing::debug!(target: "invoker", "{}", stderr.trim());
    }

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::info!(
            target: "invoker",
            "'{}' in {} exited with {:?}; keeping {} lines",
            command,
            work_dir.display(),
            status.code(),
            lines.len()
        ),
        Err(e) => tracing::info!(target: "invoker", "Failed waiting for '{}': {}", command, e),
    }

    if lines.is_empty() {
        tracing::info!(target: "invoker", "'{}' reported no dependencies in {}", command, work_dir.display());
    }

    tracing::debug!(
        target: "invoker::perf",
        "'{}' took {:.2}s",
        command,
        start.elapsed().as_secs_f64()
    );

    Ok(lines)
}

/// Extracts a coordinate from one line of tool output.
///
/// The line qualifies when, after trimming trailing whitespace, it contains a
/// `[` and ends with `]`. The result starts at the first `[`, indented with one
/// space per character that preceded it.
#[must_use]
pub fn extract_coordinate_line(line: &str) -> Option<String> {
    let trimmed = line.trim_end();
    if !trimmed.ends_with(']') {
        return None;
    }
    let bracket = trimmed.find('[')?;
    let column = trimmed[..bracket].chars().count();
    Some(format!("{}{}", " ".repeat(column), &trimmed[bracket..]))
}

/// Applies [`extract_coordinate_line`] to every line of `output`.
#[must_use]
pub fn extract_coordinate_lines(output: &str) -> Vec<String> {
    output.lines().filter_map(extract_coordinate_line).collect()
}
