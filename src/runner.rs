//! Seam between the monitor and the external tools it shells out to
//! (`ps`, `lsof`, `git`, `pgrep`, `osascript`, `tmux`).

use async_trait::async_trait;
use log::trace;
use tokio::process::Command;

use crate::error::{MonitorError, Result};

/// Captured result of a tool that was successfully spawned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Convert a non-zero exit into `ToolFailed`.
    pub fn check(self, tool: &str) -> Result<ToolOutput> {
        if self.success {
            Ok(self)
        } else {
            Err(MonitorError::ToolFailed {
                tool: tool.to_string(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs an external program to completion.
///
/// Implementations return `ToolUnavailable` only when the program could not be
/// spawned at all. A program that ran and exited non-zero is still `Ok`, so
/// callers can tell "ran but found nothing" apart from "could not run".
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput>;
}

/// Spawns real processes through tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput> {
        trace!("Running {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|source| MonitorError::ToolUnavailable {
                tool: program.to_string(),
                source,
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
