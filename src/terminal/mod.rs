mod applescript;
mod iterm;
mod terminal_app;
mod tmux;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};
use crate::process::WorkingDirectory;
use crate::runner::CommandRunner;
use crate::session::is_no_terminal;

pub use applescript::{escape_applescript, shell_quote};
pub use tmux::find_pane_for_tty;

/// Terminal application that can host a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TerminalApp {
    #[serde(rename = "iTerm2")]
    Iterm2,
    Terminal,
}

impl TerminalApp {
    pub fn name(self) -> &'static str {
        match self {
            TerminalApp::Iterm2 => "iTerm2",
            TerminalApp::Terminal => "Terminal",
        }
    }
}

/// Outcome of an activation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivationResult {
    pub success: bool,
    pub terminal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub spawned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_tty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmux_pane: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bring the terminal hosting `pid` to the front.
///
/// Processes without a controlling terminal get a fresh iTerm2 window opened
/// in their working directory instead.
pub async fn activate_window<R: CommandRunner + ?Sized>(
    runner: &R,
    pid: u32,
    tty: Option<&str>,
    working_directory: Option<&str>,
) -> Result<ActivationResult> {
    let tty = tty
        .map(|t| t.trim().trim_start_matches("/dev/"))
        .filter(|t| !t.is_empty() && !is_no_terminal(t));

    let Some(tty) = tty else {
        let dir = working_directory
            .map(WorkingDirectory::from_display)
            .and_then(|wd| wd.path().map(str::to_string));
        return spawn_headless_window(runner, pid, dir.as_deref()).await;
    };

    let tmux_pane = tmux::focus_pane_by_tty(runner, tty).await;
    let terminal = detect_terminal_app(runner).await?;
    debug!("Activating {} for pid={} tty={}", terminal.name(), pid, tty);

    let script = match terminal {
        TerminalApp::Iterm2 => iterm::focus_by_tty_script(tty),
        TerminalApp::Terminal => terminal_app::focus_by_tty_script(tty),
    };

    let output = applescript::execute_applescript(runner, &script).await?;
    if output.success {
        info!("Activated {} window for tty {}", terminal.name(), tty);
        return Ok(ActivationResult {
            success: true,
            terminal: terminal.name().to_string(),
            tty: Some(tty.to_string()),
            target_tty: Some(format!("/dev/{}", tty)),
            tmux_pane,
            output: Some(output.stdout.trim().to_string()),
            ..Default::default()
        });
    }

    // Couldn't match the tty; at least bring the app forward
    let error = output.stderr.trim().to_string();
    warn!(
        "AppleScript failed for {} (code {:?}): {}",
        terminal.name(),
        output.code,
        error
    );
    let fallback_script = terminal_app::activate_app_script(terminal.name());
    let fallback = applescript::execute_applescript(runner, &fallback_script).await?;

    Ok(ActivationResult {
        success: fallback.success,
        terminal: terminal.name().to_string(),
        tty: Some(tty.to_string()),
        tmux_pane,
        fallback: true,
        error: Some(error),
        ..Default::default()
    })
}

/// Prefer iTerm2 when it's running, then Terminal, and default to iTerm2.
pub async fn detect_terminal_app<R: CommandRunner + ?Sized>(runner: &R) -> Result<TerminalApp> {
    for (pattern, app) in [("iTerm", TerminalApp::Iterm2), ("Terminal", TerminalApp::Terminal)] {
        if runner.run("pgrep", &["-f", pattern]).await?.success {
            return Ok(app);
        }
    }
    Ok(TerminalApp::Iterm2)
}

async fn spawn_headless_window<R: CommandRunner + ?Sized>(
    runner: &R,
    pid: u32,
    working_directory: Option<&str>,
) -> Result<ActivationResult> {
    let script = iterm::spawn_window_script(pid, working_directory);
    let output = applescript::execute_applescript(runner, &script).await?;

    if !output.success {
        return Err(MonitorError::ToolFailed {
            tool: "osascript".to_string(),
            code: output.code,
            stderr: format!("Failed to spawn new iTerm2 window: {}", output.stderr.trim()),
        });
    }

    info!(
        "Spawned iTerm2 window for headless pid={} in {}",
        pid,
        working_directory.unwrap_or("~")
    );
    Ok(ActivationResult {
        success: true,
        terminal: TerminalApp::Iterm2.name().to_string(),
        pid: Some(pid),
        spawned: true,
        ..Default::default()
    })
}
