use log::{error, info};

use crate::instance::{Instance, InstanceDetails, Monitor};
use crate::layout::{self, Size, WindowGeometry, WindowMode};
use crate::process::WorkingDirectory;
use crate::runner::CommandRunner;
use crate::terminal::{self, ActivationResult};

/// Get all running Claude Code instances
pub async fn list_instances<R: CommandRunner>(
    monitor: &Monitor<R>,
) -> Result<Vec<Instance>, String> {
    monitor.list_instances().await.map_err(|e| {
        error!("Instance listing failed: {:?}", e);
        String::from(e)
    })
}

/// MCP tools and memory usage for one instance.
/// `working_directory` is the string the listing reported, sentinels included.
pub async fn get_instance_details<R: CommandRunner>(
    monitor: &Monitor<R>,
    pid: u32,
    working_directory: &str,
) -> InstanceDetails {
    let working_directory = WorkingDirectory::from_display(working_directory);
    monitor.instance_details(pid, &working_directory).await
}

/// Focus the terminal window of an instance, or open one for a headless instance
pub async fn activate_window<R: CommandRunner>(
    monitor: &Monitor<R>,
    pid: u32,
    tty: Option<&str>,
    working_directory: Option<&str>,
) -> Result<ActivationResult, String> {
    let result = terminal::activate_window(monitor.runner(), pid, tty, working_directory)
        .await
        .map_err(String::from)?;
    info!(
        "activate_window: pid={}, terminal={}, success={}, fallback={}",
        pid, result.terminal, result.success, result.fallback
    );
    Ok(result)
}

/// Switch between the compact tile view and the full window
pub fn toggle_window_size(minimize: bool) -> WindowGeometry {
    let mode = if minimize {
        WindowMode::Minimized
    } else {
        WindowMode::Expanded
    };
    layout::toggle_window_size(mode)
}

/// Fit a minimized window to the number of tiles it shows
pub fn update_window_height(mode: WindowMode, instance_count: usize) -> Option<Size> {
    layout::update_window_height(mode, instance_count)
}
