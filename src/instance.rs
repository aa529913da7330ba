//! Joins the process snapshot with working directory, git, session and
//! activity data into the instance list handed to the presentation layer.

use futures::future::join_all;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::error::Result;
use crate::process::{
    list_processes, memory_info, resolve_working_directory, MemoryInfo, ProcessRecord,
    WorkingDirectory,
};
use crate::runner::{CommandRunner, SystemRunner};
use crate::session::{
    classify_activity, inspect_git, inspect_model, is_headless, mcp_config_candidates,
    read_mcp_tools, ActivityState, GitInfo, McpTool, ModelInfo,
};

/// A running target process with everything derived about it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(flatten)]
    pub process: ProcessRecord,
    pub working_directory: WorkingDirectory,
    pub is_headless: bool,
    pub activity_state: ActivityState,
    pub activity_indicator: String,
    pub git_info: GitInfo,
    pub model_info: ModelInfo,
}

/// Extra information fetched on demand for a single instance
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDetails {
    pub mcp_tools: Vec<McpTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_info: Option<MemoryInfo>,
}

/// Entry point for the exposed operations. Generic over the runner so tests
/// can script `ps`/`lsof`/`git` output.
pub struct Monitor<R = SystemRunner> {
    runner: R,
    config: MonitorConfig,
}

impl Monitor<SystemRunner> {
    pub fn new(config: MonitorConfig) -> Self {
        Monitor::with_runner(SystemRunner, config)
    }
}

impl<R: CommandRunner> Monitor<R> {
    pub fn with_runner(runner: R, config: MonitorConfig) -> Self {
        Monitor { runner, config }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Snapshot all target processes and enrich each one concurrently.
    ///
    /// Fails only if the process table itself cannot be read. Enrichment
    /// failures degrade the affected instance and never drop it.
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        let records = list_processes(&self.runner, &self.config).await?;

        let instances = join_all(records.into_iter().map(|record| self.enrich(record))).await;

        info!("Listed {} instances", instances.len());
        Ok(instances)
    }

    /// Resolve cwd, then run git and session inspection side by side.
    async fn enrich(&self, record: ProcessRecord) -> Instance {
        let activity_state = classify_activity(&record.state, record.cpu_percent);
        let is_headless = is_headless(&record.tty, &record.args, &self.config.headless_flags);

        let working_directory = resolve_working_directory(&self.runner, record.pid).await;

        let (git_info, model_info) = tokio::join!(
            inspect_git(&self.runner, &working_directory),
            inspect_model(&self.config.projects_dir, &working_directory)
        );

        debug!(
            "Instance pid={}: cwd={}, activity={:?}, headless={}, git={}, model={:?}",
            record.pid,
            working_directory,
            activity_state,
            is_headless,
            git_info.has_git,
            model_info.model
        );

        Instance {
            process: record,
            working_directory,
            is_headless,
            activity_state,
            activity_indicator: activity_state.indicator().to_string(),
            git_info,
            model_info,
        }
    }

    /// MCP tools configured for the instance's directory plus its memory usage
    pub async fn instance_details(
        &self,
        pid: u32,
        working_directory: &WorkingDirectory,
    ) -> InstanceDetails {
        let candidates = mcp_config_candidates(working_directory, &self.config.mcp_config_paths);
        let mcp_tools = read_mcp_tools(&candidates).await;

        InstanceDetails {
            mcp_tools,
            memory_info: memory_info(pid),
        }
    }
}
