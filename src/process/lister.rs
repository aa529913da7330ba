use chrono::{Local, NaiveDateTime, TimeZone};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, Result};
use crate::runner::CommandRunner;

/// Columns requested from `ps`, in the order `parse_ps_line` expects them
pub const PS_COLUMNS: &str = "pid,ppid,tty,state,pcpu,args,etime,lstart";

/// Placeholder for elapsed/start time when the line is too short to carry them
pub const UNKNOWN_FIELD: &str = "Unknown";

/// pid, ppid, tty, state, %cpu
const LEADING_FIELDS: usize = 5;
/// etime plus the five tokens of lstart ("Tue Jul 22 23:57:48 2025")
const TRAILING_FIELDS: usize = 6;
const START_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// One row of the process table that looked like a target process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub pid: u32,
    pub ppid: u32,
    /// Controlling terminal as printed by ps ("ttys001", or "??" when there is none)
    pub tty: String,
    /// Raw state flags ("S+", "R", "Ss", ...)
    pub state: String,
    pub cpu_percent: f32,
    pub args: String,
    pub elapsed_time: String,
    pub start_time: String,
    /// Start time in epoch milliseconds, when `start_time` parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
}

/// Snapshot the process table and return every target process in source order.
/// This is the only step whose failure is reported to the caller.
pub async fn list_processes<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &MonitorConfig,
) -> Result<Vec<ProcessRecord>> {
    debug!("=== Starting process discovery ===");

    let output = runner
        .run("ps", &["-eo", PS_COLUMNS])
        .await
        .and_then(|o| o.check("ps"))
        .map_err(|e| MonitorError::ProcessQueryFailed {
            source: Box::new(e),
        })?;

    let records = parse_process_table(&output.stdout, config);
    debug!(
        "Process discovery complete: found {} {} processes",
        records.len(),
        config.target_command
    );
    Ok(records)
}

/// Filter and parse raw `ps` output.
pub fn parse_process_table(output: &str, config: &MonitorConfig) -> Vec<ProcessRecord> {
    output
        .lines()
        .filter(|line| matches_target_text(line, config))
        .filter_map(|line| {
            let record = parse_ps_line(line);
            if record.is_none() {
                trace!("Skipping unparseable ps line: {}", line);
            }
            record
        })
        .filter(|record| {
            let standalone = is_standalone_invocation(&record.args, &config.target_command);
            if !standalone {
                trace!("Skipping pid={}: target only appears inside another word", record.pid);
            }
            standalone
        })
        .collect()
}

/// Cheap text-level check: the line mentions the target and none of the exclusions.
pub fn matches_target_text(line: &str, config: &MonitorConfig) -> bool {
    line.contains(config.target_command.as_str())
        && !config
            .exclude_patterns
            .iter()
            .any(|pattern| line.contains(pattern.as_str()))
}

/// True if some argument is the target itself, or a path ending in it.
pub fn is_standalone_invocation(args: &str, target: &str) -> bool {
    args.split_whitespace()
        .any(|token| token.rsplit('/').next() == Some(target))
}

/// Parse one `ps -eo pid,ppid,tty,state,pcpu,args,etime,lstart` line.
///
/// The args column is free text, so it is taken as the slice of the original
/// line between the fifth field and the sixth-from-last token. Internal
/// whitespace in the command line survives. Lines too short to carry the time
/// columns keep everything after the fifth field as args and mark the times
/// as unknown. Returns `None` for the header or a non-numeric pid/ppid.
pub fn parse_ps_line(line: &str) -> Option<ProcessRecord> {
    let spans = token_spans(line);
    if spans.len() <= LEADING_FIELDS {
        return None;
    }
    let field = |i: usize| &line[spans[i].0..spans[i].1];

    let pid = field(0).parse::<u32>().ok()?;
    let ppid = field(1).parse::<u32>().ok()?;
    let cpu_percent = field(4)
        .parse::<f32>()
        .ok()
        .filter(|c| c.is_finite() && *c >= 0.0)
        .unwrap_or(0.0);

    let (args_end, elapsed_time, start_time) = if spans.len() > LEADING_FIELDS + TRAILING_FIELDS {
        let first_trailing = spans.len() - TRAILING_FIELDS;
        let start_time = spans[first_trailing + 1..]
            .iter()
            .map(|&(s, e)| &line[s..e])
            .collect::<Vec<_>>()
            .join(" ");
        (
            spans[first_trailing - 1].1,
            field(first_trailing).to_string(),
            start_time,
        )
    } else {
        (
            spans[spans.len() - 1].1,
            UNKNOWN_FIELD.to_string(),
            UNKNOWN_FIELD.to_string(),
        )
    };

    let start_timestamp = parse_start_time(&start_time);

    Some(ProcessRecord {
        pid,
        ppid,
        tty: field(2).to_string(),
        state: field(3).to_string(),
        cpu_percent,
        args: line[spans[LEADING_FIELDS].0..args_end].to_string(),
        elapsed_time,
        start_time,
        start_timestamp,
    })
}

/// Parse an `lstart` string as local time into epoch milliseconds.
/// Anything that doesn't match (other locales, "Unknown") yields `None`.
pub fn parse_start_time(start_time: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(start_time, START_TIME_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// Byte ranges of the whitespace-separated tokens of `line`
fn token_spans(line: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, line.len()));
    }

    spans
}
