use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::runner::CommandRunner;

const UNKNOWN: &str = "Unknown";
const PERMISSION_DENIED: &str = "Permission denied";

/// Working directory of a process, or the reason it could not be resolved.
///
/// Serializes as a plain string: the path, "Unknown" or "Permission denied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingDirectory {
    Path(String),
    /// lsof ran but reported no cwd entry
    Unknown,
    /// lsof could not run or failed for this pid
    PermissionDenied,
}

impl WorkingDirectory {
    /// The resolved path, or `None` for either sentinel
    pub fn path(&self) -> Option<&str> {
        match self {
            WorkingDirectory::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkingDirectory::Path(p) => p,
            WorkingDirectory::Unknown => UNKNOWN,
            WorkingDirectory::PermissionDenied => PERMISSION_DENIED,
        }
    }

    /// Inverse of `as_str`, used for directories handed back by the presentation layer
    pub fn from_display(s: &str) -> Self {
        match s {
            UNKNOWN | "" => WorkingDirectory::Unknown,
            PERMISSION_DENIED => WorkingDirectory::PermissionDenied,
            path => WorkingDirectory::Path(path.to_string()),
        }
    }
}

impl fmt::Display for WorkingDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkingDirectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkingDirectory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(WorkingDirectory::from_display(&s))
    }
}

/// Resolve the working directory of `pid` from its open file descriptors.
/// Never fails: one unreadable process must not abort the listing.
pub async fn resolve_working_directory<R: CommandRunner + ?Sized>(
    runner: &R,
    pid: u32,
) -> WorkingDirectory {
    let pid_arg = pid.to_string();
    let output = match runner.run("lsof", &["-p", &pid_arg]).await {
        Ok(o) => o,
        Err(e) => {
            debug!("lsof unavailable for pid={}: {}", pid, e);
            return WorkingDirectory::PermissionDenied;
        }
    };

    // lsof exits 1 on partial failures but may still have printed the cwd row
    if let Some(path) = parse_lsof_cwd(&output.stdout) {
        trace!("pid={} cwd={}", pid, path);
        return WorkingDirectory::Path(path);
    }

    if output.success {
        debug!("lsof reported no cwd for pid={}", pid);
        WorkingDirectory::Unknown
    } else {
        debug!(
            "lsof failed for pid={} (code {:?}): {}",
            pid,
            output.code,
            output.stderr.trim()
        );
        WorkingDirectory::PermissionDenied
    }
}

/// Find the row whose FD column is `cwd` and return its last field (NAME).
pub fn parse_lsof_cwd(output: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.split_whitespace().nth(3) == Some("cwd"))
        .or_else(|| output.lines().find(|line| line.contains("cwd")))
        .and_then(|line| line.split_whitespace().last())
        .map(str::to_string)
}
