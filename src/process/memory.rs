use log::trace;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Resident and virtual memory of a process, in bytes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    pub rss: u64,
    pub vsz: u64,
}

/// Read memory usage for a single pid. `None` if the process is gone.
pub fn memory_info(pid: u32) -> Option<MemoryInfo> {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();

    // Only refresh the one process we were asked about
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        ProcessRefreshKind::new().with_memory(),
    );

    let process = system.process(pid)?;
    let info = MemoryInfo {
        rss: process.memory(),
        vsz: process.virtual_memory(),
    };
    trace!("pid={} rss={} vsz={}", pid.as_u32(), info.rss, info.vsz);
    Some(info)
}
