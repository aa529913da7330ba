pub mod cwd;
pub mod lister;
pub mod memory;

pub use cwd::{parse_lsof_cwd, resolve_working_directory, WorkingDirectory};
pub use lister::{
    is_standalone_invocation, list_processes, matches_target_text, parse_process_table,
    parse_ps_line, parse_start_time, ProcessRecord, PS_COLUMNS, UNKNOWN_FIELD,
};
pub use memory::{memory_info, MemoryInfo};
