pub mod git;
pub mod mcp;
pub mod model;
pub mod parser;
pub mod status;

pub use git::{
    inspect_git, parse_ahead_behind, parse_branch_header, parse_github_remote, BranchHeader,
    GitInfo,
};
pub use mcp::{mcp_config_candidates, parse_mcp_config, read_mcp_tools, McpTool};
pub use model::{ActivityState, ModelInfo, SessionStats};
pub use parser::{
    convert_path_to_dir_name, convert_path_to_sanitized_dir_name, find_latest_session_file,
    inspect_model, model_alias, parse_session_log,
};
pub use status::{classify_activity, is_headless, is_no_terminal, NO_TERMINAL};
