use log::debug;

use crate::error::Result;
use crate::runner::{CommandRunner, ToolOutput};

/// Run an AppleScript through `osascript`. Only a failure to spawn is an
/// error; a script error comes back as an unsuccessful `ToolOutput`.
pub async fn execute_applescript<R: CommandRunner + ?Sized>(
    runner: &R,
    script: &str,
) -> Result<ToolOutput> {
    let output = runner.run("osascript", &["-e", script]).await?;
    if !output.success {
        debug!("AppleScript error: {}", output.stderr.trim());
    }
    Ok(output)
}

/// Escape a value for use inside an AppleScript string literal
pub fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a value for a POSIX shell command line
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
