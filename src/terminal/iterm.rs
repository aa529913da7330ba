use super::applescript::{escape_applescript, shell_quote};

/// Raise the iTerm2 window whose session owns `/dev/<tty>`, or at least bring
/// iTerm2 forward if no session matches.
pub fn focus_by_tty_script(tty: &str) -> String {
    format!(
        r#"
        tell application "iTerm2"
            activate
            set foundSession to false
            set targetTTY to "/dev/{tty}"

            repeat with theWindow in windows
                repeat with theTab in tabs of theWindow
                    repeat with theSession in sessions of theTab
                        try
                            if tty of theSession is targetTTY then
                                set index of theWindow to 1
                                select theTab
                                set foundSession to true
                                exit repeat
                            end if
                        end try
                    end repeat
                    if foundSession then exit repeat
                end repeat
                if foundSession then exit repeat
            end repeat

            if not foundSession then
                tell application "System Events"
                    tell process "iTerm2"
                        set frontmost to true
                        if (count of windows) > 0 then
                            perform action "AXRaise" of first window
                        end if
                    end tell
                end tell
            end if
        end tell
    "#,
        tty = escape_applescript(tty)
    )
}

/// Open a new iTerm2 window in `working_directory` (home when unknown) for a
/// process that has no terminal
pub fn spawn_window_script(pid: u32, working_directory: Option<&str>) -> String {
    let target = working_directory
        .map(shell_quote)
        .unwrap_or_else(|| "~".to_string());
    let cd = escape_applescript(&format!("cd {}", target));
    format!(
        r#"
        tell application "iTerm2"
            activate
            create window with default profile
            tell current session of current window
                write text "{cd}"
                write text "echo 'Spawned iTerm2 window for headless Claude process (PID: {pid})'"
            end tell
        end tell
    "#,
        cd = cd,
        pid = pid
    )
}
