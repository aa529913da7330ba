use super::applescript::escape_applescript;

/// Bring the Terminal.app window whose title mentions `tty` to the front
pub fn focus_by_tty_script(tty: &str) -> String {
    format!(
        r#"
        tell application "Terminal"
            activate
            repeat with theWindow in windows
                try
                    if name of theWindow contains "{tty}" then
                        set index of theWindow to 1
                        exit repeat
                    end if
                end try
            end repeat
        end tell
    "#,
        tty = escape_applescript(tty)
    )
}

/// Plain activation used when the tty-matching script fails
pub fn activate_app_script(app_name: &str) -> String {
    format!(
        r#"
        tell application "{app}"
            activate
            if (count of windows) > 0 then
                set index of first window to 1
            end if
        end tell
    "#,
        app = escape_applescript(app_name)
    )
}
