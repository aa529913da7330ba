use log::debug;

use crate::runner::CommandRunner;

/// Select the tmux pane attached to `tty`. Returns the `session:window.pane`
/// target that was selected, or `None` if tmux isn't running or no pane matches.
pub async fn focus_pane_by_tty<R: CommandRunner + ?Sized>(runner: &R, tty: &str) -> Option<String> {
    let output = runner
        .run(
            "tmux",
            &[
                "list-panes",
                "-a",
                "-F",
                "#{pane_tty} #{session_name}:#{window_index}.#{pane_index}",
            ],
        )
        .await
        .ok()
        .filter(|o| o.success)?;

    let target = find_pane_for_tty(&output.stdout, tty)?;
    debug!("tty {} belongs to tmux pane {}", tty, target);

    for command in ["select-window", "select-pane"] {
        match runner.run("tmux", &[command, "-t", &target]).await {
            Ok(o) if o.success => {}
            Ok(o) => debug!("tmux {} {} failed: {}", command, target, o.stderr.trim()),
            Err(e) => debug!("tmux {} {} failed: {}", command, target, e),
        }
    }

    Some(target)
}

/// Match a ps tty ("ttys003") against `list-panes` rows ("/dev/ttys003 main:1.0")
pub fn find_pane_for_tty(list_panes: &str, tty: &str) -> Option<String> {
    list_panes.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        let pane_tty = parts.next()?;
        let target = parts.next()?;
        let pane_name = pane_tty.strip_prefix("/dev/").unwrap_or(pane_tty);
        (pane_name == tty).then(|| target.to_string())
    })
}
