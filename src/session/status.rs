use super::model::ActivityState;

/// ps prints these for a process without a controlling terminal ("??" on macOS, "?" on Linux)
pub const NO_TERMINAL: [&str; 2] = ["??", "?"];

/// CPU above this means the process is doing real work
const WORKING_CPU_THRESHOLD: f32 = 1.0;
/// CPU above this (but not above the working threshold) means it is thinking
const THINKING_CPU_THRESHOLD: f32 = 0.1;

/// Classify activity from raw ps state flags and CPU usage.
///
/// Rules are checked in order and the first match wins:
/// - running (R) or uninterruptible sleep (D) -> Working, whatever the CPU
/// - cpu > 1.0 -> Working
/// - cpu > 0.1 -> Thinking
/// - interactive sleep in the foreground group (S+) -> Waiting
/// - otherwise Idle
pub fn classify_activity(state: &str, cpu_percent: f32) -> ActivityState {
    if state.contains('R') || state.contains('D') {
        ActivityState::Working
    } else if cpu_percent > WORKING_CPU_THRESHOLD {
        ActivityState::Working
    } else if cpu_percent > THINKING_CPU_THRESHOLD {
        ActivityState::Thinking
    } else if state.contains("S+") {
        ActivityState::Waiting
    } else {
        ActivityState::Idle
    }
}

/// True when the tty is "no terminal" or any headless flag appears in the args
pub fn is_headless(tty: &str, args: &str, headless_flags: &[String]) -> bool {
    is_no_terminal(tty) || headless_flags.iter().any(|flag| args.contains(flag.as_str()))
}

pub fn is_no_terminal(tty: &str) -> bool {
    NO_TERMINAL.contains(&tty)
}
