mod git_tests;

use crate::error::{MonitorError, Result};
use crate::runner::{CommandRunner, ToolOutput};
use async_trait::async_trait;
use std::sync::Mutex;

/// Canned reply for a scripted command
#[derive(Clone)]
enum Reply {
    Output(ToolOutput),
    Unavailable,
}

struct Rule {
    prefix: String,
    reply: Reply,
    once: bool,
}

/// A `CommandRunner` that answers from a script instead of spawning processes.
///
/// Commands are matched by prefix against "program arg1 arg2 ...", first rule
/// wins. Anything unscripted behaves like a missing binary.
pub(crate) struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        ScriptedRunner {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn push(self, prefix: &str, reply: Reply, once: bool) -> Self {
        self.rules.lock().unwrap().push(Rule {
            prefix: prefix.to_string(),
            reply,
            once,
        });
        self
    }

    /// Exit 0 with `stdout`
    pub fn ok(self, prefix: &str, stdout: &str) -> Self {
        self.push(prefix, Reply::Output(output(true, Some(0), stdout, "")), false)
    }

    /// Non-zero exit with `stdout` and `stderr`
    pub fn fail(self, prefix: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.push(prefix, Reply::Output(output(false, Some(code), stdout, stderr)), false)
    }

    pub fn fail_once(self, prefix: &str, code: i32, stderr: &str) -> Self {
        self.push(prefix, Reply::Output(output(false, Some(code), "", stderr)), true)
    }

    /// Spawn failure
    pub fn unavailable(self, prefix: &str) -> Self {
        self.push(prefix, Reply::Unavailable, false)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, program: &str) -> Vec<String> {
        let prefix = format!("{} ", program);
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }
}

fn output(success: bool, code: Option<i32>, stdout: &str, stderr: &str) -> ToolOutput {
    ToolOutput {
        success,
        code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput> {
        let key = format!("{} {}", program, args.join(" "));
        self.calls.lock().unwrap().push(key.clone());

        let reply = {
            let mut rules = self.rules.lock().unwrap();
            match rules.iter().position(|r| key.starts_with(&r.prefix)) {
                Some(idx) if rules[idx].once => Some(rules.remove(idx).reply),
                Some(idx) => Some(rules[idx].reply.clone()),
                None => None,
            }
        };

        match reply {
            Some(Reply::Output(o)) => Ok(o),
            Some(Reply::Unavailable) | None => Err(MonitorError::ToolUnavailable {
                tool: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
            }),
        }
    }
}

/// lsof output whose cwd row points at `dir`
pub(crate) fn lsof_output(pid: u32, dir: &str) -> String {
    format!(
        "COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF     NODE NAME\n\
         node    {pid} ozan  cwd    DIR   1,15      640  1234567 {dir}\n\
         node    {pid} ozan  txt    REG   1,15 98765432  7654321 /usr/local/bin/node\n",
        pid = pid,
        dir = dir
    )
}
