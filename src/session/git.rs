use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::process::WorkingDirectory;
use crate::runner::CommandRunner;

/// Owner and repo of a GitHub remote, SSH (`git@github.com:user/repo.git`)
/// or HTTPS (`https://github.com/user/repo.git`)
static GITHUB_REMOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com[:/]([^/]+)/([^/]+?)(?:\.git)?$").unwrap());

static AHEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"ahead (\d+)").unwrap());
static BEHIND: Lazy<Regex> = Lazy::new(|| Regex::new(r"behind (\d+)").unwrap());

/// Version-control state of a working directory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GitInfo {
    pub has_git: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    /// Upstream ref after "...", e.g. "origin/main"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
    /// Bracketed tracking annotation, e.g. "ahead 1, behind 2"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_ahead: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_behind: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

impl GitInfo {
    pub fn none() -> Self {
        GitInfo::default()
    }
}

/// Parsed `## ...` header of `git status --porcelain=v1 --branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchHeader {
    pub branch_name: String,
    pub upstream: Option<String>,
    pub tracking: Option<String>,
}

/// Inspect the repository at `working_dir`. Sentinel directories, non-repos
/// and a missing git binary all yield `has_git: false`.
pub async fn inspect_git<R: CommandRunner + ?Sized>(
    runner: &R,
    working_dir: &WorkingDirectory,
) -> GitInfo {
    let Some(dir) = working_dir.path() else {
        return GitInfo::none();
    };

    let status = match runner
        .run("git", &["-C", dir, "status", "--porcelain=v1", "--branch"])
        .await
    {
        Ok(o) if o.success => o,
        Ok(o) => {
            debug!("git status failed in {} (code {:?})", dir, o.code);
            return GitInfo::none();
        }
        Err(e) => {
            debug!("git unavailable for {}: {}", dir, e);
            return GitInfo::none();
        }
    };

    let Some(header) = status.stdout.lines().find_map(parse_branch_header) else {
        debug!("No branch header in git status for {}", dir);
        return GitInfo::none();
    };

    // A missing or odd remote never fails the lookup
    let remote_url = match runner
        .run("git", &["-C", dir, "remote", "get-url", "origin"])
        .await
    {
        Ok(o) if o.success => Some(o.stdout.trim().to_string()).filter(|u| !u.is_empty()),
        _ => None,
    };

    let (repo_owner, repo_name) = remote_url
        .as_deref()
        .and_then(parse_github_remote)
        .unwrap_or_default();

    let (commits_ahead, commits_behind) = header
        .tracking
        .as_deref()
        .map(parse_ahead_behind)
        .unwrap_or((None, None));

    GitInfo {
        has_git: true,
        branch_name: Some(header.branch_name),
        upstream: header.upstream,
        tracking: header.tracking,
        commits_ahead,
        commits_behind,
        repo_owner: Some(repo_owner),
        repo_name: Some(repo_name),
        remote_url,
    }
}

/// Parse a porcelain v1 branch header line.
///
/// Handles "## main", "## main...origin/main [ahead 1, behind 2]",
/// "## No commits yet on main" and "## HEAD (no branch)".
pub fn parse_branch_header(line: &str) -> Option<BranchHeader> {
    let rest = line.strip_prefix("##")?.trim();

    let (head, tracking) = match (rest.find(" ["), rest.ends_with(']')) {
        (Some(idx), true) => (
            rest[..idx].trim(),
            Some(rest[idx + 2..rest.len() - 1].to_string()),
        ),
        _ => (rest, None),
    };

    let head = head
        .strip_prefix("No commits yet on ")
        .or_else(|| head.strip_prefix("Initial commit on "))
        .unwrap_or(head);

    if head.starts_with("HEAD (no branch)") {
        return Some(BranchHeader {
            branch_name: "HEAD".to_string(),
            upstream: None,
            tracking,
        });
    }

    let (branch_name, upstream) = match head.split_once("...") {
        Some((branch, upstream)) => (branch, Some(upstream.to_string())),
        None => (head, None),
    };

    if branch_name.is_empty() {
        return None;
    }

    Some(BranchHeader {
        branch_name: branch_name.to_string(),
        upstream,
        tracking,
    })
}

/// Derive ("user", "repo") from a GitHub remote URL
pub fn parse_github_remote(remote_url: &str) -> Option<(String, String)> {
    let caps = GITHUB_REMOTE.captures(remote_url.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Read the counts out of a tracking annotation like "ahead 3, behind 1"
pub fn parse_ahead_behind(tracking: &str) -> (Option<u32>, Option<u32>) {
    let count = |re: &Regex| {
        re.captures(tracking)
            .and_then(|caps| caps[1].parse::<u32>().ok())
    };
    (count(&AHEAD), count(&BEHIND))
}
