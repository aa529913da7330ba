use crate::process::WorkingDirectory;
use crate::session::{
    inspect_git, parse_ahead_behind, parse_branch_header, parse_github_remote, BranchHeader,
    GitInfo,
};

use super::ScriptedRunner;

const REPO: &str = "/Users/test/Projects/app";

fn header(branch: &str, upstream: Option<&str>, tracking: Option<&str>) -> BranchHeader {
    BranchHeader {
        branch_name: branch.to_string(),
        upstream: upstream.map(str::to_string),
        tracking: tracking.map(str::to_string),
    }
}

#[test]
fn test_parse_branch_header() {
    let cases = [
        ("## main", Some(header("main", None, None))),
        (
            "## main...origin/main",
            Some(header("main", Some("origin/main"), None)),
        ),
        (
            "## feature/login...origin/feature/login [ahead 2]",
            Some(header(
                "feature/login",
                Some("origin/feature/login"),
                Some("ahead 2"),
            )),
        ),
        (
            "## main...origin/main [ahead 1, behind 3]",
            Some(header("main", Some("origin/main"), Some("ahead 1, behind 3"))),
        ),
        (
            "## dev...origin/dev [gone]",
            Some(header("dev", Some("origin/dev"), Some("gone"))),
        ),
        ("## No commits yet on main", Some(header("main", None, None))),
        ("## Initial commit on master", Some(header("master", None, None))),
        ("## HEAD (no branch)", Some(header("HEAD", None, None))),
        (" M src/main.rs", None),
        ("?? notes.txt", None),
        ("##", None),
    ];

    for (line, expected) in cases {
        assert_eq!(parse_branch_header(line), expected, "header {:?}", line);
    }
}

#[test]
fn test_parse_github_remote() {
    let cases = [
        ("git@github.com:user/repo.git", Some(("user", "repo"))),
        ("git@github.com:user/repo", Some(("user", "repo"))),
        ("https://github.com/user/repo.git", Some(("user", "repo"))),
        ("https://github.com/user/repo", Some(("user", "repo"))),
        ("https://github.com/user/my.dotted.repo.git\n", Some(("user", "my.dotted.repo"))),
        ("https://gitlab.com/user/repo.git", None),
        ("/srv/git/repo.git", None),
        ("", None),
    ];

    for (url, expected) in cases {
        let expected = expected.map(|(o, r)| (o.to_string(), r.to_string()));
        assert_eq!(parse_github_remote(url), expected, "remote {:?}", url);
    }
}

#[test]
fn test_parse_ahead_behind() {
    assert_eq!(parse_ahead_behind("ahead 3"), (Some(3), None));
    assert_eq!(parse_ahead_behind("behind 12"), (None, Some(12)));
    assert_eq!(parse_ahead_behind("ahead 1, behind 2"), (Some(1), Some(2)));
    assert_eq!(parse_ahead_behind("gone"), (None, None));
}

#[tokio::test]
async fn test_inspect_git_full() {
    let runner = ScriptedRunner::new()
        .ok(
            &format!("git -C {} status", REPO),
            "## main...origin/main [ahead 1, behind 2]\n M src/lib.rs\n?? new.txt\n",
        )
        .ok(
            &format!("git -C {} remote get-url origin", REPO),
            "git@github.com:acme/widgets.git\n",
        );

    let info = inspect_git(&runner, &WorkingDirectory::Path(REPO.to_string())).await;

    assert_eq!(
        info,
        GitInfo {
            has_git: true,
            branch_name: Some("main".to_string()),
            upstream: Some("origin/main".to_string()),
            tracking: Some("ahead 1, behind 2".to_string()),
            commits_ahead: Some(1),
            commits_behind: Some(2),
            repo_owner: Some("acme".to_string()),
            repo_name: Some("widgets".to_string()),
            remote_url: Some("git@github.com:acme/widgets.git".to_string()),
        }
    );
    assert_eq!(
        runner.calls_to("git"),
        vec![
            format!("git -C {} status --porcelain=v1 --branch", REPO),
            format!("git -C {} remote get-url origin", REPO),
        ]
    );
}

#[tokio::test]
async fn test_inspect_git_without_remote() {
    let runner = ScriptedRunner::new()
        .ok("git -C /tmp/local status", "## main\n")
        .fail(
            "git -C /tmp/local remote",
            2,
            "",
            "error: No such remote 'origin'",
        );

    let info = inspect_git(&runner, &WorkingDirectory::Path("/tmp/local".to_string())).await;

    assert!(info.has_git);
    assert_eq!(info.branch_name.as_deref(), Some("main"));
    assert_eq!(info.repo_owner.as_deref(), Some(""));
    assert_eq!(info.repo_name.as_deref(), Some(""));
    assert!(info.remote_url.is_none());
}

#[tokio::test]
async fn test_inspect_git_non_github_remote() {
    let runner = ScriptedRunner::new()
        .ok("git -C /tmp/lab status", "## main...origin/main\n")
        .ok("git -C /tmp/lab remote", "https://gitlab.com/acme/widgets.git\n");

    let info = inspect_git(&runner, &WorkingDirectory::Path("/tmp/lab".to_string())).await;

    assert!(info.has_git);
    assert_eq!(info.repo_owner.as_deref(), Some(""));
    assert_eq!(
        info.remote_url.as_deref(),
        Some("https://gitlab.com/acme/widgets.git")
    );
}

#[tokio::test]
async fn test_inspect_git_not_a_repository() {
    let runner = ScriptedRunner::new().fail(
        "git",
        128,
        "",
        "fatal: not a git repository (or any of the parent directories): .git",
    );

    let info = inspect_git(&runner, &WorkingDirectory::Path("/tmp".to_string())).await;

    assert_eq!(info, GitInfo::none());
    // No remote lookup after a failed status
    assert_eq!(runner.calls_to("git").len(), 1);
}

#[tokio::test]
async fn test_inspect_git_missing_binary_or_header() {
    let missing = ScriptedRunner::new();
    let info = inspect_git(&missing, &WorkingDirectory::Path(REPO.to_string())).await;
    assert!(!info.has_git);

    let headerless = ScriptedRunner::new().ok("git", " M file.rs\n");
    let info = inspect_git(&headerless, &WorkingDirectory::Path(REPO.to_string())).await;
    assert!(!info.has_git);
}

#[tokio::test]
async fn test_inspect_git_skips_sentinels() {
    let runner = ScriptedRunner::new().ok("git", "## main\n");

    for wd in [WorkingDirectory::Unknown, WorkingDirectory::PermissionDenied] {
        assert_eq!(inspect_git(&runner, &wd).await, GitInfo::none());
    }
    assert!(runner.calls().is_empty());
}

#[test]
fn test_git_info_serialization() {
    let json = serde_json::to_value(GitInfo::none()).unwrap();
    assert_eq!(json, serde_json::json!({"hasGit": false}));
}
