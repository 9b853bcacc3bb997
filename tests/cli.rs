use assert_cmd::Command;
use predicates::prelude::*;

fn git_release(token_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("git-release").expect("binary");
    cmd.env("GIT_RELEASE_TOKEN_FILE", token_dir.path().join("token"))
        // nothing listens here; tests must fail before any request
        .env("GIT_RELEASE_API_URL", "http://127.0.0.1:9")
        .env_remove("GIT_RELEASE_REPO");
    cmd
}

#[test]
fn test_version_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "git-release version {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_unknown_status_exits_with_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .args(["--repo", "octo/widgets", "set", "v1.0", "published"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown status 'published'"))
        .stderr(predicate::str::contains("r[elease], p[rerelease] or d[raft]"));
}

#[test]
fn test_list_without_token_asks_to_login() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .args(["--repo", "octo/widgets", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("please login first"))
        .stderr(predicate::str::contains("git-release login"));
}

#[test]
fn test_outside_repository_without_repo_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .current_dir(dir.path())
        .args(["doc", "clear", "v1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn test_login_aborts_on_empty_username() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .arg("login")
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("aborted"));

    assert!(!dir.path().join("token").exists());
}

#[test]
fn test_set_without_state_exits_with_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .args(["--repo", "octo/widgets", "set", "v1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"))
        .stderr(predicate::str::contains("<STATE>"));
}

#[test]
fn test_unknown_command_exits_with_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir).arg("bogus").assert().code(1);
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_help_exits_with_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    git_release(&dir)
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage:"));
}
