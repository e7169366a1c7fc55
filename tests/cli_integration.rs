//! Integration tests for the `syncrotask` CLI.
//!
//! Each test initializes a board in a temp directory, runs `syncrotask` as a
//! subprocess, and checks stdout and/or the stored blobs.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Config for tests: no sign-in pause, and an API key variable nobody sets,
/// so every AI call takes the offline fallback.
const TEST_CONFIG: &str = r#"
[auth]
simulated_delay_ms = 0

[ai]
api_key_env = "SYNCROTASK_TEST_NO_SUCH_KEY"
"#;

fn create_test_board(root: &Path) {
    run_ok(root, &["init"]);
    fs::write(root.join(".syncrotask/config.toml"), TEST_CONFIG).unwrap();
}

fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_syncrotask"))
        .args(args)
        .current_dir(dir)
        .env_remove("SYNCROTASK_TEST_NO_SUCH_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("SYNCROTASK_LOG")
        .output()
        .expect("failed to run syncrotask");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run(dir, args);
    if !success {
        panic!(
            "syncrotask {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn run_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run(dir, args);
    if success {
        panic!("syncrotask {:?} should have failed:\nstdout: {}", args, stdout);
    }
    stderr
}

fn login_tl(dir: &Path) {
    run_ok(dir, &["login", "TL1001", "--password", "tl@pass"]);
}

fn login_emp(dir: &Path) {
    run_ok(dir, &["login", "EMP2001", "--password", "emp@pass"]);
}

fn stored_tasks(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join(".syncrotask/syncrotask_data.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_seeds_sample_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_ok(tmp.path(), &["init"]);
    assert!(out.contains("Initialized task board"));
    assert!(out.contains("3 sample tasks"));
    assert!(tmp.path().join(".syncrotask/config.toml").exists());
    assert_eq!(stored_tasks(tmp.path()).as_array().unwrap().len(), 3);
}

#[test]
fn test_init_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["init", "--empty"]);
    assert_eq!(stored_tasks(tmp.path()), serde_json::json!([]));
}

#[test]
fn test_init_twice_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["init"]);
    let err = run_err(tmp.path(), &["init"]);
    assert!(err.contains("already exists"));
}

#[test]
fn test_commands_outside_a_board_fail() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_err(tmp.path(), &["list"]);
}

#[test]
fn test_board_dir_flag() {
    let board = tempfile::TempDir::new().unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();
    create_test_board(board.path());

    let dir = board.path().to_str().unwrap();
    let out = run_ok(elsewhere.path(), &["-C", dir, "list"]);
    assert!(out.contains("Q4 Budget Proposal"));

    let missing = board.path().join("nope");
    let err = run_err(elsewhere.path(), &["-C", missing.to_str().unwrap(), "list"]);
    assert!(err.contains("cannot resolve -C path"));
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_login_and_whoami() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    assert_eq!(run_ok(tmp.path(), &["whoami"]).trim(), "not signed in");

    let out = run_ok(tmp.path(), &["login", "TL1001", "--password", "tl@pass"]);
    assert!(out.contains("Signed in as TL1001 (TL Access)"));
    assert_eq!(run_ok(tmp.path(), &["whoami"]).trim(), "TL1001 (TL Access)");

    let json: serde_json::Value =
        serde_json::from_str(&run_ok(tmp.path(), &["whoami", "--json"])).unwrap();
    assert_eq!(json["signedIn"], true);
}

#[test]
fn test_login_wrong_password() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let err = run_err(tmp.path(), &["login", "TL1001", "--password", "nope"]);
    assert!(err.contains("Invalid Employee ID or password."));
    assert!(!tmp.path().join(".syncrotask/syncrotask_session.json").exists());
}

#[test]
fn test_logout_keeps_tasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_emp(tmp.path());

    run_ok(tmp.path(), &["logout"]);
    assert_eq!(run_ok(tmp.path(), &["whoami"]).trim(), "not signed in");
    assert_eq!(stored_tasks(tmp.path()).as_array().unwrap().len(), 3);
}

// ============================================================================
// Read commands
// ============================================================================

#[test]
fn test_list_and_filters() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("[>] 1 Q4 Budget Proposal !! #Admin due 2024-11-20 (3 steps)"));
    assert!(out.contains("[ ] 2 Redesign UI components"));
    assert!(out.contains("[x] 3 Client Onboarding"));

    let out = run_ok(tmp.path(), &["list", "--query", "BUDGET"]);
    assert_eq!(out.lines().count(), 1);

    let out = run_ok(tmp.path(), &["list", "--status", "done"]);
    assert!(out.contains("Client Onboarding"));
    assert!(!out.contains("Budget"));
}

#[test]
fn test_list_json_keeps_wire_format() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let json: serde_json::Value =
        serde_json::from_str(&run_ok(tmp.path(), &["list", "--json"])).unwrap();
    assert_eq!(json[0]["status"], "IN_PROGRESS");
    assert_eq!(json[0]["dueDate"], "2024-11-20");
    assert_eq!(json[0]["subTasks"][0], "Review Q3 stats");
}

#[test]
fn test_show_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let out = run_ok(tmp.path(), &["show", "2"]);
    assert!(out.contains("Redesign UI components"));
    assert!(out.contains("priority: Medium"));

    let err = run_err(tmp.path(), &["show", "nope"]);
    assert!(err.contains("task not found: nope"));
}

#[test]
fn test_board_placeholder_follows_role() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    login_emp(tmp.path());
    let out = run_ok(tmp.path(), &["board", "--query", "zzz"]);
    assert!(out.contains("== To Do (0) =="));
    assert!(out.contains("No tasks assigned"));

    login_tl(tmp.path());
    let out = run_ok(tmp.path(), &["board", "--query", "zzz"]);
    assert!(out.contains("No tasks yet"));
}

#[test]
fn test_stats() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let out = run_ok(tmp.path(), &["stats"]);
    assert!(out.contains("Completion Rate  33%"));
    assert!(out.contains("Critical Tasks   1"));
    assert!(out.contains("Total Volume     3"));

    let out = run_ok(tmp.path(), &["stats", "--query", "onboarding"]);
    assert!(out.contains("Completion Rate  100%"));
}

// ============================================================================
// Write commands
// ============================================================================

#[test]
fn test_team_lead_add_edit_delete() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_tl(tmp.path());

    let id = run_ok(
        tmp.path(),
        &[
            "add",
            "Write release notes",
            "-d",
            "For 2.0",
            "--priority",
            "high",
            "--subtask",
            "Collect changes",
        ],
    )
    .trim()
    .to_string();
    assert!(!id.is_empty());

    let tasks = stored_tasks(tmp.path());
    let added = tasks.as_array().unwrap().last().unwrap().clone();
    assert_eq!(added["id"], id.as_str());
    assert_eq!(added["status"], "TODO");
    assert_eq!(added["priority"], "High");
    assert_eq!(added["category"], "Engineering");

    run_ok(tmp.path(), &["edit", &id, "--title", "Write 2.0 notes", "--clear-subtasks"]);
    let out = run_ok(tmp.path(), &["show", &id]);
    assert!(out.contains("Write 2.0 notes"));

    let out = run_ok(tmp.path(), &["delete", &id, "--yes"]);
    assert_eq!(out.trim(), format!("deleted {}", id));
    assert_eq!(stored_tasks(tmp.path()).as_array().unwrap().len(), 3);
}

#[test]
fn test_delete_answered_no_is_cancelled() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_tl(tmp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_syncrotask"))
        .args(["delete", "2"])
        .current_dir(tmp.path())
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::Write;
            child.stdin.take().unwrap().write_all(b"n\n")?;
            child.wait_with_output()
        })
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "cancelled");
    assert_eq!(stored_tasks(tmp.path()).as_array().unwrap().len(), 3);
}

#[test]
fn test_delete_prompt_leaves_board_unlocked() {
    use std::io::Write;
    use std::process::Stdio;

    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_tl(tmp.path());

    let mut child = Command::new(env!("CARGO_BIN_EXE_syncrotask"))
        .args(["delete", "2"])
        .current_dir(tmp.path())
        .env_remove("SYNCROTASK_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(300));

    // Another writer gets through while the delete waits for an answer
    run_ok(tmp.path(), &["toggle", "1"]);

    child.stdin.take().unwrap().write_all(b"y\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "deleted 2");

    let tasks = stored_tasks(tmp.path());
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["status"], "DONE");
}

#[test]
fn test_employee_cannot_add_or_delete() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_emp(tmp.path());
    let before = stored_tasks(tmp.path());

    let err = run_err(tmp.path(), &["add", "Sneaky"]);
    assert!(err.contains("add requires TL access"));
    let err = run_err(tmp.path(), &["delete", "1", "--yes"]);
    assert!(err.contains("delete requires TL access"));
    let err = run_err(tmp.path(), &["edit", "1", "--title", "x"]);
    assert!(err.contains("edit requires TL access"));

    assert_eq!(stored_tasks(tmp.path()), before);
}

#[test]
fn test_toggle_flips_done_and_back() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_emp(tmp.path());

    // In progress -> done
    let out = run_ok(tmp.path(), &["toggle", "1"]);
    assert!(out.starts_with("[x] 1 "));
    // Done -> to do, never back to in progress
    let out = run_ok(tmp.path(), &["toggle", "1"]);
    assert!(out.starts_with("[ ] 1 "));
    assert_eq!(stored_tasks(tmp.path())[0]["status"], "TODO");
}

#[test]
fn test_toggle_needs_a_session() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let err = run_err(tmp.path(), &["toggle", "1"]);
    assert!(err.contains("not signed in"));
    assert_eq!(stored_tasks(tmp.path())[0]["status"], "IN_PROGRESS");
}

// ============================================================================
// AI commands (offline: no API key)
// ============================================================================

#[test]
fn test_breakdown_falls_back_without_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let out = run_ok(tmp.path(), &["breakdown", "Launch", "Ship the new site"]);
    assert_eq!(
        out,
        "- Research requirements\n- Define scope\n- Execution\n- Review\n"
    );
}

#[test]
fn test_add_with_breakdown_uses_fallback_steps() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());
    login_tl(tmp.path());

    let id = run_ok(tmp.path(), &["add", "Launch", "-d", "Ship it", "--breakdown"])
        .trim()
        .to_string();
    let json: serde_json::Value =
        serde_json::from_str(&run_ok(tmp.path(), &["show", &id, "--json"])).unwrap();
    assert_eq!(json["subTasks"].as_array().unwrap().len(), 4);
}

#[test]
fn test_advice_falls_back_without_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_board(tmp.path());

    let out = run_ok(tmp.path(), &["advice"]);
    assert_eq!(
        out.trim(),
        "Focus on completing your high-priority tasks first to maximize impact."
    );
}
