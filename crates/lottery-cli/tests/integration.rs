#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lottery(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lottery").unwrap();
    cmd.current_dir(dir.path())
        .env("LOTTERY_ROOT", dir.path())
        .env_remove("RESEND_API_KEY");
    cmd
}

fn init_root(dir: &TempDir) {
    lottery(dir).arg("init").assert().success();
}

fn add(dir: &TempDir, name: &str) {
    lottery(dir)
        .args([
            "participants",
            "add",
            "--name",
            name,
            "--email",
            &format!("{}@example.com", name.to_lowercase()),
            "--slack",
            &format!("@{}", name.to_lowercase()),
        ])
        .assert()
        .success();
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// lottery init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_lottery_dir() {
    let dir = TempDir::new().unwrap();
    lottery(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created .lottery/config.yaml"));

    assert!(dir.path().join(".lottery").is_dir());
    assert!(dir.path().join(".lottery/config.yaml").exists());
    assert!(dir.path().join(".lottery/ledger.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    add(&dir, "Ana");

    lottery(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("kept    .lottery/ledger.yaml"));

    // Existing signups survive a second init.
    let view = json_output(lottery(&dir).args(["--json", "participants", "list"]));
    assert_eq!(view["participants"].as_array().unwrap().len(), 1);
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    lottery(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run 'lottery init'"));
}

// ---------------------------------------------------------------------------
// lottery participants
// ---------------------------------------------------------------------------

#[test]
fn add_and_list_participants() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    lottery(&dir)
        .args(["participants", "add", "--name", "Ana", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added Ana to sheet A"));

    lottery(&dir)
        .args(["participants", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ana@example.com"));
}

#[test]
fn duplicate_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    add(&dir, "Ana");

    lottery(&dir)
        .args(["participants", "add", "--name", "ANA", "--email", "other@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name already signed up"));
}

#[test]
fn malformed_email_is_rejected() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);

    lottery(&dir)
        .args(["participants", "add", "--name", "Ana", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid email"));
}

// ---------------------------------------------------------------------------
// lottery run / pairings / status
// ---------------------------------------------------------------------------

#[test]
fn run_with_one_participant_fails() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    add(&dir, "Ana");

    lottery(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Need at least 2 participants (found 1)"));

    let status = json_output(lottery(&dir).args(["--json", "status"]));
    assert_eq!(status["activeSignupSheet"], "A");
    assert!(status["lastLotteryRun"].is_null());
}

#[test]
fn run_pairs_and_switches_sheet() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    for name in ["Ana", "Bo", "Cy", "Di"] {
        add(&dir, name);
    }

    let result = json_output(lottery(&dir).args(["--json", "run"]));
    assert_eq!(result["previousActive"], "A");
    assert_eq!(result["newActive"], "B");
    assert_eq!(result["notificationCount"], 4);
    assert_eq!(result["notificationFailures"], 0);
    assert_eq!(result["pairingRun"]["groups"].as_array().unwrap().len(), 2);

    lottery(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active sheet:    B"));

    let pairings = json_output(lottery(&dir).args(["--json", "pairings"]));
    assert_eq!(pairings["pairings"].as_array().unwrap().len(), 2);
    assert_eq!(pairings["lotteryRun"], result["pairingRun"]["runTimestamp"]);

    // Sheet B is empty; A still holds last period's signups until the next run.
    let list = json_output(lottery(&dir).args(["--json", "participants", "list"]));
    assert_eq!(list["activeSheet"], "B");
    assert!(list["participants"].as_array().unwrap().is_empty());

    let dormant = json_output(lottery(&dir).args(["--json", "participants", "list", "--sheet", "A"]));
    assert_eq!(dormant["sheet"], "A");
    assert_eq!(dormant["activeSheet"], "B");
    assert_eq!(dormant["participants"].as_array().unwrap().len(), 4);
}

#[test]
fn list_rejects_unknown_sheet() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    lottery(&dir)
        .args(["participants", "list", "--sheet", "z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid roster 'z'"));
}

#[test]
fn status_shows_meeting_schedule() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    lottery(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Meeting:         Tue 12:00 UTC"));
}

#[test]
fn second_run_purges_old_sheet() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    add(&dir, "Ana");
    add(&dir, "Bo");
    lottery(&dir).arg("run").assert().success();

    add(&dir, "Cy");
    add(&dir, "Di");
    lottery(&dir).arg("run").assert().success();

    // Back on A, which was emptied by the second rotation.
    let list = json_output(lottery(&dir).args(["--json", "participants", "list"]));
    assert_eq!(list["activeSheet"], "A");
    assert!(list["participants"].as_array().unwrap().is_empty());

    lottery(&dir)
        .arg("pairings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cy"))
        .stdout(predicate::str::contains("Ana").not());
}

#[test]
fn pairings_before_any_run() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    lottery(&dir)
        .arg("pairings")
        .assert()
        .success()
        .stdout(predicate::str::contains("no pairings yet"));
}

// ---------------------------------------------------------------------------
// lottery clear
// ---------------------------------------------------------------------------

#[test]
fn clear_resets_to_sheet_a() {
    let dir = TempDir::new().unwrap();
    init_root(&dir);
    add(&dir, "Ana");
    add(&dir, "Bo");
    lottery(&dir).arg("run").assert().success();

    lottery(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to sheet A"));

    let cleared = json_output(lottery(&dir).args(["--json", "clear"]));
    assert_eq!(cleared["activeSignupSheet"], "A");
    assert!(cleared["lastLotteryRun"].is_null());

    let status = json_output(lottery(&dir).args(["--json", "status"]));
    assert_eq!(status["activeSignupSheet"], "A");
    assert!(status["lastLotteryRun"].is_null());
}
