// Runs the built binary end to end: environment config, seeding, the menu
// loop and the process exit status.

use assert_cmd::Command;
use predicates::prelude::*;

fn publicdata() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_publicdata-cli"));
    cmd.env("PUBLICDATA_DB", ":memory:")
        .env_remove("PUBLICDATA_SEED")
        .env_remove("PUBLICDATA_LOG");
    cmd
}

#[test]
fn quit_exits_successfully() {
    publicdata()
        .write_stdin("6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("6. Quit"));
}

#[test]
fn bundled_data_is_listed() {
    publicdata()
        .write_stdin("1\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("AFG").and(predicate::str::contains("Afghanistan")));
}

#[test]
fn closed_stdin_exits_with_failure() {
    publicdata()
        .write_stdin("1\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Something went wrong with the stream"));
}

#[test]
fn invalid_log_level_fails_at_startup() {
    publicdata()
        .env("PUBLICDATA_LOG", "loud")
        .write_stdin("6\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PUBLICDATA_LOG"));
}

#[test]
fn missing_seed_file_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    publicdata()
        .env("PUBLICDATA_SEED", dir.path().join("absent.json"))
        .write_stdin("6\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read seed file"));
}
