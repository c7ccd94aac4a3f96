//! Tests that run the gt_cli binary as a child process.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn run_cli(args: &[&str], envs: &[(&str, &str)], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gt_cli"))
        .args(args)
        .env_remove("GAME_DB_FILE")
        .env_remove("BLIND_BASE_INTERVAL_SECS")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_unopenable_league_file_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().to_str().unwrap();

    let output = run_cli(&["--db-file", db_file], &[], "");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("problem opening"));
}

#[test]
fn test_bad_base_interval_env_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("game.db.json");

    let output = run_cli(
        &["--db-file", db_file.to_str().unwrap()],
        &[("BLIND_BASE_INTERVAL_SECS", "ten minutes")],
        "",
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BLIND_BASE_INTERVAL_SECS"));
    assert!(!db_file.exists());
}

#[test]
fn test_full_game_through_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("game.db.json");

    let output = run_cli(
        &["--db-file", db_file.to_str().unwrap()],
        &[],
        "3\nChris wins\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Let's play poker\n"));
    assert!(stdout.contains("Please enter the number of players: "));

    let league = std::fs::read_to_string(&db_file).unwrap();
    assert_eq!(league, r#"[{"Name":"Chris","Wins":1}]"#);
}
