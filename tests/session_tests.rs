use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{HEADER, Sandbox};

#[test]
fn new_creates_header_only_ledger_once() {
    let sb = Sandbox::new(Some("Acme"));

    sb.cmd()
        .arg("NEW")
        .assert()
        .success()
        .stdout(contains("Client: Acme").and(contains("Initializing new file")));

    assert_eq!(sb.read_ledger("Acme").trim_end(), HEADER);

    sb.cmd()
        .arg("new")
        .assert()
        .failure()
        .stderr(contains("File already exists"));
}

#[test]
fn start_then_end_merges_and_bills() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);

    sb.at("02.03.2024 09:00")
        .args(["start", "-l", "CODE", "-p", "Alpha", "-d", "parser"])
        .assert()
        .success()
        .stdout(contains("Starting time: 02.03.2024 09:00"));

    assert_eq!(sb.rows("Acme"), vec!["02.03.2024 09:00;CODE;Alpha;parser;;;"]);

    sb.at("02.03.2024 10:30")
        .args(["end", "-l", "TEST", "-d", "tests"])
        .assert()
        .success()
        .stdout(
            contains("Ending time: 02.03.2024 10:30")
                .and(contains("Worked for 90 minutes"))
                .and(contains("Earned: 60.00€")),
        );

    assert_eq!(
        sb.rows("Acme"),
        vec!["02.03.2024 09:00;CODE,TEST;Alpha;parser + tests;02.03.2024 10:30;90;"]
    );
}

#[test]
fn end_without_anything_warns_about_defaults() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);

    sb.at("02.03.2024 09:00").arg("start").assert().success();
    sb.at("02.03.2024 09:10")
        .arg("end")
        .assert()
        .success()
        .stdout(
            contains("only the default label")
                .and(contains("only the default project"))
                .and(contains("Did not get session description")),
        );

    assert_eq!(
        sb.rows("Acme"),
        vec!["02.03.2024 09:00;MISC;MISC;;02.03.2024 09:10;10;"]
    );
}

#[test]
fn state_errors_leave_the_ledger_alone() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);

    sb.at("02.03.2024 09:00")
        .arg("end")
        .assert()
        .failure()
        .stderr(contains("No open session"));

    sb.at("02.03.2024 09:00").arg("start").assert().success();
    let before = sb.read_ledger("Acme");

    sb.at("02.03.2024 09:05")
        .arg("start")
        .assert()
        .failure()
        .stderr(contains("Last session was not closed"));

    assert_eq!(sb.read_ledger("Acme"), before);
}

#[test]
fn pause_blocks_end_and_unpause_removes_the_gap() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);

    sb.at("02.03.2024 09:00").arg("start").assert().success();
    sb.at("02.03.2024 10:00")
        .arg("pause")
        .assert()
        .success()
        .stdout(contains("Session paused at: 02.03.2024 10:00"));
    assert!(sb.pause_path("Acme").exists());

    sb.at("02.03.2024 10:10")
        .arg("end")
        .assert()
        .failure()
        .stderr(contains("paused"));
    sb.at("02.03.2024 10:10").arg("pause").assert().failure();

    sb.at("02.03.2024 10:20")
        .arg("unpause")
        .assert()
        .success()
        .stdout(contains("Minutes elapsed: 20"));
    assert!(!sb.pause_path("Acme").exists());
    assert_eq!(sb.rows("Acme"), vec!["02.03.2024 09:20;MISC;MISC;;;;"]);

    sb.at("02.03.2024 11:00")
        .args(["end", "-d", "x"])
        .assert()
        .success()
        .stdout(contains("Worked for 100 minutes"));
}

#[test]
fn unpause_requires_a_pause() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &["02.03.2024 09:00;MISC;MISC;;;;"]);

    sb.at("02.03.2024 09:30")
        .arg("unpause")
        .assert()
        .failure()
        .stderr(contains("not paused"));
}

#[test]
fn reset_moves_start_of_open_and_end_of_closed_session() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);

    sb.at("02.03.2024 09:00").arg("start").assert().success();
    sb.at("02.03.2024 09:30")
        .args(["reset", "-m", "15"])
        .assert()
        .success()
        .stdout(contains("session extended"));
    assert_eq!(sb.rows("Acme"), vec!["02.03.2024 08:45;MISC;MISC;;;;"]);

    sb.at("02.03.2024 10:00").args(["end", "-d", "x"]).assert().success();

    sb.at("02.03.2024 10:05")
        .args(["reset", "-m", "-30"])
        .assert()
        .success()
        .stdout(contains("session shortened to 45 minutes"));
    assert_eq!(
        sb.rows("Acme"),
        vec!["02.03.2024 08:45;MISC;MISC;x;02.03.2024 09:30;45;"]
    );

    sb.at("02.03.2024 10:05")
        .args(["reset", "-m", "-45"])
        .assert()
        .failure()
        .stderr(contains("Sessions must end after they start"));
}

#[test]
fn reset_on_empty_ledger_fails() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);

    sb.at("02.03.2024 10:05")
        .args(["reset", "-m", "5"])
        .assert()
        .failure()
        .stderr(contains("empty ledger"));
}

#[test]
fn reset_beyond_date_range_fails_cleanly() {
    let sb = Sandbox::new(Some("Acme"));
    let row = "01.03.2024 09:00;CODE, LEARN;A;;01.03.2024 10:00;60;";
    sb.write_ledger("Acme", &[row]);

    for minutes in ["200000000000", "-200000000000"] {
        sb.at("02.03.2024 10:05")
            .args(["reset", "-m", minutes])
            .assert()
            .failure()
            .stderr(contains("outside the supported date range"))
            .stderr(contains("panicked").not());
    }
    assert_eq!(sb.rows("Acme"), vec![row]);
}

#[test]
fn writes_keep_a_backup_of_the_previous_ledger() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &[]);
    let before = sb.read_ledger("Acme");

    sb.at("02.03.2024 09:00").arg("start").assert().success();

    let backup = sb.ledgers.join("Acme_billings_backup.csv");
    assert_eq!(fs::read_to_string(backup).unwrap(), before);
}

#[test]
fn check_reports_faulty_lines() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger(
        "Acme",
        &[
            "01.03.2024 09:00;CODE;P;;01.03.2024 10:00;60;",
            "01.03.2024 11:00;CODE;P;;01.03.2024 11:30;45;",
        ],
    );

    sb.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(
            contains("Problem found with record on line 2")
                .and(contains("Expected record minutes: 30"))
                .and(contains("Counted 1 faulty line")),
        );
}

#[test]
fn check_healthy_and_open_ledgers() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger("Acme", &["01.03.2024 09:00;CODE;P;;01.03.2024 10:00;60;"]);

    sb.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(contains("Got 1 healthy lines out of 1."));

    sb.at("02.03.2024 09:00").arg("start").assert().success();
    sb.cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(contains("Last session was not closed"));
}

#[test]
fn print_shows_rows_and_state() {
    let sb = Sandbox::new(Some("Acme"));
    sb.write_ledger(
        "Acme",
        &[
            "01.03.2024 09:00;CODE;Alpha;parser;01.03.2024 10:00;60;",
            "02.03.2024 09:00;MISC;MISC;;;;",
        ],
    );

    sb.cmd()
        .arg("print")
        .assert()
        .success()
        .stdout(
            contains("Starting time")
                .and(contains("parser"))
                .and(contains("Total: 60 minutes"))
                .and(contains("session open")),
        );
}

#[test]
fn malformed_ledger_is_reported() {
    let sb = Sandbox::new(Some("Acme"));
    fs::write(
        sb.ledger_path("Acme"),
        format!("{HEADER}\nnot a record\n"),
    )
    .unwrap();

    sb.cmd()
        .arg("print")
        .assert()
        .failure()
        .stderr(contains("Malformed record on line 2"));
}
