use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let statuses = dir.path().join("statuses.csv");
    let orders = dir.path().join("orders.csv");
    let records = dir.path().join("records.csv");

    common::write_csv(
        &statuses,
        &["payment_id", "group"],
        &[&["P-1", "completed"], &["", "completed"], &["P-2", "pending"]],
    )
    .unwrap();
    common::write_csv(
        &orders,
        &["order", "state", "secure_key"],
        &[
            &["1", "10", "key-1"],
            // Zero is not a valid state id
            &["2", "0", "key-2"],
            &["not_a_number", "10", "key-3"],
        ],
    )
    .unwrap();
    common::write_csv(
        &records,
        &["order", "payment_id", "ip_address"],
        &[&["1", "P-1", "10.0.0.1"], &["abc", "P-2", "10.0.0.2"]],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("bank-redirect"));
    cmd.arg(&statuses)
        .arg("--config")
        .arg(common::FIXTURE_CONFIG)
        .arg("--orders")
        .arg(&orders)
        .arg("--records")
        .arg(&records);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading payment status"))
        .stderr(predicate::str::contains("Error reading order"))
        .stderr(predicate::str::contains("Error reading payment record"))
        .stdout(predicate::str::contains("P-1,order_detail,1,42"))
        // Its record was malformed, so the payment cannot be found
        .stdout(predicate::str::contains("P-2,error,,"));
}

#[test]
fn test_duplicate_status_rows_confirm_once() {
    let dir = tempfile::tempdir().unwrap();
    let statuses = dir.path().join("statuses.csv");

    common::write_csv(
        &statuses,
        &["payment_id", "group"],
        &[&["P-4", "pending"], &["P-4", "completed"]],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("bank-redirect"));
    cmd.arg(&statuses)
        .arg("--config")
        .arg(common::FIXTURE_CONFIG)
        .arg("--orders")
        .arg("tests/fixtures/orders.csv")
        .arg("--records")
        .arg("tests/fixtures/records.csv");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("P-4,").count(), 1);
    assert!(stdout.contains("P-4,order_detail,4,42"));
}

#[test]
fn test_replay_keeps_first_seen_order() {
    let dir = tempfile::tempdir().unwrap();
    let statuses = dir.path().join("statuses.csv");

    common::write_csv(
        &statuses,
        &["payment_id", "group"],
        &[
            &["P-3", "pending"],
            &["P-1", "completed"],
            &["P-3", "completed"],
            &["P-2", "failed"],
            &["P-1", "completed"],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("bank-redirect"));
    cmd.arg(&statuses)
        .arg("--config")
        .arg(common::FIXTURE_CONFIG)
        .arg("--orders")
        .arg("tests/fixtures/orders.csv")
        .arg("--records")
        .arg("tests/fixtures/records.csv");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(ids, ["P-3", "P-1", "P-2"]);
    assert!(stdout.contains("P-3,order_detail,3,42"));
}
