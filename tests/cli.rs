use assert_cmd::Command;
use predicates::prelude::*;

fn strata(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.env("STRATA_DATA_DIR", data_dir);
    cmd
}

#[test]
fn test_full_reconciliation_flow() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();

    strata(data_dir).arg("init").assert().success();

    strata(data_dir)
        .args(["properties", "add", "101", "--owner", "Jane Doe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unit 101"));

    strata(data_dir)
        .args([
            "fees", "raise", "Q1 2024", "--start", "2024-03-01", "--end", "2024-05-31",
            "--total", "500",
        ])
        .assert()
        .success();

    let stmt = data_dir.join("statement.csv");
    std::fs::write(
        &stmt,
        "Date,Amount,Description,Reference\n2024-03-01,500.00,Strata fee unit 101,REF123\n",
    )
    .unwrap();
    let stmt = stmt.to_str().unwrap().to_string();

    // Dry run prints suggestions without recording anything
    strata(data_dir)
        .args(["reconcile", &stmt])
        .assert()
        .success()
        .stdout(predicate::str::contains("unit 101"))
        .stdout(predicate::str::contains("exact"))
        .stdout(predicate::str::contains("Nothing recorded"));

    // Accept the row; the repeated row number must not double-commit
    strata(data_dir)
        .args(["reconcile", &stmt, "--accept", "1,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 1 payment"));

    // Re-uploading the same statement flags the row as a duplicate
    strata(data_dir)
        .args(["reconcile", &stmt])
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate"));

    // And accepting it again is refused without --include-duplicates
    strata(data_dir)
        .args(["reconcile", &stmt, "--accept", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("refused"));

    strata(data_dir)
        .arg("payments")
        .assert()
        .success()
        .stdout(predicate::str::contains("$500.00"));
}

#[test]
fn test_fees_raise_distributes_by_entitlement_and_debits_balances() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();
    strata(data_dir).arg("init").assert().success();

    strata(data_dir)
        .args(["properties", "add", "101", "--entitlement", "1.0"])
        .assert()
        .success();
    strata(data_dir)
        .args(["properties", "add", "102", "--entitlement", "2.0"])
        .assert()
        .success();

    strata(data_dir)
        .args([
            "fees", "raise", "Q1 2024", "--start", "2024-03-01", "--end", "2024-05-31",
            "--total", "300",
        ])
        .assert()
        .success();

    // 300 split 1:2 across the two units
    strata(data_dir)
        .args(["fees", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100.00"))
        .stdout(predicate::str::contains("$200.00"));

    // Raising a fee debits each property's balance by its share
    strata(data_dir)
        .args(["properties", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$100.00"))
        .stdout(predicate::str::contains("-$200.00"));
}

#[test]
fn test_fees_mark_paid_closes_fee_outside_reconciliation() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();
    strata(data_dir).arg("init").assert().success();

    strata(data_dir)
        .args(["properties", "add", "101"])
        .assert()
        .success();
    strata(data_dir)
        .args([
            "fees", "raise", "Q1 2024", "--start", "2024-03-01", "--end", "2024-05-31",
            "--total", "500",
        ])
        .assert()
        .success();

    strata(data_dir)
        .args(["fees", "mark-paid", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked fee 1 as paid"));

    strata(data_dir)
        .args(["fees", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unpaid").not());

    strata(data_dir)
        .args(["fees", "mark-paid", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no fee with id 99"));
}

#[test]
fn test_reconcile_rejects_malformed_statement() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();
    strata(data_dir).arg("init").assert().success();

    let stmt = data_dir.join("bad.csv");
    std::fs::write(&stmt, "Foo,Bar\n1,2\n").unwrap();

    strata(data_dir)
        .args(["reconcile", stmt.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed statement"));
}

#[test]
fn test_fees_raise_requires_properties() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path();
    strata(data_dir).arg("init").assert().success();

    strata(data_dir)
        .args([
            "fees", "raise", "Q1 2024", "--start", "2024-03-01", "--end", "2024-05-31",
            "--total", "500",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no properties"));
}
