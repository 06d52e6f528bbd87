//! Command-line tests for the `zerocurve` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const INSTRUMENTS: &str = "\
kind,maturity,rate,coupon,frequency,price
deposit,0.25,3.00,,,
deposit,0.5,3.10,,,
deposit,1,3.20,,,
swap,2,3.35,,1,
bond,3,,4.00,1,101.55
swap,5,3.55,,1,
swap,10,3.80,,1,
bond,20,,,,46.00
";

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn zerocurve() -> Command {
    let mut cmd = Command::cargo_bin("zerocurve").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("ZEROCURVE_CONFIG");
    cmd
}

#[test]
fn test_bootstrap_table() {
    let file = write_temp(INSTRUMENTS, ".csv");

    zerocurve()
        .args(["bootstrap", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrapped Curve"))
        .stdout(predicate::str::contains("Hagan-West"))
        .stdout(predicate::str::contains("20.00Y"));
}

#[test]
fn test_bootstrap_json_with_residuals() {
    let file = write_temp(INSTRUMENTS, ".csv");

    let output = zerocurve()
        .args(["--format", "json", "bootstrap", "--show-residuals", "--interpolation", "linear"])
        .args(["--tenors", "1,5,30", "--file"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["interpolation"]["method"], "linear");
    assert_eq!(json["pillars"].as_array().unwrap().len(), 8);
    assert_eq!(json["curve"].as_array().unwrap().len(), 3);
    assert_eq!(json["repricing"]["checks"].as_array().unwrap().len(), 8);

    // Flat beyond the last pillar.
    let last = json["pillars"][7]["zero_rate"].as_f64().unwrap();
    let at_30 = json["curve"][2]["zero_rate"].as_f64().unwrap();
    assert!((last - at_30).abs() < 1e-12);
}

#[test]
fn test_bootstrap_with_config_file() {
    let file = write_temp(INSTRUMENTS, ".csv");
    let config = write_temp(
        "[interpolation]\nmethod = \"smith-wilson\"\nultimate_forward_rate = 0.042\nlambda = 0.1\n",
        ".toml",
    );

    let output = zerocurve()
        .args(["-f", "json", "bootstrap", "--file"])
        .arg(file.path())
        .arg("--config")
        .arg(config.path())
        .args(["--ufr", "4.5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["interpolation"]["method"], "smith-wilson");
    let ufr = json["interpolation"]["ultimate_forward_rate"].as_f64().unwrap();
    assert!((ufr - 0.045).abs() < 1e-12);
}

#[test]
fn test_analyze_csv() {
    let file = write_temp(INSTRUMENTS, ".csv");

    zerocurve()
        .args(["--format", "csv", "analyze", "--tenors", "2,7", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "maturity,zero_rate,discount_factor,forward_rate,slope,convexity",
        ))
        .stdout(predicate::str::contains("\n2.0,"))
        .stdout(predicate::str::contains("\n7.0,"));
}

#[test]
fn test_compare_all_methods() {
    let file = write_temp(INSTRUMENTS, ".csv");

    zerocurve()
        .args(["compare", "--tenors", "1,5,40", "--ufr", "4.2", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Linear (%)"))
        .stdout(predicate::str::contains("Smith-Wilson (%)"))
        .stdout(predicate::str::contains("40.00Y"));
}

#[test]
fn test_yield_minimal() {
    zerocurve()
        .args(["--format", "minimal", "yield", "--coupon", "0", "--maturity", "5", "--price", "80"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.045639"));
}

#[test]
fn test_yield_table() {
    zerocurve()
        .args(["yield", "--coupon", "5", "--maturity", "10", "--price", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yield to Maturity"))
        .stdout(predicate::str::contains("5.000000%"));
}

#[test]
fn test_yield_rejects_non_positive_price() {
    zerocurve()
        .args(["yield", "--maturity", "5", "--price", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price must be positive"));
}

#[test]
fn test_bad_row_reports_line() {
    let file = write_temp(
        "kind,maturity,rate,coupon,frequency,price\ndeposit,1,3.0,,,\nfra,2,3.1,,,\n",
        ".csv",
    );

    zerocurve()
        .args(["bootstrap", "--file"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_missing_file() {
    zerocurve()
        .args(["bootstrap", "--file", "/nonexistent/instruments.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn test_invalid_lambda() {
    let file = write_temp(INSTRUMENTS, ".csv");

    zerocurve()
        .args(["bootstrap", "--interpolation", "smith-wilson", "--lambda", "0", "--file"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("lambda"));
}
