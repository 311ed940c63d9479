use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const TRANSACTIONS: &str = "<businessObjectToFileArea><resObject><TransactionHeader>\
<transactions><transactionId>T1</transactionId><transactionTimestamp>2023-06-01 10:00:00</transactionTimestamp>\
<transactionValue>18</transactionValue><marketingName>ICA Kvantum</marketingName></transactions>\
<transactions><transactionId>T2</transactionId><transactionTimestamp>2024-01-01 00:00:00</transactionTimestamp>\
<transactionValue>10</transactionValue><marketingName>ICA Kvantum</marketingName></transactions>\
</TransactionHeader></resObject></businessObjectToFileArea>";

const LINE_ITEMS: &str = "<businessObjectToFileArea><resObject><LineItems>\
<transactions><quantity>2</quantity><price>20</price><itemDesc>Milk</itemDesc>\
<discountValue>-2</discountValue><transactionId>T1</transactionId></transactions>\
<transactions><quantity>1</quantity><price>10</price><itemDesc>Milk</itemDesc>\
<discountValue>0</discountValue><transactionId>T2</transactionId></transactions>\
</LineItems></resObject></businessObjectToFileArea>";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ica-gdpr-parse"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run ica-gdpr-parse")
}

fn export_dir() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    std::fs::write(tmp.path().join("Butik kvitto.xml"), TRANSACTIONS).unwrap();
    std::fs::write(tmp.path().join("Butik kvittorader.xml"), LINE_ITEMS).unwrap();
    tmp
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn test_default_window_prints_json() {
    let tmp = export_dir();
    let out = run(&[path_arg(tmp.path())]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "{\"from\":\"2023-01-01T00:00:00+01:00\",\"to\":\"2024-01-01T00:00:00+01:00\",\
\"items\":[{\"item\":\"Milk\",\"total_quantity\":2,\"total_price\":20,\
\"total_discount_value\":-2,\"total_discounted_price\":18}]}\n"
    );
}

#[test]
fn test_custom_window_includes_new_year() {
    let tmp = export_dir();
    let out = run(&[path_arg(tmp.path()), "--from", "2024-01-01", "--to", "2024-02-01"]);

    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["items"][0]["item"], "Milk");
    assert_eq!(value["items"][0]["total_quantity"], 1.0);
    assert_eq!(value["items"][0]["total_discounted_price"], 10.0);
}

#[test]
fn test_missing_argument_fails() {
    let out = run(&[]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
}

#[test]
fn test_missing_file_fails_with_name() {
    let tmp = TempDir::new().expect("tempdir");
    let out = run(&[path_arg(tmp.path())]);

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Butik kvitto.xml"));
}

#[test]
fn test_bad_timestamp_fails_without_output() {
    let tmp = export_dir();
    let broken = TRANSACTIONS.replace("2023-06-01 10:00:00", "2023-06-01");
    std::fs::write(tmp.path().join("Butik kvitto.xml"), broken).unwrap();

    let out = run(&[path_arg(tmp.path())]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("calculate totals"));
    assert!(stderr.contains("parse timestamp \"2023-06-01\""));
}
