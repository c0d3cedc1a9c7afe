use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FILING: &str = "<SEC-HEADER>
CENTRAL INDEX KEY: 0000320193
</SEC-HEADER>
<DOCUMENT>
<TYPE>8-K
<FILENAME>form8k.htm
<TEXT>
<p>Quarterly dividend &amp; buyback approved.</p>
</TEXT>
</DOCUMENT>
<DOCUMENT>
<TYPE>ZIP
<TEXT>
PK
</TEXT>
</DOCUMENT>
";

#[allow(deprecated)]
fn fc_clean() -> Command {
    Command::cargo_bin("fc-clean").unwrap()
}

#[test]
fn test_cli_cleans_file_with_summary() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("full-submission.txt");
    fs::write(&input, FILING).unwrap();

    fc_clean()
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaning complete:"))
        .stdout(predicate::str::contains("Original size:"))
        .stdout(predicate::str::contains("Compression:"))
        .stdout(predicate::str::contains("(inline)"));

    let cleaned = fs::read_to_string(tmp.path().join("cleaned.txt")).unwrap();
    assert!(cleaned.contains("Quarterly dividend & buyback approved."));
    assert!(cleaned.contains("DOCUMENT: 8-K"));
    assert!(!cleaned.contains("ZIP"));
}

#[test]
fn test_cli_explicit_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("filing.txt");
    let output = tmp.path().join("out/filing.clean.txt");
    fs::write(&input, FILING).unwrap();

    fc_clean()
        .args(["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .success();
    assert!(output.exists());
    assert!(!tmp.path().join("cleaned.txt").exists());
}

#[test]
fn test_cli_missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    fc_clean()
        .arg("--input")
        .arg(tmp.path().join("absent.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: File not found"));
    assert!(!tmp.path().join("cleaned.txt").exists());
}

#[test]
fn test_cli_json_summary() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("full-submission.txt");
    fs::write(&input, FILING).unwrap();

    let out = fc_clean().arg("--input").arg(&input).arg("--json").output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["delivery"], "inline");
    assert_eq!(value["documents"].as_array().unwrap().len(), 2);
    assert!(value["cleaned_size"].as_u64().unwrap() > 0);
}

#[test]
fn test_cli_config_override() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("full-submission.txt");
    let config = tmp.path().join("config.json");
    fs::write(&input, FILING).unwrap();
    fs::write(&config, r#"{"budget":{"inline_token_threshold":1}}"#).unwrap();

    fc_clean()
        .arg("--input")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("(upload)"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("full-submission.txt");
    let config = tmp.path().join("config.json");
    fs::write(&input, FILING).unwrap();
    fs::write(&config, r#"{"budget":{"chars_per_token":0}}"#).unwrap();

    fc_clean()
        .arg("--input")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

#[test]
fn test_cli_batch_directory() {
    let tmp = TempDir::new().unwrap();
    for accession in ["0001", "0002"] {
        let dir = tmp.path().join("sec-edgar-filings/AAPL/8-K").join(accession);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("full-submission.txt"), FILING).unwrap();
    }

    fc_clean()
        .arg("--input")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cleaned, 0 failed"));
    assert!(tmp.path().join("sec-edgar-filings/AAPL/8-K/0001/cleaned.txt").exists());
    assert!(tmp.path().join("sec-edgar-filings/AAPL/8-K/0002/cleaned.txt").exists());
}

#[test]
fn test_cli_batch_rejects_output() {
    let tmp = TempDir::new().unwrap();
    fc_clean()
        .arg("--input")
        .arg(tmp.path())
        .arg("--output")
        .arg(tmp.path().join("x.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output cannot be used"));
}
