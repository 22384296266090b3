use assert_cmd::Command;
use predicates::prelude::*;

const API_KEY_ENV: &str = "UPGRADE_ADVISOR_API_KEY";

fn advisor() -> Command {
    let mut cmd = Command::cargo_bin("upgrade-advisor-cli").unwrap();
    cmd.env(API_KEY_ENV, "test-key");
    cmd
}

/// Write an executable stand-in for the Snyk CLI into `dir`.
#[cfg(unix)]
fn fake_scanner(dir: &std::path::Path, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-snyk");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn missing_credential_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("upgrade-advisor-cli").unwrap();
    cmd.env_remove(API_KEY_ENV)
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(API_KEY_ENV));
}

#[test]
fn invalid_path_is_fatal() {
    advisor()
        .arg("/definitely/not/a/real/directory")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[cfg(unix)]
#[test]
fn invalid_path_aborts_before_the_scanner_runs() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("scanner-ran");
    let scanner = fake_scanner(
        dir.path(),
        &format!("touch {}\necho '{{}}'", marker.display()),
    );

    advisor()
        .args(["--scanner-bin", scanner.as_str()])
        .arg("/definitely/not/a/real/directory")
        .assert()
        .failure();
    assert!(!marker.exists());
}

#[cfg(unix)]
#[test]
fn empty_scan_prints_both_notices_without_querying() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = fake_scanner(dir.path(), r#"echo '{"vulnerabilities":[]}'"#);

    advisor()
        .args(["--scanner-bin", scanner.as_str()])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No vulnerabilities with direct upgrade paths were found.",
        ))
        .stdout(predicate::str::contains(
            "All found vulnerabilities seem to have a direct upgrade path.",
        ));
}

#[cfg(unix)]
#[test]
fn project_path_can_be_entered_interactively() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = fake_scanner(dir.path(), r#"echo '{"vulnerabilities":[]}'"#);

    advisor()
        .args(["--scanner-bin", scanner.as_str()])
        .write_stdin(format!("{}\n", dir.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("enter the full path"))
        .stdout(predicate::str::contains(
            "All found vulnerabilities seem to have a direct upgrade path.",
        ));
}

#[cfg(unix)]
#[test]
fn findings_json_dumps_classified_sets() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = fake_scanner(
        dir.path(),
        r#"echo '{"vulnerabilities":[{"packageName":"old-lib","title":"Prototype Pollution","severity":"critical"}]}'; exit 1"#,
    );

    // The endpoint points at an unroutable port, so the replacement query
    // fails inline while the findings dump and exit status stay intact.
    let output = advisor()
        .env("UPGRADE_ADVISOR_ENDPOINT", "http://127.0.0.1:9")
        .env("UPGRADE_ADVISOR_TIMEOUT_SECS", "2")
        .env("UPGRADE_ADVISOR_RETRY_DELAY_SECS", "0")
        .args(["--scanner-bin", scanner.as_str(), "--findings-json"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No vulnerabilities with direct upgrade paths were found.",
        ))
        .stdout(predicate::str::contains(
            "AI Suggestions for Package Replacements",
        ))
        .stdout(predicate::str::contains(
            "Could not generate replacement suggestions",
        ))
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').unwrap();
    // The pretty-printed dump is the only top-level object, closed by "\n}".
    let json_end = json_start + stdout[json_start..].find("\n}").unwrap() + 2;
    let value: serde_json::Value = serde_json::from_str(&stdout[json_start..json_end]).unwrap();
    assert_eq!(value["unfixable"][0]["packageName"], "old-lib");
    assert!(value["fixable"].as_array().unwrap().is_empty());
}
