//! Binary-level CLI checks.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_required_arguments_fail() {
    Command::cargo_bin("jbundle")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--platform"));
}

#[test]
fn invalid_platform_is_reported() {
    Command::cargo_bin("jbundle")
        .unwrap()
        .args([
            "--platform",
            "win64",
            "--outdir",
            "out",
            "--executable",
            "app",
            "--mainclass",
            "com.example.Main",
            "--classpath",
            "app.jar",
            "--jre",
            "/opt/jdk",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid platform"));
}

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("jbundle")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "platform-specific distributable directory",
        ));
}
