use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn status_reports_unreachable_backend() {
    let mut cmd = Command::cargo_bin("chatgto").expect("binary exists");
    cmd.env_remove("CHATGTO_API_URL")
        .arg("--no-color")
        .arg("--api-url")
        .arg("http://127.0.0.1:9")
        .arg("status");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Backend status: unavailable"));
}

#[test]
fn interactive_mode_quits_on_q() {
    let mut cmd = Command::cargo_bin("chatgto").expect("binary exists");
    cmd.env_remove("CHATGTO_USER")
        .arg("--no-color")
        .arg("--api-url")
        .arg("http://127.0.0.1:9")
        .write_stdin("q\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ChatGTO"));
}

#[test]
fn invalid_user_email_fails_startup() {
    let mut cmd = Command::cargo_bin("chatgto").expect("binary exists");
    cmd.arg("--user").arg("nobody").arg("--no-color").write_stdin("q\n");

    cmd.assert().failure();
}
