use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn docqa() -> Command {
    let mut cmd = Command::cargo_bin("docqa").unwrap();
    cmd.env_remove("GOOGLE_API_KEY")
        .env_remove("DOCQA_API_BASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    docqa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ask questions about a PDF"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_ask_help_lists_sources_flag() {
    docqa()
        .args(["ask", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--sources"));
}

#[test]
fn test_ask_without_api_key_fails() {
    let dir = tempdir().unwrap();

    docqa()
        .current_dir(dir.path())
        .args(["ask", "What is GOT?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error initializing components"))
        .stderr(predicate::str::contains("GOOGLE_API_KEY"))
        .stderr(predicate::str::contains("Please check your API keys"));
}

#[test]
fn test_init_failure_is_reported_once() {
    let dir = tempdir().unwrap();

    docqa()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing API key").count(1))
        .stderr(predicate::str::contains("Error: ").not());
}

#[test]
fn test_missing_document_fails() {
    let dir = tempdir().unwrap();

    docqa()
        .current_dir(dir.path())
        .env("GOOGLE_API_KEY", "test-key")
        .env("DOCQA_API_BASE", "http://127.0.0.1:9")
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found"))
        .stderr(predicate::str::contains("GOT-OCR-2.0-paper.pdf"));
}

#[test]
fn test_chat_without_api_key_reads_no_input() {
    let dir = tempdir().unwrap();

    docqa()
        .current_dir(dir.path())
        .write_stdin("What is GOT?\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Say something").not());
}
