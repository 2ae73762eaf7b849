//! End-to-end tests driving the compiled `parecer` binary.
//!
//! These cover the offline surface: database initialization, history listing,
//! and input validation. Paths that reach the hosted model are exercised in
//! unit tests against the response parser instead.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn parecer_binary() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("parecer");
    path
}

/// Writes a config pointing at a temp database. The API key variable is one
/// that is never set, so any test that accidentally reaches the upstream
/// client fails fast instead of making a network call.
fn setup() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("parecer.toml");
    let db_path = tmp.path().join("data").join("parecer.sqlite");
    fs::write(
        &config_path,
        format!(
            "[db]\npath = \"{}\"\n\n[upstream]\napi_key_env = \"PARECER_IT_MISSING_KEY\"\n",
            db_path.display()
        ),
    )
    .unwrap();
    (tmp, config_path)
}

#[test]
fn init_creates_the_database_and_is_idempotent() {
    let (tmp, config_path) = setup();

    for _ in 0..2 {
        let output = Command::new(parecer_binary())
            .args(["init", "--config"])
            .arg(&config_path)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(String::from_utf8_lossy(&output.stdout).contains("Database initialized"));
    }

    assert!(tmp.path().join("data").join("parecer.sqlite").exists());
}

#[test]
fn history_on_an_empty_store_reports_no_analyses() {
    let (_tmp, config_path) = setup();

    Command::new(parecer_binary())
        .args(["init", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    let output = Command::new(parecer_binary())
        .args(["history", "nobody@example.com", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .contains("no analyses found for nobody@example.com"));
}

#[test]
fn history_rejects_an_unknown_document_type_filter() {
    let (_tmp, config_path) = setup();

    let output = Command::new(parecer_binary())
        .args([
            "history",
            "ana@example.com",
            "--doc-type",
            "invoice",
            "--config",
        ])
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown document type"));
}

#[test]
fn analyze_requires_a_non_blank_identifier() {
    let (_tmp, config_path) = setup();

    let output = Command::new(parecer_binary())
        .args([
            "analyze",
            "--text",
            "algum texto",
            "--identifier",
            "  ",
            "--config",
        ])
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("identifier"));
}

#[test]
fn analyze_requires_a_file_or_text() {
    let (_tmp, config_path) = setup();

    let output = Command::new(parecer_binary())
        .args(["analyze", "--identifier", "ana@example.com", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("file") || stderr.contains("text"), "{}", stderr);
}

#[test]
fn analyze_fails_fast_when_the_api_key_is_absent() {
    let (_tmp, config_path) = setup();

    let output = Command::new(parecer_binary())
        .args([
            "analyze",
            "--text",
            "Minha formação acadêmica inclui...",
            "--identifier",
            "joao@example.com",
            "--config",
        ])
        .arg(&config_path)
        .env_remove("PARECER_IT_MISSING_KEY")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("PARECER_IT_MISSING_KEY"));
}

#[test]
fn analyze_rejects_an_unreadable_file_before_anything_else() {
    let (tmp, config_path) = setup();

    let output = Command::new(parecer_binary())
        .args(["analyze", "--identifier", "ana@example.com", "--file"])
        .arg(tmp.path().join("missing.docx"))
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read"));
}

#[test]
fn invalid_config_is_rejected_with_context() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("parecer.toml");
    fs::write(
        &config_path,
        "[db]\npath = \"data/parecer.sqlite\"\n[report]\npage_size = \"a5\"\n",
    )
    .unwrap();

    let output = Command::new(parecer_binary())
        .args(["init", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("page size"));
}
