//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("article-share")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .args(["--context", "worth a read", &get_fixture_path("semantic_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Understanding Async Rust"))
        .stdout(predicate::str::contains("Key points:"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("short_paragraphs.html")).unwrap();
    cmd()
        .args(["-", "--context", "quick update"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("• Deploys are now gated on the integration suite."));
}

#[test]
fn test_cli_audience_intro() {
    cmd()
        .args(["-c", "for the sprint review", "-a", "technical-team"])
        .arg(get_fixture_path("semantic_article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I wanted to share this technical article that could be valuable for our work. for the sprint review",
        ));
}

#[test]
fn test_cli_custom_audience() {
    cmd()
        .args(["-c", "you asked about this", "-a", "my book club"])
        .arg(get_fixture_path("semantic_article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm sharing this because: you asked about this"));
}

#[test]
fn test_cli_share_text_without_known_url_starts_blank() {
    cmd()
        .args(["-c", "worth a read", &get_fixture_path("semantic_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\n\nUnderstanding Async Rust"));
}

#[test]
fn test_cli_share_text_uses_canonical_url() {
    cmd()
        .args(["-c", "worth a read", &get_fixture_path("json_ld_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("https://blog.example.com/compilers\n\n"));
}

#[test]
fn test_cli_no_url() {
    cmd()
        .args(["-c", "worth a read", "--no-url", &get_fixture_path("json_ld_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("A Short History of Compilers\n\n"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-f", "json", "-c", "worth a read", &get_fixture_path("json_ld_article.html")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["article"]["author"], "Grace Hopper");
    assert!(json["summary"].as_str().unwrap().contains("Key points:"));
    assert!(json["share_text"].as_str().unwrap().starts_with("https://blog.example.com/compilers"));
}

#[test]
fn test_cli_extract_only_text() {
    cmd()
        .args(["--extract-only", &get_fixture_path("dense_parent.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field Report\n============"))
        .stdout(predicate::str::contains("By Mira Okafor • June 18, 2024"))
        .stdout(predicate::str::contains("Key points:").not());
}

#[test]
fn test_cli_extract_only_json() {
    let output = cmd()
        .args(["--extract-only", "-f", "json", &get_fixture_path("dense_parent.html")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Field Report");
    assert_eq!(json["author"], "Mira Okafor");
}

#[test]
fn test_cli_document_bullet_order() {
    cmd()
        .args(["-c", "worth a read", "--bullet-order", "document"])
        .arg(get_fixture_path("semantic_article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("• Understanding Async Rust"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("share.txt");

    cmd()
        .args(["-c", "worth a read", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("semantic_article.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Key points:"));
}

#[test]
fn test_cli_verbose_goes_to_stderr() {
    cmd()
        .args(["-v", "-c", "worth a read", &get_fixture_path("semantic_article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Extracting article"))
        .stdout(predicate::str::contains("Extracting article").not());
}

#[test]
fn test_cli_empty_page_fails() {
    cmd()
        .args(["-c", "worth a read", &get_fixture_path("empty_content.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No readable content"));
}

#[test]
fn test_cli_short_context_fails() {
    cmd()
        .args(["-c", "ok", &get_fixture_path("semantic_article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 3 characters"));
}

#[test]
fn test_cli_blank_audience_fails() {
    cmd()
        .args(["-c", "worth a read", "--audience", "   ", &get_fixture_path("semantic_article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid audience"));
}

#[test]
fn test_cli_audience_is_trimmed() {
    cmd()
        .args(["-c", "for the sprint review", "-a", "  technical-team  "])
        .arg(get_fixture_path("semantic_article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("I wanted to share this technical article"));
}

#[test]
fn test_cli_missing_context() {
    cmd()
        .arg(get_fixture_path("semantic_article.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--context"));
}

#[test]
fn test_cli_missing_file() {
    cmd()
        .args(["-c", "worth a read", "/nonexistent/page.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "yaml", "-c", "worth a read", &get_fixture_path("semantic_article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("article-share"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--context"))
        .stdout(predicate::str::contains("--audience"));
}
