//! Integration tests for the pagewright CLI
//!
//! Runs the built binary and checks the files it writes.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_cli_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagewright"))
        .args(args)
        .output()
        .expect("failed to run pagewright")
}

fn assert_pdf_exists_and_valid(path: &Path) -> Vec<u8> {
    assert!(path.exists(), "PDF file should exist: {}", path.display());
    let content = fs::read(path).expect("Failed to read PDF file");
    assert!(content.starts_with(b"%PDF-"), "File should start with PDF header");
    assert!(content.ends_with(b"%%EOF\n"), "File should end with EOF marker");
    content
}

fn contains(haystack: &[u8], needle: impl AsRef<[u8]>) -> bool {
    let needle = needle.as_ref();
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_cli_create_command() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("create.pdf");

    let output = run_cli_command(&[
        "create",
        "-o",
        output_path.to_str().unwrap(),
        "-t",
        "Hello (World)",
        "--no-compress",
        "--title",
        "Greeting",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "PDF created successfully!");

    let pdf = assert_pdf_exists_and_valid(&output_path);
    assert!(contains(&pdf, "(Hello \\(World\\)) Tj"));
    assert!(contains(&pdf, "/Title (Greeting)"));
    assert!(contains(&pdf, "/BaseFont /Helvetica"));
}

#[test]
fn test_cli_create_with_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("options.json");
    fs::write(
        &config,
        r#"{
            "pdfVersion": "1.4",
            "compress": false,
            "page": { "size": [300, 400], "layout": "landscape" },
            "info": { "Author": "CLI test" },
            "lang": "en-US"
        }"#,
    )
    .unwrap();
    let output_path = dir.path().join("config.pdf");

    let output = run_cli_command(&[
        "create",
        "-o",
        output_path.to_str().unwrap(),
        "-t",
        "configured",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = assert_pdf_exists_and_valid(&output_path);
    assert!(pdf.starts_with(b"%PDF-1.4\n"));
    assert!(contains(&pdf, "/MediaBox [0 0 400 300]"));
    assert!(contains(&pdf, "/Author (CLI test)"));
    assert!(contains(&pdf, "/Lang (en-US)"));
}

#[test]
fn test_cli_create_non_ascii_text() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("accents.pdf");

    let output = run_cli_command(&[
        "create",
        "-o",
        output_path.to_str().unwrap(),
        "-t",
        "café\n日本",
        "--no-compress",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = assert_pdf_exists_and_valid(&output_path);
    assert!(contains(&pdf, b"(caf\xe9) Tj"));
    assert!(contains(&pdf, "(??) Tj"));
    assert!(!contains(&pdf, [0xEFu8, 0xBF, 0xBD]));
    assert!(contains(&pdf, "/Encoding /WinAnsiEncoding"));
}

#[test]
fn test_cli_config_info_dates() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("options.json");
    fs::write(
        &config,
        r#"{
            "compress": false,
            "info": {
                "Title": "2024-01-01T00:00:00Z",
                "ModDate": "2024-01-01T00:00:00Z"
            }
        }"#,
    )
    .unwrap();
    let output_path = dir.path().join("dates.pdf");

    let output = run_cli_command(&[
        "create",
        "-o",
        output_path.to_str().unwrap(),
        "-t",
        "dated",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = assert_pdf_exists_and_valid(&output_path);
    assert!(contains(&pdf, "/Title (2024-01-01T00:00:00Z)"));
    assert!(contains(&pdf, "/ModDate (D:20240101000000Z)"));
}

#[test]
fn test_cli_create_encrypted() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("secret.pdf");

    let output = run_cli_command(&[
        "create",
        "-o",
        output_path.to_str().unwrap(),
        "-t",
        "classified",
        "--no-compress",
        "--pdf-version",
        "1.7ext3",
        "--user-password",
        "open sesame",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = assert_pdf_exists_and_valid(&output_path);
    assert!(contains(&pdf, "/V 5"));
    assert!(contains(&pdf, "/Encrypt "));
    assert!(!contains(&pdf, "classified"));
}

#[test]
fn test_cli_demo_command() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("demo.pdf");

    let output = run_cli_command(&["demo", "-o", output_path.to_str().unwrap(), "--no-compress"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdf = assert_pdf_exists_and_valid(&output_path);
    assert!(contains(&pdf, "/Count 2"));
    assert!(contains(&pdf, "(Page 1 of 2) Tj"));
    assert!(contains(&pdf, "(Page 2 of 2) Tj"));
    assert!(contains(&pdf, "(cover) ["));
    assert!(contains(&pdf, "(details) ["));
}

#[test]
fn test_cli_config_prints_defaults() {
    let output = run_cli_command(&["config"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pdfVersion"], "1.3");
    assert_eq!(json["compress"], true);
    assert_eq!(json["page"]["size"], "LETTER");
}

#[test]
fn test_cli_unknown_page_size_fails() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("bad.pdf");

    let output = run_cli_command(&[
        "create",
        "-o",
        output_path.to_str().unwrap(),
        "-t",
        "x",
        "--size",
        "B42",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown page size"));
}

#[test]
fn test_cli_invalid_pdf_version() {
    let output = run_cli_command(&["create", "-o", "x.pdf", "-t", "x", "--pdf-version", "2.0"]);
    assert!(!output.status.success());
}
