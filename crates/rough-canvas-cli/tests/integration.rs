//! Integration tests for rough-canvas CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const SHAPES_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <rect id="box" x="10" y="10" width="40" height="30" fill="#cc3300"/>
  <circle cx="70" cy="70" r="20"/>
</svg>
"##;

/// Path to the binary Cargo built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rough-canvas"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

/// A scratch file unique to one test.
fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rough-canvas-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("Failed to write temp file");
    path
}

#[test]
fn line_command_produces_svg() {
    let output = run(&["line", "0", "0", "100", "50", "--seed", "1"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert_eq!(stdout.matches("<path").count(), 2, "One sketchy line is two curves");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn line_command_accepts_negative_coordinates() {
    let output = run(&["line", "-10", "-10", "10", "10", "--seed", "1"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn seeded_output_is_reproducible() {
    let a = run(&["rect", "10", "10", "50", "30", "--fill", "--seed", "42"]);
    let b = run(&["rect", "10", "10", "50", "30", "--fill", "--seed", "42"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);

    let c = run(&["rect", "10", "10", "50", "30", "--fill", "--seed", "43"]);
    assert_ne!(a.stdout, c.stdout);
}

#[test]
fn rect_fill_uses_fill_color_for_hachure() {
    let output = run(&[
        "rect", "0", "0", "40", "40", "--fill", "--seed", "5", "--fill-color", "#3366ff", "--color", "#111111",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stroke=\"#3366ff\""), "hachure group should use the fill colour");
    assert!(stdout.contains("stroke=\"#111111\""), "outline group should use the stroke colour");
}

#[test]
fn fill_command_reads_stdin() {
    let output = run_with_stdin(&["fill", "-", "--seed", "3", "--gap", "4"], SHAPES_SVG);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("viewBox=\"0 0 100 100\""), "Should keep the source viewBox");
    assert!(stdout.contains("stroke=\"#cc3300\""), "Should use the rect's own fill colour");
    assert!(stdout.matches("<path").count() > 10);
}

#[test]
fn fill_command_produces_json() {
    let input = temp_file("shapes.svg", SHAPES_SVG.as_bytes());
    let output = run(&["fill", input.to_str().unwrap(), "-f", "json", "--seed", "3"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let strokes = value["strokes"].as_array().expect("strokes array");
    assert!(!strokes.is_empty());
    for stroke in strokes {
        assert_eq!(stroke["start"].as_array().unwrap().len(), 2);
        assert_eq!(stroke["curves"][0].as_array().unwrap().len(), 6);
    }
}

#[test]
fn fill_command_writes_png_file() {
    let input = temp_file("png-input.svg", SHAPES_SVG.as_bytes());
    let out = std::env::temp_dir().join(format!("rough-canvas-{}-out.png", std::process::id()));
    let output = run(&["fill", input.to_str().unwrap(), "-f", "png", "-o", out.to_str().unwrap(), "--outline"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = std::fs::read(&out).expect("PNG written");
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn fill_command_fails_on_missing_file() {
    let output = run(&["fill", "/nonexistent/shapes.svg"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/shapes.svg"), "error should name the file: {stderr}");
}

#[test]
fn fill_command_fails_without_shapes() {
    let output = run_with_stdin(&["fill", "-"], r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#);
    assert!(!output.status.success());
}

#[test]
fn verbose_fill_logs_progress() {
    let output = run_with_stdin(&["fill", "-", "-v", "--seed", "1"], SHAPES_SVG);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded 2 shapes"), "stderr: {stderr}");
    assert!(stderr.contains("Generated"), "stderr: {stderr}");
}

#[test]
fn config_command_prints_defaults() {
    let output = run(&["config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("roughness: 1"));
    assert!(stdout.contains("hachure_angle: -41"));
    assert!(stdout.contains("hachure_gap: -1"));
}

#[test]
fn config_file_is_overridden_by_flags() {
    let yaml = temp_file("config.yaml", b"roughness: 2.5\nbowing: 0.0\nseed: 9\n");
    let output = run(&["config", "--config", yaml.to_str().unwrap(), "--roughness", "0.5"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("roughness: 0.5"));
    assert!(stdout.contains("bowing: 0.0"));
    assert!(stdout.contains("seed: 9"));
}

#[test]
fn json_config_file_is_accepted() {
    let json = temp_file("config.json", br#"{"hachure_gap": 6.0}"#);
    let output = run(&["config", "--config", json.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("hachure_gap: 6.0"));
}
