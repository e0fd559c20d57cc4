//! End-to-end tests for the `hypergen` binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

/// Path to the hypergen binary
fn hypergen_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hypergen")
}

#[test]
fn test_generate_writes_parseable_json() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("karabiner.json");

    let output = Command::new(hypergen_bin())
        .args(["generate", "--out", out.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Generation should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(out.exists(), "output file should be created");

    let content = fs::read_to_string(&out).unwrap();
    let document: serde_json::Value = serde_json::from_str(&content).unwrap();

    let profiles = document["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["name"], "Default");

    let rules = profiles[0]["complex_modifications"]["rules"]
        .as_array()
        .unwrap();
    assert!(!rules.is_empty());
    assert_eq!(rules[0]["description"], "Hyper Key (⌃⌥⇧⌘)");
    assert_eq!(
        rules[rules.len() - 1]["description"],
        "Vim mode - disable unused keys"
    );
}

#[test]
fn test_generate_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.json");
    let second = temp.path().join("second.json");

    for out in [&first, &second] {
        let output = Command::new(hypergen_bin())
            .args(["generate", "--out", out.to_str().unwrap()])
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(0));
    }

    let first_bytes = fs::read(&first).unwrap();
    let second_bytes = fs::read(&second).unwrap();
    assert_eq!(first_bytes, second_bytes, "runs must be byte-identical");
}

#[test]
fn test_generate_stdout_prints_json_and_writes_nothing() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(hypergen_bin())
        .current_dir(temp.path())
        .args(["generate", "--stdout"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(!temp.path().join("karabiner.json").exists());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let document: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(document["profiles"].is_array());
}

#[test]
fn test_generate_default_output_file_name() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(hypergen_bin())
        .current_dir(temp.path())
        .arg("generate")
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp.path().join("karabiner.json").exists());
}

#[test]
fn test_generate_with_overrides_extends_launcher() {
    let temp = TempDir::new().unwrap();
    let overrides = temp.path().join("overrides.toml");
    fs::write(
        &overrides,
        "[o.z]\ntype = \"app\"\nname = \"Zed\"\n\n[r.q]\ntype = \"deeplink\"\nurl = \"raycast://confetti\"\n",
    )
    .unwrap();
    let out = temp.path().join("karabiner.json");

    let output = Command::new(hypergen_bin())
        .args([
            "generate",
            "--out",
            out.to_str().unwrap(),
            "--overrides",
            overrides.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("open -a 'Zed.app'"));
    assert!(content.contains("raycast://confetti"));
}

#[test]
fn test_generate_missing_overrides_file_fails_with_io_code() {
    let output = Command::new(hypergen_bin())
        .args(["generate", "--stdout", "--overrides", "/no/such/file.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
}

#[test]
fn test_generate_custom_profile_name() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("karabiner.json");

    let output = Command::new(hypergen_bin())
        .args([
            "generate",
            "--out",
            out.to_str().unwrap(),
            "--profile",
            "Laptop",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(document["profiles"][0]["name"], "Laptop");
}

#[test]
fn test_bare_invocation_generates_with_defaults() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(hypergen_bin())
        .current_dir(temp.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp.path().join("karabiner.json").exists());
}

#[test]
fn test_check_passes_on_builtin_rules() {
    let output = Command::new(hypergen_bin())
        .arg("check")
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validation passed"), "stdout: {stdout}");
}

#[test]
fn test_check_missing_overrides_file_fails() {
    let output = Command::new(hypergen_bin())
        .args(["check", "--overrides", "/no/such/file.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
