//! CLI correlate integration tests
//!
//! The operator dialogue is scripted through piped stdin.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const FINAL_BLOCKS: &str = r#"{
    "bar": {"name": "Bar", "modid": "bar", "blocks": [
        {"id": "bar_ore", "display_name": "Bar Ore"},
        {"id": "bar_planks", "display_name": null}
    ]},
    "minecraft": {"name": "Minecraft", "modid": "minecraft", "blocks": [
        {"id": "stone", "display_name": "Stone"}
    ]}
}"#;

const MISSING_BLOCKS: &str = r#"[
    {"id": "foo_ore", "display_name": "Foo Ore", "modid": "foo"},
    {"id": "foo_planks", "display_name": "Foo Planks", "modid": "foo"},
    {"id": "foo_glass", "modid": "foo"}
]"#;

fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("final_blocks.json"), FINAL_BLOCKS).unwrap();
    fs::write(temp_dir.path().join("missing_blocks.json"), MISSING_BLOCKS).unwrap();
    temp_dir
}

fn correlate(dir: &TempDir, stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_modbridge"))
        .current_dir(dir.path())
        .args(["correlate", "--base", dir.path().to_str().unwrap()])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn read_json(dir: &TempDir, name: &str) -> serde_json::Value {
    let text = fs::read_to_string(dir.path().join(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_cli_correlate_full_session() {
    // Given: Three missing blocks
    let temp_dir = setup();

    // When: rank 1, manual id after a typo, then rank 1
    let output = correlate(&temp_dir, "1\n-1\nminecraft:stonee\nminecraft:stone\n1\n");

    // Then: The final mapping holds all three in resolution order
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let mapping = read_json(&temp_dir, "correlations_blocks.json");
    assert_eq!(mapping["foo:foo_ore"], "bar:bar_ore");
    assert_eq!(mapping["foo:foo_planks"], "minecraft:stone");
    assert_eq!(mapping.as_object().unwrap().len(), 3);
    assert!(!temp_dir.path().join("replacement_progress_blocks.json").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Processing (3/3): foo:foo_glass (no name)"));
    assert!(stdout.contains("bar:bar_planks (no name)"));
}

#[test]
fn test_cli_correlate_exit_then_resume() {
    let temp_dir = setup();

    // Given: A first run that resolves one element and exits
    let first = correlate(&temp_dir, "1\n-2\n");
    assert!(first.status.success());
    let progress = read_json(&temp_dir, "replacement_progress_blocks.json");
    assert_eq!(progress["mapping"]["foo:foo_ore"], "bar:bar_ore");
    assert_eq!(progress["remaining"].as_array().unwrap().len(), 2);
    assert!(!temp_dir.path().join("correlations_blocks.json").exists());

    // When: A second run continues and resolves the rest
    let second = correlate(&temp_dir, "y\n1\n1\n");

    // Then: The resume prompt reported the saved count and the mapping is complete
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("1 replacements already made"));
    assert!(stdout.contains("Processing (1/2): foo:foo_planks"));
    let mapping = read_json(&temp_dir, "correlations_blocks.json");
    assert_eq!(mapping.as_object().unwrap().len(), 3);
    assert!(!temp_dir.path().join("replacement_progress_blocks.json").exists());
}

#[test]
fn test_cli_correlate_eof_saves_progress() {
    // Given: Input that ends after one decision
    let temp_dir = setup();

    let output = correlate(&temp_dir, "2\n");

    // Then: The run stops cleanly with a checkpoint rather than looping
    assert!(output.status.success());
    let progress = read_json(&temp_dir, "replacement_progress_blocks.json");
    assert_eq!(progress["mapping"].as_object().unwrap().len(), 1);
}

#[test]
fn test_cli_correlate_without_diff_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("final_blocks.json"), FINAL_BLOCKS).unwrap();

    let output = correlate(&temp_dir, "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing_blocks.json"));
}

#[test]
fn test_cli_correlate_items_category_is_independent() {
    // Given: A blocks checkpoint already on disk
    let temp_dir = setup();
    assert!(correlate(&temp_dir, "-2\n").status.success());
    fs::write(
        temp_dir.path().join("final_items.json"),
        r#"{"bar": {"name": "Bar", "modid": "bar", "items": [{"id": "bar_ingot", "display_name": "Bar Ingot"}]}}"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("missing_items.json"),
        r#"[{"id": "foo_ingot", "display_name": "Foo Ingot", "modid": "foo"}]"#,
    )
    .unwrap();

    // When: Items are correlated
    let mut child = Command::new(env!("CARGO_BIN_EXE_modbridge"))
        .current_dir(temp_dir.path())
        .args([
            "correlate",
            "--category",
            "items",
            "--base",
            temp_dir.path().to_str().unwrap(),
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"1\n").unwrap();
    let output = child.wait_with_output().unwrap();

    // Then: No resume prompt appears and the blocks checkpoint is untouched
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("already made"));
    assert_eq!(
        read_json(&temp_dir, "correlations_items.json")["foo:foo_ingot"],
        "bar:bar_ingot"
    );
    assert!(temp_dir.path().join("replacement_progress_blocks.json").exists());
}
