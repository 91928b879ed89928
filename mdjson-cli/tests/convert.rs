use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("mdjson")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout to be JSON")
}

#[test]
fn renders_markdown_file_to_json() {
    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg(fixture_path("kitchen-sink.md"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let value = stdout_json(&output);

    assert_eq!(
        value["content"][0],
        json!({"type": "h", "content": [{"type": "text", "content": "Release notes"}], "level": 1})
    );
    assert_eq!(value["content"][3]["lang"], "sh");
}

#[test]
fn explicit_convert_subcommand() {
    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("convert")
        .arg(fixture_path("kitchen-sink.md"))
        .arg("--to")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"content":[{"type":"h""#));
}

#[test]
fn reads_markdown_from_stdin() {
    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("-").write_stdin("---\n");

    cmd.assert()
        .success()
        .stdout("{\"content\":[{\"type\":\"hr\"}]}\n");
}

#[test]
fn pretty_extra_indents_output() {
    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("-").arg("--extra-pretty").write_stdin("---\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\n  \"content\": [\n"));
}

#[test]
fn seed_keys_are_kept() {
    let dir = tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, r#"{"meta":{"title":"X"}}"#).unwrap();

    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("-")
        .arg("--seed")
        .arg(seed_path.as_os_str())
        .write_stdin("# Hello");

    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(
        stdout_json(&output),
        json!({
            "meta": {"title": "X"},
            "content": [{"type": "h", "content": [{"type": "text", "content": "Hello"}], "level": 1}]
        })
    );
}

#[test]
fn seed_must_be_an_object() {
    let dir = tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, "[1, 2]").unwrap();

    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("-")
        .arg("--seed")
        .arg(seed_path.as_os_str())
        .write_stdin("# Hello");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must contain a JSON object"));
}

#[test]
fn writes_output_file() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("out.json");

    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("-")
        .arg("-o")
        .arg(output_path.as_os_str())
        .write_stdin("Hello");

    cmd.assert().success().stdout("");
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        r#"{"content":[{"type":"p","content":[{"type":"text","content":"Hello"}]}]}"#
    );
}

#[test]
fn json_converts_back_to_markdown() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(
        &input_path,
        r#"{"content":[{"type":"h","content":[{"type":"text","content":"Hello"}],"level":2}]}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("markdown");

    cmd.assert().success().stdout("## Hello\n");
}

#[test]
fn unknown_extension_needs_from() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.txt");
    fs::write(&input_path, "Hello").unwrap();

    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg(input_path.as_os_str());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect format"));
}

#[test]
fn tables_render_as_plain_paragraphs() {
    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("-")
        .arg("--from")
        .arg("markdown")
        .write_stdin("| a |\n|---|\n| b |\n");

    // Without the table extension the pipes are just text
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"content":[{"type":"p""#));
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("mdjson");
    cmd.arg("--list-formats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("json").and(predicate::str::contains("markdown")));
}
