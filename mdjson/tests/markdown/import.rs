//! Import tests for Markdown format (Markdown → JSON)
//!
//! These tests verify that Markdown documents render to the expected JSON
//! node trees, both as exact compact strings and structurally.

use insta::assert_snapshot;
use mdjson::format::Format;
use mdjson::formats::markdown::MarkdownFormat;
use mdjson::{markdown_to_json, Container, FormatRegistry, MarkdownOptions, Node, UrlPolicy};
use serde_json::{json, Value};
use std::path::PathBuf;

fn md_to_json(md: &str) -> String {
    let container = markdown_to_json(md, None).expect("Should render markdown");
    serde_json::to_string(&container).expect("Should serialize container")
}

fn md_to_value(md: &str) -> Value {
    Value::Object(markdown_to_json(md, None).expect("Should render markdown"))
}

fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_heading_snapshot() {
    assert_snapshot!(
        md_to_json("## Install"),
        @r#"{"content":[{"type":"h","content":[{"type":"text","content":"Install"}],"level":2}]}"#
    );
}

#[test]
fn test_emphasis_snapshot() {
    assert_snapshot!(
        md_to_json("Some *text*."),
        @r#"{"content":[{"type":"p","content":[{"type":"text","content":"Some "},{"type":"em","content":[{"type":"text","content":"text"}]},{"type":"text","content":"."}]}]}"#
    );
}

#[test]
fn test_thematic_break_snapshot() {
    assert_snapshot!(md_to_json("***"), @r#"{"content":[{"type":"hr"}]}"#);
}

#[test]
fn test_code_block_snapshot() {
    assert_snapshot!(
        md_to_json("```rust\nfn main() {}\n```"),
        @r#"{"content":[{"type":"code","content":"fn main() {}","lang":"rust"}]}"#
    );
}

#[test]
fn test_indented_code_has_no_lang() {
    let value = md_to_value("    let x = 1;\n");
    assert_eq!(
        value["content"],
        json!([{"type": "code", "content": "let x = 1;"}])
    );
}

#[test]
fn test_codespan_and_strong() {
    let value = md_to_value("Run `cargo` **now**");
    assert_eq!(
        value["content"][0]["content"],
        json!([
            {"type": "text", "content": "Run "},
            {"type": "codespan", "content": "cargo"},
            {"type": "text", "content": " "},
            {"type": "strong", "content": [{"type": "text", "content": "now"}]}
        ])
    );
}

#[test]
fn test_nested_blockquote() {
    let value = md_to_value("> outer\n>\n> > inner");
    assert_eq!(
        value["content"],
        json!([{
            "type": "blockquote",
            "content": [
                {"type": "p", "content": [{"type": "text", "content": "outer"}]},
                {"type": "blockquote", "content": [
                    {"type": "p", "content": [{"type": "text", "content": "inner"}]}
                ]}
            ]
        }])
    );
}

#[test]
fn test_unordered_list_items_have_no_type() {
    let value = md_to_value("- a\n- b");
    assert_eq!(
        value["content"],
        json!([{
            "type": "ul",
            "content": [
                {"content": [{"type": "text", "content": "a"}]},
                {"content": [{"type": "text", "content": "b"}]}
            ]
        }])
    );
}

#[test]
fn test_ordered_list_level_only_when_not_one() {
    let from_one = md_to_value("1. a\n2. b");
    assert_eq!(from_one["content"][0]["type"], "ol");
    assert!(from_one["content"][0].get("level").is_none());

    let from_seven = md_to_value("7. a\n8. b");
    assert_eq!(from_seven["content"][0]["level"], 7);
}

#[test]
fn test_link_without_title_has_no_title_key() {
    let value = md_to_value("[home](https://example.com)");
    let link = &value["content"][0]["content"][0];

    assert_eq!(link["type"], "a");
    assert_eq!(link["href"], "https://example.com");
    assert!(link.get("title").is_none());
}

#[test]
fn test_dangerous_link_is_replaced() {
    let value = md_to_value("[x](javascript:alert(1))");
    assert_eq!(value["content"][0]["content"][0]["href"], "#harmful-link");
}

#[test]
fn test_permissive_policy_keeps_link() {
    let options = MarkdownOptions {
        url_policy: UrlPolicy::permissive(),
        ..MarkdownOptions::default()
    };
    let container =
        mdjson::markdown_to_json_with_options("[x](javascript:void(0))", None, &options).unwrap();
    assert_eq!(
        container["content"][0]["content"][0]["href"],
        "javascript:void(0)"
    );
}

#[test]
fn test_seed_keys_survive() {
    let seed: Container = match json!({"meta": {"title": "X"}, "content": ["stale"]}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };

    let container = markdown_to_json("# Hello", Some(&seed)).unwrap();

    assert_eq!(
        Value::Object(container),
        json!({
            "meta": {"title": "X"},
            "content": [{"type": "h", "content": [{"type": "text", "content": "Hello"}], "level": 1}]
        })
    );
    assert_eq!(seed["content"], json!(["stale"]));
}

#[test]
fn test_kitchen_sink_fixture() {
    let md = read_fixture("kitchen-sink.md");
    let doc = MarkdownFormat::default().parse(&md).expect("Should parse fixture");

    let kinds: Vec<_> = doc.content.iter().map(|n| n.type_name()).collect();
    assert_eq!(
        kinds,
        vec![
            Some("h"),
            Some("p"),
            Some("h"),
            Some("code"),
            Some("blockquote"),
            Some("ol"),
            Some("ul"),
            Some("p"),
            Some("p"),
            Some("hr"),
            Some("html"),
        ]
    );

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["content"][3]["lang"], "sh");
    assert_eq!(value["content"][3]["content"], "cargo install mdjson");
    assert_eq!(value["content"][5]["level"], 3);
    assert_eq!(
        value["content"][7]["content"][0],
        json!({"type": "img", "content": "https://example.com/logo.png", "alt": "logo"})
    );
    assert_eq!(value["content"][8]["content"][1], json!({"type": "br"}));

    let intro = &value["content"][1]["content"];
    assert!(intro
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["type"] == "del"));
    assert!(intro
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["type"] == "a" && n["title"] == "Changes"));
}

#[test]
fn test_registry_parse_then_serialize() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("Hello", "markdown").unwrap();
    let output = registry.serialize(&doc, "json").unwrap();

    assert_eq!(
        output,
        r#"{"content":[{"type":"p","content":[{"type":"text","content":"Hello"}]}]}"#
    );
    assert!(matches!(doc.content[0], Node::Element(_)));
}
