//! Round-trip tests: Markdown → JSON → Markdown → JSON
//!
//! Writing a rendered document back out as Markdown and rendering it again
//! must give the same node tree for the constructs the serializer supports
//! without loss.

use mdjson::format::Format;
use mdjson::formats::markdown::MarkdownFormat;
use mdjson::{Document, FormatRegistry};

fn reparse(md: &str) -> (Document, Document) {
    let format = MarkdownFormat::default();
    let first = format.parse(md).expect("Should parse markdown");
    let written = format.serialize(&first).expect("Should serialize markdown");
    let second = format
        .parse(&written)
        .unwrap_or_else(|e| panic!("Should reparse written markdown:\n{written}\n{e}"));
    (first, second)
}

#[test]
fn test_inline_formatting_round_trip() {
    let (first, second) = reparse("Some *soft* and **bold** words with `code` and a [link](https://example.com).\n");
    assert_eq!(first, second);
}

#[test]
fn test_block_structure_round_trip() {
    let md = "# Title\n\n> quoted\n\n- one\n- two\n\n3. three\n4. four\n\n```rust\nlet x = 1;\n```\n\n---\n";
    let (first, second) = reparse(md);
    assert_eq!(first, second);
    assert_eq!(first.content.len(), 6);
}

#[test]
fn test_loose_list_round_trip() {
    let (first, second) = reparse("- one\n\n- two\n");
    assert_eq!(first, second);
}

#[test]
fn test_json_text_round_trip() {
    let registry = FormatRegistry::default();
    let doc = registry
        .parse("## Notes\n\nLine one  \nline two\n", "markdown")
        .unwrap();

    let json = registry.serialize(&doc, "json").unwrap();
    let back = registry.parse(&json, "json").unwrap();

    assert_eq!(doc, back);
}

#[test]
fn test_spaces_in_link_destination_come_back_encoded() {
    let (first, second) = reparse("[l](<a b> \"t\")\n");
    let first = serde_json::to_value(&first).unwrap();
    let second = serde_json::to_value(&second).unwrap();

    let link = &first["content"][0]["content"][0];
    assert_eq!(link["href"], "a b");
    assert_eq!(link["title"], "t");

    let link = &second["content"][0]["content"][0];
    assert_eq!(link["href"], "a%20b");
    assert_eq!(link["title"], "t");
}
