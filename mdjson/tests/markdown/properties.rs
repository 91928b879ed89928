//! Property tests for Markdown → JSON rendering

use mdjson::common::links::UrlPolicy;
use mdjson::{markdown_to_json, render_tokens, Token};
use proptest::prelude::*;
use serde_json::{json, Value};

fn render(md: &str) -> Value {
    Value::Object(markdown_to_json(md, None).expect("Should render markdown"))
}

proptest! {
    #[test]
    fn heading_level_matches_marker(level in 1usize..=6, word in "[a-z]{1,12}") {
        let md = format!("{} {word}", "#".repeat(level));
        let value = render(&md);

        prop_assert_eq!(
            &value["content"],
            &json!([{"type": "h", "content": [{"type": "text", "content": word}], "level": level}])
        );
    }

    #[test]
    fn ordered_list_level_is_start_unless_one(start in 0u64..1_000_000) {
        let md = format!("{start}. item");
        let value = render(&md);
        let list = &value["content"][0];

        prop_assert_eq!(&list["type"], "ol");
        if start == 1 {
            prop_assert!(list.get("level").is_none());
        } else {
            prop_assert_eq!(&list["level"], &json!(start));
        }
    }

    #[test]
    fn plain_words_render_as_single_text_node(words in prop::collection::vec("[a-z]{1,8}", 1..8)) {
        let md = words.join(" ");
        let value = render(&md);

        prop_assert_eq!(
            &value["content"],
            &json!([{"type": "p", "content": [{"type": "text", "content": md}]}])
        );
    }

    #[test]
    fn render_keeps_one_node_per_token(texts in prop::collection::vec(".*", 0..16)) {
        let tokens: Vec<Token> = texts.into_iter().map(Token::Text).collect();
        let nodes = render_tokens(&tokens, &UrlPolicy::default());

        prop_assert_eq!(nodes.len(), tokens.len());
    }
}
