//! Markdown serialization (JSON document → Markdown)
//!
//! Pipeline: Document → Comrak AST → Markdown string
//!
//! This is the inverse of the parser. It exists so that rendered documents can
//! be written back out, and so the node schema can be checked by rendering the
//! written markdown again. Caller supplied container keys have no markdown
//! equivalent and are not written.

use crate::error::FormatError;
use crate::ir::nodes::{Content, Document, Element, Node};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeHtmlBlock,
    NodeLink, NodeList, NodeValue,
};
use comrak::{format_commonmark, Arena, ComrakOptions};
use std::cell::RefCell;

/// Serialize a JSON document to Markdown
pub fn serialize_to_markdown(doc: &Document) -> Result<String, FormatError> {
    let arena = Arena::new();
    let root = alloc(&arena, NodeValue::Document);
    append_blocks(&arena, root, &doc.content)?;

    let mut output = Vec::new();
    let options = default_comrak_options();
    format_commonmark(root, &options, &mut output).map_err(|e| {
        FormatError::SerializationError(format!("Comrak serialization failed: {e}"))
    })?;

    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

    // Remove Comrak's "end list" HTML comments which appear between consecutive lists
    Ok(markdown.replace("<!-- end list -->\n\n", ""))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    // Raw html nodes are written back verbatim
    options.render.unsafe_ = true;
    options
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn is_inline(node: &Node) -> bool {
    matches!(node, Node::Element(element) if element.is_inline())
}

/// Append block-level nodes, wrapping runs of inline nodes in a paragraph.
fn append_blocks<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    nodes: &[Node],
) -> Result<(), FormatError> {
    let mut paragraph: Option<&'a AstNode<'a>> = None;

    for node in nodes {
        if is_inline(node) {
            let target = match paragraph {
                Some(existing) => existing,
                None => {
                    let created = alloc(arena, NodeValue::Paragraph);
                    parent.append(created);
                    paragraph = Some(created);
                    created
                }
            };
            append_inline(arena, target, node)?;
            continue;
        }

        paragraph = None;
        match node {
            Node::Element(element) => append_block(arena, parent, element)?,
            Node::Item(item) => append_block_content(arena, parent, &item.content)?,
            Node::Blank(_) => {}
        }
    }

    Ok(())
}

fn append_block_content<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    content: &Content,
) -> Result<(), FormatError> {
    match content {
        Content::Text(text) => {
            if !text.is_empty() {
                let paragraph = alloc(arena, NodeValue::Paragraph);
                parent.append(paragraph);
                paragraph.append(alloc(arena, NodeValue::Text(text.clone())));
            }
            Ok(())
        }
        Content::Nodes(nodes) => append_blocks(arena, parent, nodes),
    }
}

fn append_block<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    element: &Element,
) -> Result<(), FormatError> {
    match element {
        Element::Paragraph { content } => {
            let paragraph = alloc(arena, NodeValue::Paragraph);
            parent.append(paragraph);
            append_inline_content(arena, paragraph, content)?;
        }

        Element::Heading { content, level } => {
            let heading = alloc(
                arena,
                NodeValue::Heading(NodeHeading {
                    level: (*level).clamp(1, 6),
                    setext: false,
                }),
            );
            parent.append(heading);
            append_inline_content(arena, heading, content)?;
        }

        Element::BlockQuote { content } => {
            let quote = alloc(arena, NodeValue::BlockQuote);
            parent.append(quote);
            append_block_content(arena, quote, content)?;
        }

        Element::Code { content, lang } => {
            let mut literal = content.clone();
            literal.push('\n');
            parent.append(alloc(
                arena,
                NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: lang.clone().unwrap_or_default(),
                    literal,
                }),
            ));
        }

        Element::OrderedList { content, level } => {
            let start = level.map_or(1, |start| start as usize);
            append_list(arena, parent, content, ListType::Ordered, start)?;
        }

        Element::UnorderedList { content } => {
            append_list(arena, parent, content, ListType::Bullet, 1)?;
        }

        Element::ThematicBreak => parent.append(alloc(arena, NodeValue::ThematicBreak)),

        Element::Html { content } => {
            parent.append(alloc(
                arena,
                NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal: content.clone(),
                }),
            ));
        }

        Element::Emphasis { .. }
        | Element::Strong { .. }
        | Element::Strikethrough { .. }
        | Element::CodeSpan { .. }
        | Element::Link { .. }
        | Element::Image { .. }
        | Element::LineBreak
        | Element::Text { .. } => {
            let paragraph = alloc(arena, NodeValue::Paragraph);
            parent.append(paragraph);
            append_inline(arena, paragraph, &Node::Element(element.clone()))?;
        }
    }

    Ok(())
}

fn append_list<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    content: &Content,
    list_type: ListType,
    start: usize,
) -> Result<(), FormatError> {
    let items: Vec<Content> = match content {
        Content::Text(text) => vec![Content::Text(text.clone())],
        Content::Nodes(nodes) => nodes
            .iter()
            .filter(|node| !matches!(node, Node::Blank(_)))
            .map(|node| match node {
                Node::Item(item) => item.content.clone(),
                other => Content::Nodes(vec![other.clone()]),
            })
            .collect(),
    };

    // Loose lists are the ones whose items hold explicit paragraphs
    let tight = !items.iter().any(|item| {
        item.as_nodes().is_some_and(|nodes| {
            nodes
                .iter()
                .any(|node| matches!(node, Node::Element(Element::Paragraph { .. })))
        })
    });

    let list_node = NodeList {
        list_type,
        marker_offset: 0,
        padding: 0,
        start,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight,
    };

    let list = alloc(arena, NodeValue::List(list_node));
    parent.append(list);

    for item_content in &items {
        let item = alloc(arena, NodeValue::Item(list_node));
        list.append(item);
        append_block_content(arena, item, item_content)?;
    }

    Ok(())
}

fn append_inline_content<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    content: &Content,
) -> Result<(), FormatError> {
    match content {
        Content::Text(text) => {
            parent.append(alloc(arena, NodeValue::Text(text.clone())));
            Ok(())
        }
        Content::Nodes(nodes) => {
            for node in nodes {
                append_inline(arena, parent, node)?;
            }
            Ok(())
        }
    }
}

/// Add inline content to a comrak node
fn append_inline<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    node: &Node,
) -> Result<(), FormatError> {
    let element = match node {
        Node::Element(element) => element,
        Node::Blank(_) => return Ok(()),
        Node::Item(_) => {
            return Err(FormatError::SerializationError(
                "list item found inside inline content".to_string(),
            ))
        }
    };

    match element {
        Element::Text { content } => {
            parent.append(alloc(arena, NodeValue::Text(content.clone())));
        }

        Element::Emphasis { content } => {
            let emph = alloc(arena, NodeValue::Emph);
            parent.append(emph);
            append_inline_content(arena, emph, content)?;
        }

        Element::Strong { content } => {
            let strong = alloc(arena, NodeValue::Strong);
            parent.append(strong);
            append_inline_content(arena, strong, content)?;
        }

        Element::Strikethrough { content } => {
            let del = alloc(arena, NodeValue::Strikethrough);
            parent.append(del);
            append_inline_content(arena, del, content)?;
        }

        Element::CodeSpan { content } => {
            parent.append(alloc(
                arena,
                NodeValue::Code(NodeCode {
                    num_backticks: 1,
                    literal: content.clone(),
                }),
            ));
        }

        Element::Link {
            href,
            content,
            title,
        } => {
            let link = alloc(
                arena,
                NodeValue::Link(NodeLink {
                    url: href.clone(),
                    title: title.clone().unwrap_or_default(),
                }),
            );
            parent.append(link);
            append_inline_content(arena, link, content)?;
        }

        Element::Image {
            content,
            alt,
            title,
        } => {
            let image = alloc(
                arena,
                NodeValue::Image(NodeLink {
                    url: content.clone(),
                    title: title.clone().unwrap_or_default(),
                }),
            );
            parent.append(image);
            image.append(alloc(arena, NodeValue::Text(alt.clone())));
        }

        Element::LineBreak => parent.append(alloc(arena, NodeValue::LineBreak)),

        Element::Html { content } => {
            parent.append(alloc(arena, NodeValue::HtmlInline(content.clone())));
        }

        block => {
            return Err(FormatError::SerializationError(format!(
                "block node '{}' found inside inline content",
                block.type_name()
            )))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::mapping;
    use crate::formats::markdown::{parser, MarkdownOptions};
    use crate::ir::tokens::Token;
    use comrak::parse_document;

    #[test]
    fn test_paragraph_round_trips_through_comrak() {
        let doc = Document::new(vec![mapping::paragraph(vec![
            mapping::text("Some "),
            mapping::emphasis(vec![mapping::text("text")]),
            mapping::text("."),
        ])]);

        let md = serialize_to_markdown(&doc).unwrap();
        assert_eq!(md.trim_end(), "Some *text*.");
    }

    #[test]
    fn test_heading_ast() {
        let doc = Document::new(vec![mapping::heading(vec![mapping::text("Intro")], 2)]);
        let md = serialize_to_markdown(&doc).unwrap();

        let arena = Arena::new();
        let root = parse_document(&arena, &md, &ComrakOptions::default());

        let mut found_heading = false;
        for child in root.children() {
            if let NodeValue::Heading(ref heading) = child.data.borrow().value {
                assert_eq!(heading.level, 2);
                found_heading = true;
            }
        }
        assert!(found_heading, "Should have a heading node");
    }

    #[test]
    fn test_ordered_list_start_is_written() {
        let doc = Document::new(vec![mapping::list(
            vec![
                mapping::list_item(vec![mapping::text("three")]),
                mapping::list_item(vec![mapping::text("four")]),
            ],
            true,
            Some(3),
        )]);

        let md = serialize_to_markdown(&doc).unwrap();
        let reparsed = parser::parse_to_tokens(&md, &MarkdownOptions::default()).unwrap();
        assert!(
            matches!(
                reparsed.as_slice(),
                [Token::List { ordered: true, start: Some(3), items }] if items.len() == 2
            ),
            "unexpected markdown: {md:?}"
        );
    }

    #[test]
    fn test_string_content_is_accepted() {
        let doc = Document::new(vec![
            mapping::block_quote("quoted"),
            mapping::list("only item", false, None),
        ]);

        let md = serialize_to_markdown(&doc).unwrap();
        assert!(md.contains("> quoted"));
        assert!(md.contains("- only item"));
    }

    #[test]
    fn test_block_inside_inline_is_rejected() {
        let doc = Document::new(vec![mapping::paragraph(vec![mapping::heading(
            "nested", 1,
        )])]);

        assert!(matches!(
            serialize_to_markdown(&doc),
            Err(FormatError::SerializationError(_))
        ));
    }
}
