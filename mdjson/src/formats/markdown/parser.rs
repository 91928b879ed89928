//! Markdown parsing (Markdown → JSON document)
//!
//! Pipeline: Markdown string → Comrak AST → Tokens → Nodes → Document
//!
//! Comrak does all the grammar work. This module only walks its AST and
//! translates each node into the closed [`Token`] set the renderer understands.

use super::MarkdownOptions;
use crate::common::render::render_tokens;
use crate::error::FormatError;
use crate::ir::nodes::Document;
use crate::ir::tokens::Token;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse Markdown string to a JSON document (without caller supplied keys)
pub fn parse_from_markdown(source: &str, options: &MarkdownOptions) -> Result<Document, FormatError> {
    let tokens = parse_to_tokens(source, options)?;
    let content = render_tokens(&tokens, &options.url_policy);
    log::debug!(
        "rendered {} top-level nodes from {} bytes of markdown",
        content.len(),
        source.len()
    );
    Ok(Document::new(content))
}

/// Parse Markdown string to the token tree handed to the renderer
pub fn parse_to_tokens(source: &str, options: &MarkdownOptions) -> Result<Vec<Token>, FormatError> {
    let arena = Arena::new();
    let comrak_options = comrak_options(options);
    let root = parse_document(&arena, source, &comrak_options);
    tokens_from_ast(root, options.keep_html)
}

pub(crate) fn comrak_options(options: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.extension.strikethrough = options.strikethrough;
    comrak.extension.autolink = options.autolink;
    comrak.parse.smart = options.smart;
    comrak
}

/// Convert a Comrak document (or any block container) into tokens.
///
/// Exposed for callers that drive comrak themselves. Node kinds without a
/// token counterpart (tables, footnotes, ...) are rejected rather than skipped.
pub fn tokens_from_ast<'a>(
    root: &'a AstNode<'a>,
    keep_html: bool,
) -> Result<Vec<Token>, FormatError> {
    TokenBuilder { keep_html }.block_children(root, false)
}

struct TokenBuilder {
    keep_html: bool,
}

impl TokenBuilder {
    fn block_children<'a>(
        &self,
        node: &'a AstNode<'a>,
        tight: bool,
    ) -> Result<Vec<Token>, FormatError> {
        let mut tokens = Vec::new();
        for child in node.children() {
            self.collect_block(child, tight, &mut tokens)?;
        }
        Ok(tokens)
    }

    /// `tight` is set for the children of items in a tight list; their
    /// paragraphs are unwrapped into bare inline content.
    fn collect_block<'a>(
        &self,
        node: &'a AstNode<'a>,
        tight: bool,
        tokens: &mut Vec<Token>,
    ) -> Result<(), FormatError> {
        let node_data = node.data.borrow();

        match &node_data.value {
            NodeValue::Paragraph => {
                let children = self.inline_children(node)?;
                if tight {
                    tokens.extend(children);
                } else {
                    tokens.push(Token::Paragraph { children });
                }
            }

            NodeValue::Heading(heading) => {
                tokens.push(Token::Heading {
                    level: heading.level,
                    children: self.inline_children(node)?,
                });
            }

            NodeValue::BlockQuote => {
                tokens.push(Token::BlockQuote {
                    children: self.block_children(node, false)?,
                });
            }

            NodeValue::List(list) => {
                let ordered = matches!(list.list_type, ListType::Ordered);
                let start = (ordered && list.start != 1).then_some(list.start as u64);

                let mut items = Vec::new();
                for child in node.children() {
                    self.collect_block(child, list.tight, &mut items)?;
                }

                tokens.push(Token::List {
                    items,
                    ordered,
                    start,
                });
            }

            NodeValue::Item(_) => {
                tokens.push(Token::ListItem {
                    children: self.block_children(node, tight)?,
                });
            }

            NodeValue::CodeBlock(code_block) => {
                let literal = code_block.literal.as_str();
                let text = literal
                    .strip_suffix('\n')
                    .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
                    .unwrap_or(literal);
                // Only the first word of the info string names the language
                let lang = code_block
                    .info
                    .split_whitespace()
                    .next()
                    .map(str::to_string);

                tokens.push(Token::BlockCode {
                    text: text.to_string(),
                    lang,
                });
            }

            NodeValue::HtmlBlock(html) => {
                if self.keep_html {
                    tokens.push(Token::Html(html.literal.clone()));
                }
            }

            NodeValue::ThematicBreak => tokens.push(Token::ThematicBreak),

            other => return Err(FormatError::UnsupportedNode(node_kind(other).to_string())),
        }

        Ok(())
    }

    fn inline_children<'a>(&self, node: &'a AstNode<'a>) -> Result<Vec<Token>, FormatError> {
        let mut tokens = Vec::new();
        for child in node.children() {
            self.collect_inline(child, &mut tokens)?;
        }
        Ok(tokens)
    }

    fn collect_inline<'a>(
        &self,
        node: &'a AstNode<'a>,
        tokens: &mut Vec<Token>,
    ) -> Result<(), FormatError> {
        let node_data = node.data.borrow();

        match &node_data.value {
            NodeValue::Text(text) => push_text(tokens, text),

            NodeValue::SoftBreak => push_text(tokens, "\n"),

            NodeValue::LineBreak => tokens.push(Token::LineBreak),

            NodeValue::Code(code) => tokens.push(Token::CodeSpan {
                text: code.literal.clone(),
            }),

            NodeValue::Emph => tokens.push(Token::Emphasis {
                children: self.inline_children(node)?,
            }),

            NodeValue::Strong => tokens.push(Token::Strong {
                children: self.inline_children(node)?,
            }),

            NodeValue::Strikethrough => tokens.push(Token::Strikethrough {
                children: self.inline_children(node)?,
            }),

            NodeValue::Link(link) => tokens.push(Token::Link {
                children: self.inline_children(node)?,
                url: link.url.clone(),
                title: non_empty(&link.title),
            }),

            NodeValue::Image(link) => tokens.push(Token::Image {
                alt: collect_text_from_children(node),
                url: link.url.clone(),
                title: non_empty(&link.title),
            }),

            NodeValue::HtmlInline(raw) => {
                if self.keep_html {
                    tokens.push(Token::Html(raw.clone()));
                }
            }

            other => return Err(FormatError::UnsupportedNode(node_kind(other).to_string())),
        }

        Ok(())
    }
}

/// Append text, merging with a directly preceding text token.
fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Text(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// Stable name for a comrak node kind that has no token counterpart
fn node_kind(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::Table(..) => "table",
        NodeValue::TableRow(..) => "table_row",
        NodeValue::TableCell => "table_cell",
        NodeValue::FootnoteDefinition(..) => "footnote_definition",
        NodeValue::FootnoteReference(..) => "footnote_reference",
        NodeValue::FrontMatter(..) => "frontmatter",
        NodeValue::TaskItem(..) => "tasklist",
        NodeValue::DescriptionList => "description_list",
        NodeValue::Superscript => "superscript",
        _ => "unsupported",
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Collect text content from a node (image alt text is plain text)
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

fn collect_text_from_children<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        collect_text_content(child, &mut text);
    }
    text
}
