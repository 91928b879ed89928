//! Render pass: token tree → JSON nodes.
//!
//! Children are rendered before their parent's mapping function runs, so each
//! mapping function only ever sees finished nodes. Link and image targets go
//! through the [`UrlPolicy`] first.

use crate::common::links::UrlPolicy;
use crate::common::mapping;
use crate::ir::nodes::Node;
use crate::ir::tokens::Token;

/// Render a token sequence into a realized node sequence.
///
/// Output order matches input order one to one: nothing is dropped, merged or
/// reordered here.
pub fn render_tokens(tokens: &[Token], policy: &UrlPolicy) -> Vec<Node> {
    tokens
        .iter()
        .map(|token| render_token(token, policy))
        .collect()
}

/// Render a single token and everything below it.
pub fn render_token(token: &Token, policy: &UrlPolicy) -> Node {
    match token {
        Token::Paragraph { children } => mapping::paragraph(render_tokens(children, policy)),
        Token::Heading { level, children } => {
            mapping::heading(render_tokens(children, policy), *level)
        }
        Token::Emphasis { children } => mapping::emphasis(render_tokens(children, policy)),
        Token::Strong { children } => mapping::strong(render_tokens(children, policy)),
        Token::Strikethrough { children } => {
            mapping::strikethrough(render_tokens(children, policy))
        }
        Token::BlockQuote { children } => mapping::block_quote(render_tokens(children, policy)),
        Token::CodeSpan { text } => mapping::codespan(text.as_str()),
        Token::BlockCode { text, lang } => mapping::block_code(text.as_str(), lang.as_deref()),
        Token::Link {
            children,
            url,
            title,
        } => mapping::link(
            render_tokens(children, policy),
            policy.safe_url(url),
            title.as_deref(),
        ),
        Token::Image { alt, url, title } => {
            mapping::image(alt.as_str(), policy.safe_url(url), title.as_deref())
        }
        Token::List {
            items,
            ordered,
            start,
        } => mapping::list(render_tokens(items, policy), *ordered, *start),
        Token::ListItem { children } => mapping::list_item(render_tokens(children, policy)),
        Token::ThematicBreak => mapping::thematic_break(),
        Token::LineBreak => mapping::linebreak(),
        Token::BlankLine => mapping::blank_line(),
        Token::Text(text) => mapping::text(text.as_str()),
        Token::Html(raw) => mapping::html(raw.as_str()),
    }
}
