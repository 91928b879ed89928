//! Per-kind mapping functions.
//!
//! Each function takes already-rendered children (or raw text) plus the token's
//! attributes and returns one [`Node`]. They hold no state, never validate and
//! never fail: whatever they are given ends up in the node as is.

use crate::ir::nodes::{Blank, Content, Element, ListItem, Node};

pub fn paragraph(content: impl Into<Content>) -> Node {
    Element::Paragraph {
        content: content.into(),
    }
    .into()
}

pub fn heading(content: impl Into<Content>, level: u8) -> Node {
    Element::Heading {
        content: content.into(),
        level,
    }
    .into()
}

pub fn emphasis(content: impl Into<Content>) -> Node {
    Element::Emphasis {
        content: content.into(),
    }
    .into()
}

pub fn strong(content: impl Into<Content>) -> Node {
    Element::Strong {
        content: content.into(),
    }
    .into()
}

pub fn strikethrough(content: impl Into<Content>) -> Node {
    Element::Strikethrough {
        content: content.into(),
    }
    .into()
}

pub fn block_quote(content: impl Into<Content>) -> Node {
    Element::BlockQuote {
        content: content.into(),
    }
    .into()
}

pub fn codespan(text: impl Into<String>) -> Node {
    Element::CodeSpan {
        content: text.into(),
    }
    .into()
}

/// Fenced or indented code. An empty language tag counts as no tag.
pub fn block_code(text: impl Into<String>, lang: Option<&str>) -> Node {
    Element::Code {
        content: text.into(),
        lang: lang.filter(|lang| !lang.is_empty()).map(str::to_string),
    }
    .into()
}

/// `href` is expected to be sanitized already (see [`crate::common::links`]).
pub fn link(content: impl Into<Content>, href: impl Into<String>, title: Option<&str>) -> Node {
    Element::Link {
        href: href.into(),
        content: content.into(),
        title: title.map(str::to_string),
    }
    .into()
}

/// The URL goes into `content`, the alt text into `alt`.
pub fn image(alt: impl Into<String>, url: impl Into<String>, title: Option<&str>) -> Node {
    Element::Image {
        content: url.into(),
        alt: alt.into(),
        title: title.map(str::to_string),
    }
    .into()
}

/// Ordered lists report an explicit start as `level`; unordered lists drop it.
pub fn list(content: impl Into<Content>, ordered: bool, start: Option<u64>) -> Node {
    let content = content.into();
    if ordered {
        Element::OrderedList {
            content,
            level: start,
        }
        .into()
    } else {
        Element::UnorderedList { content }.into()
    }
}

pub fn list_item(content: impl Into<Content>) -> Node {
    ListItem {
        content: content.into(),
    }
    .into()
}

pub fn thematic_break() -> Node {
    Element::ThematicBreak.into()
}

pub fn linebreak() -> Node {
    Element::LineBreak.into()
}

pub fn blank_line() -> Node {
    Node::Blank(Blank {})
}

pub fn text(text: impl Into<String>) -> Node {
    Element::Text {
        content: text.into(),
    }
    .into()
}

pub fn html(raw: impl Into<String>) -> Node {
    Element::Html {
        content: raw.into(),
    }
    .into()
}
