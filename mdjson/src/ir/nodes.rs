//! JSON node types produced by the renderer.
//!
//! The serialized shape is the public contract of this crate:
//!
//! | Node            | JSON                                          |
//! |-----------------|-----------------------------------------------|
//! | paragraph       | `{"type":"p","content":…}`                    |
//! | heading         | `{"type":"h","content":…,"level":n}`          |
//! | emphasis        | `{"type":"em","content":…}`                   |
//! | strong          | `{"type":"strong","content":…}`               |
//! | strikethrough   | `{"type":"del","content":…}`                  |
//! | block quote     | `{"type":"blockquote","content":…}`           |
//! | code span       | `{"type":"codespan","content":"…"}`           |
//! | code block      | `{"type":"code","content":"…","lang"?:"…"}`   |
//! | link            | `{"type":"a","href":"…","content":…,"title"?}`|
//! | image           | `{"type":"img","content":url,"alt":"…","title"?}` |
//! | ordered list    | `{"type":"ol","content":[…],"level"?:n}`      |
//! | unordered list  | `{"type":"ul","content":[…]}`                 |
//! | list item       | `{"content":…}`                               |
//! | thematic break  | `{"type":"hr"}`                               |
//! | line break      | `{"type":"br"}`                               |
//! | blank line      | `{}`                                          |
//! | text            | `{"type":"text","content":"…"}`               |
//! | html            | `{"type":"html","content":"…"}`               |
//!
//! Optional fields are omitted when absent, never written as `null`.
//!
//! The ordered-list `level` field carries the list's explicit start number.
//! The name is kept for compatibility with existing consumers even though it
//! reads like the heading `level`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which rendered nodes are stored in the output container.
pub const CONTENT_KEY: &str = "content";

/// Top-level output container: caller supplied keys plus rendered content.
pub type Container = Map<String, Value>;

/// One rendered markdown node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Item(ListItem),
    Blank(Blank),
}

/// Nodes that carry a `"type"` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "p")]
    Paragraph { content: Content },
    #[serde(rename = "h")]
    Heading { content: Content, level: u8 },
    #[serde(rename = "em")]
    Emphasis { content: Content },
    #[serde(rename = "strong")]
    Strong { content: Content },
    #[serde(rename = "del")]
    Strikethrough { content: Content },
    #[serde(rename = "blockquote")]
    BlockQuote { content: Content },
    #[serde(rename = "codespan")]
    CodeSpan { content: String },
    #[serde(rename = "code")]
    Code {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    #[serde(rename = "a")]
    Link {
        href: String,
        content: Content,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    #[serde(rename = "img")]
    Image {
        /// Image URL.
        content: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    #[serde(rename = "ol")]
    OrderedList {
        content: Content,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u64>,
    },
    #[serde(rename = "ul")]
    UnorderedList { content: Content },
    #[serde(rename = "hr")]
    ThematicBreak,
    #[serde(rename = "br")]
    LineBreak,
    #[serde(rename = "text")]
    Text { content: String },
    #[serde(rename = "html")]
    Html { content: String },
}

/// A list item. Deliberately has no `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListItem {
    pub content: Content,
}

/// Placeholder emitted for blank lines; serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blank {}

/// Value of a node's `content` field.
///
/// Rendered children are always [`Content::Nodes`]. Raw text kinds (code,
/// code spans, text) and callers that map tokens by hand use [`Content::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Nodes(Vec<Node>),
}

impl Content {
    pub fn as_nodes(&self) -> Option<&[Node]> {
        match self {
            Content::Text(_) => None,
            Content::Nodes(nodes) => Some(nodes),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Vec<Node>> for Content {
    fn from(nodes: Vec<Node>) -> Self {
        Content::Nodes(nodes)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<ListItem> for Node {
    fn from(item: ListItem) -> Self {
        Node::Item(item)
    }
}

impl Element {
    /// The serialized `"type"` value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::Paragraph { .. } => "p",
            Element::Heading { .. } => "h",
            Element::Emphasis { .. } => "em",
            Element::Strong { .. } => "strong",
            Element::Strikethrough { .. } => "del",
            Element::BlockQuote { .. } => "blockquote",
            Element::CodeSpan { .. } => "codespan",
            Element::Code { .. } => "code",
            Element::Link { .. } => "a",
            Element::Image { .. } => "img",
            Element::OrderedList { .. } => "ol",
            Element::UnorderedList { .. } => "ul",
            Element::ThematicBreak => "hr",
            Element::LineBreak => "br",
            Element::Text { .. } => "text",
            Element::Html { .. } => "html",
        }
    }

    /// Whether the element sits inside a paragraph in markdown source.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Element::Emphasis { .. }
                | Element::Strong { .. }
                | Element::Strikethrough { .. }
                | Element::CodeSpan { .. }
                | Element::Link { .. }
                | Element::Image { .. }
                | Element::LineBreak
                | Element::Text { .. }
        )
    }
}

impl Node {
    /// The `"type"` value, or `None` for list items and blank lines.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Node::Element(element) => Some(element.type_name()),
            Node::Item(_) | Node::Blank(_) => None,
        }
    }
}

/// Typed view of the output container.
///
/// `extra` holds every caller supplied key other than `content`; those keys are
/// written back unchanged when the document is serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub extra: Container,
    #[serde(default)]
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            extra: Container::new(),
            content,
        }
    }
}
