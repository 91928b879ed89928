//! Token tree handed to the renderer.
//!
//! Tokens are produced by the markdown adapter (see `formats/markdown/parser.rs`)
//! from the parser's AST. The set of kinds is closed: the render pass matches on
//! every variant, so adding a kind without a mapping fails to compile.

/// A structured unit of parsed markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Paragraph {
        children: Vec<Token>,
    },
    Heading {
        level: u8,
        children: Vec<Token>,
    },
    Emphasis {
        children: Vec<Token>,
    },
    Strong {
        children: Vec<Token>,
    },
    Strikethrough {
        children: Vec<Token>,
    },
    BlockQuote {
        children: Vec<Token>,
    },
    CodeSpan {
        text: String,
    },
    BlockCode {
        text: String,
        lang: Option<String>,
    },
    Link {
        children: Vec<Token>,
        url: String,
        title: Option<String>,
    },
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },
    List {
        items: Vec<Token>,
        ordered: bool,
        /// Explicit first number of an ordered list. `None` when the list
        /// starts at the default.
        start: Option<u64>,
    },
    ListItem {
        children: Vec<Token>,
    },
    ThematicBreak,
    LineBreak,
    BlankLine,
    Text(String),
    /// Raw HTML, inline or block.
    Html(String),
}

impl Token {
    /// Short kind name, used in log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Paragraph { .. } => "paragraph",
            Token::Heading { .. } => "heading",
            Token::Emphasis { .. } => "emphasis",
            Token::Strong { .. } => "strong",
            Token::Strikethrough { .. } => "strikethrough",
            Token::BlockQuote { .. } => "block_quote",
            Token::CodeSpan { .. } => "codespan",
            Token::BlockCode { .. } => "block_code",
            Token::Link { .. } => "link",
            Token::Image { .. } => "image",
            Token::List { .. } => "list",
            Token::ListItem { .. } => "list_item",
            Token::ThematicBreak => "thematic_break",
            Token::LineBreak => "linebreak",
            Token::BlankLine => "blank_line",
            Token::Text(_) => "text",
            Token::Html(_) => "html",
        }
    }
}
