//! Markdown format implementation
//!
//! Parsing renders CommonMark Markdown into the JSON node tree; serialization
//! writes a node tree back out as CommonMark.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and serialization:
//! - Single crate for both parsing and serialization
//! - CommonMark compliant, with GFM extensions behind options
//! - Exposes a typed AST we can walk without re-tokenizing anything
//!
//! # Element Mapping Table
//!
//! | Comrak node      | Token          | JSON node                 | Notes                                   |
//! |------------------|----------------|---------------------------|-----------------------------------------|
//! | Paragraph        | Paragraph      | `p`                       | Unwrapped inside tight list items       |
//! | Heading          | Heading        | `h` + `level`             |                                         |
//! | BlockQuote       | BlockQuote     | `blockquote`              |                                         |
//! | List             | List           | `ol` / `ul`               | `level` = start, ordered and start ≠ 1  |
//! | Item             | ListItem       | `{content}`               | No `type` key                           |
//! | CodeBlock        | BlockCode      | `code` + `lang`           | First info word; trailing newline cut   |
//! | ThematicBreak    | ThematicBreak  | `hr`                      |                                         |
//! | HtmlBlock        | Html           | `html`                    | Dropped unless `keep_html`              |
//! | Text / SoftBreak | Text           | `text`                    | Adjacent runs merged, soft break → `\n` |
//! | LineBreak        | LineBreak      | `br`                      |                                         |
//! | Code             | CodeSpan       | `codespan`                |                                         |
//! | Emph / Strong    | Emphasis/Strong| `em` / `strong`           |                                         |
//! | Strikethrough    | Strikethrough  | `del`                     | Needs the `strikethrough` option        |
//! | Link             | Link           | `a` + `href` + `title`    | href sanitized                          |
//! | Image            | Image          | `img` + `alt` + `title`   | URL in `content`, sanitized             |
//! | HtmlInline       | Html           | `html`                    | Dropped unless `keep_html`              |
//!
//! Any other comrak node is an error.
//!
//! # Lossy Conversions
//!
//! Serializing back to Markdown loses:
//! - container keys other than `content`
//! - blank line placeholders
//! - the boundary between two consecutive lists of the same kind
//! - spaces in link and image destinations, which are written percent-encoded
//!   (`<a b>` comes back as `a%20b`)

pub mod parser;
pub mod serializer;

use crate::common::links::UrlPolicy;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Knobs for the markdown → JSON direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Recognize `~~strikethrough~~`.
    pub strikethrough: bool,
    /// Turn bare URLs and `www.` hosts into links.
    pub autolink: bool,
    /// Smart punctuation (curly quotes, dashes, ellipses).
    pub smart: bool,
    /// Emit raw HTML as `html` nodes instead of dropping it.
    pub keep_html: bool,
    /// Sanitization applied to link and image targets.
    pub url_policy: UrlPolicy,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            autolink: false,
            smart: false,
            keep_html: true,
            url_policy: UrlPolicy::default(),
        }
    }
}

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source, &self.options)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc)
    }
}
