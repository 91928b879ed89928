//! Markdown to JSON document trees
//!
//!     This crate renders markdown into a JSON-serializable node tree instead of HTML. Markdown
//!     syntax itself is recognized by comrak; everything here starts from comrak's AST.
//!
//!     TLDR:
//!         - The parser adapter turns comrak's AST into a closed set of tokens (./ir/tokens.rs).
//!         - The render pass maps each token, children first, through one pure function per kind
//!           (./common/mapping.rs, ./common/render.rs).
//!         - The resulting nodes are merged into the output container, keeping any keys the caller
//!           seeded it with (./common/container.rs).
//!
//! Architecture
//!
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # comrak adapter (parser.rs) and inverse (serializer.rs)
//!     │   └── json                # the container as JSON text
//!     ├── lib.rs
//!     ├── ir                      # tokens in, nodes out
//!     └── common                  # mapping, render pass, links, container
//!
//!     This is a pure lib: it powers mdjson-cli but makes no assumption about a shell
//!     environment (no printing, no env vars).
//!
//! Output
//!
//!     A JSON object whose `content` array holds one node per top-level block, in document order:
//!
//!     {"content": [
//!         {"type": "h", "content": [{"type": "text", "content": "Title"}], "level": 1},
//!         {"type": "p", "content": [{"type": "text", "content": "Some "},
//!                                   {"type": "em", "content": [{"type": "text", "content": "text"}]},
//!                                   {"type": "text", "content": "."}]}
//!     ]}
//!
//!     The full field table lives in ./ir/nodes.rs.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── markdown
//!     │   └── <topic>.rs
//!     └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use common::container::merge;
pub use common::links::UrlPolicy;
pub use common::render::render_tokens;
pub use error::FormatError;
pub use format::Format;
pub use formats::{JsonFormat, MarkdownFormat, MarkdownOptions};
pub use ir::nodes::{Container, Content, Document, Element, Node};
pub use ir::tokens::Token;
pub use registry::FormatRegistry;

/// Render markdown into a JSON container using the default options.
///
/// `seed` is an optional pre-populated container; its keys other than
/// `content` are preserved in the result.
pub fn markdown_to_json(source: &str, seed: Option<&Container>) -> Result<Container, FormatError> {
    markdown_to_json_with_options(source, seed, &MarkdownOptions::default())
}

/// Render markdown into a JSON container.
pub fn markdown_to_json_with_options(
    source: &str,
    seed: Option<&Container>,
    options: &MarkdownOptions,
) -> Result<Container, FormatError> {
    let rendered = formats::markdown::parser::parse_from_markdown(source, options)?;
    merge(seed, rendered.content)
}
