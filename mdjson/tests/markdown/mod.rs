//! Markdown format tests
//!
//! End-to-end checks of Markdown → JSON rendering and the JSON → Markdown path.

mod import;
mod properties;
mod roundtrip;
