//! Intermediate Representation (IR).
//!
//! `tokens` is what the markdown parser hands to the renderer, `nodes` is what
//! the renderer produces and what gets serialized as JSON.

pub mod nodes;
pub mod tokens;
