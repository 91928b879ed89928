//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the JSON document tree and text representations.

pub mod json;
pub mod markdown;

pub use json::JsonFormat;
pub use markdown::{MarkdownFormat, MarkdownOptions};
