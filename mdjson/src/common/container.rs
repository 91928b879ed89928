//! Output container assembly.
//!
//! Callers may pre-seed the container with their own keys (metadata, ids, ...).
//! Merging only ever touches `content`; every other key is carried over as is.

use crate::error::FormatError;
use crate::ir::nodes::{Container, Document, Node, CONTENT_KEY};
use serde_json::Value;

/// Merge rendered nodes into a copy of `base`, returning the typed document.
pub fn merge_document(base: Option<&Container>, content: Vec<Node>) -> Document {
    let mut extra = base.cloned().unwrap_or_default();
    extra.remove(CONTENT_KEY);
    Document { extra, content }
}

/// Merge rendered nodes into a copy of `base`, returning the JSON container.
///
/// `base` is left untouched. A `content` key already present in `base` is
/// replaced.
pub fn merge(base: Option<&Container>, content: Vec<Node>) -> Result<Container, FormatError> {
    to_container(&merge_document(base, content))
}

/// Convert a typed document back into a JSON object.
pub fn to_container(doc: &Document) -> Result<Container, FormatError> {
    match serde_json::to_value(doc) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FormatError::SerializationError(format!(
            "document serialized to a non-object value: {other}"
        ))),
        Err(e) => Err(FormatError::SerializationError(format!(
            "Failed to serialize document: {e}"
        ))),
    }
}
