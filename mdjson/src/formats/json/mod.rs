//! JSON format implementation
//!
//! Reads and writes the output container directly: a JSON object with a
//! `content` array plus any caller supplied keys.
//!
//! Serialization accepts one extra parameter, `pretty`, which switches from
//! compact output to two-space indented output.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Format implementation for the JSON node tree
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid JSON document: {e}")))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_json(doc, self.pretty)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = self.pretty;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => pretty = parse_flag(key, value)?,
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'json' does not support parameter '{other}'"
                    )))
                }
            }
        }
        serialize_to_json(doc, pretty)
    }
}

fn serialize_to_json(doc: &Document, pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    result.map_err(|e| FormatError::SerializationError(format!("JSON serialization failed: {e}")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::NotSupported(format!(
            "Invalid boolean value '{other}' for parameter '{key}'"
        ))),
    }
}
