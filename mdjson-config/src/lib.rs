//! Shared configuration loader for the mdjson tools.
//!
//! `defaults/mdjson.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdjsonConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdjson::common::links::UrlPolicy;
use mdjson::formats::markdown::MarkdownOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdjson.default.toml");

/// Top-level configuration consumed by mdjson applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdjsonConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// Markdown extensions handed to comrak.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub strikethrough: bool,
    pub autolink: bool,
    pub smart: bool,
}

/// Node rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub keep_html: bool,
    pub sanitize_urls: bool,
    pub harmful_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl From<&RenderConfig> for UrlPolicy {
    fn from(config: &RenderConfig) -> Self {
        UrlPolicy {
            sanitize: config.sanitize_urls,
            harmful_link: config.harmful_link.clone(),
        }
    }
}

impl From<&MdjsonConfig> for MarkdownOptions {
    fn from(config: &MdjsonConfig) -> Self {
        MarkdownOptions {
            strikethrough: config.parse.strikethrough,
            autolink: config.parse.autolink,
            smart: config.parse.smart,
            keep_html: config.render.keep_html,
            url_policy: UrlPolicy::from(&config.render),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdjsonConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdjsonConfig, ConfigError> {
    Loader::new().build()
}
