//! URL sanitization applied to link and image targets before they are mapped.
//!
//! A URL is dangerous when its scheme is `javascript`, `vbscript` or `file`, or
//! when it is a `data:` URL that is not a PNG, GIF, JPEG or WebP image. This is
//! the same list CommonMark renderers use for HTML output.
//!
//! Scheme detection goes through [`url::Url`], which lowercases the scheme and
//! strips the leading whitespace and embedded tabs/newlines browsers ignore.
//! Relative URLs fail to parse as absolute URLs and are always safe.

use url::Url;

/// Replacement used for dangerous URLs unless configured otherwise.
pub const DEFAULT_HARMFUL_LINK: &str = "#harmful-link";

const SAFE_DATA_IMAGES: &[&str] = &["image/png", "image/gif", "image/jpeg", "image/webp"];

/// Decides what a link target becomes in the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPolicy {
    /// When false every URL passes through untouched.
    pub sanitize: bool,
    /// Value written in place of a dangerous URL.
    pub harmful_link: String,
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self {
            sanitize: true,
            harmful_link: DEFAULT_HARMFUL_LINK.to_string(),
        }
    }
}

impl UrlPolicy {
    /// A policy that never rewrites URLs.
    pub fn permissive() -> Self {
        Self {
            sanitize: false,
            ..Self::default()
        }
    }

    pub fn safe_url(&self, url: &str) -> String {
        if self.sanitize && is_dangerous_url(url) {
            log::warn!("replacing dangerous url {url:?} with {:?}", self.harmful_link);
            return self.harmful_link.clone();
        }
        url.to_string()
    }
}

/// Returns true for URLs whose scheme can execute code or read local files.
pub fn is_dangerous_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    match parsed.scheme() {
        "javascript" | "vbscript" | "file" => true,
        "data" => {
            // Media type ends at the first parameter or at the payload
            let media_type = parsed
                .path()
                .split([';', ','])
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            !SAFE_DATA_IMAGES.contains(&media_type.as_str())
        }
        _ => false,
    }
}
