//! The validated `{url, title}` pair produced by a successful generate.

use thiserror::Error;

/// Title used for share sheets when the user left the title empty.
pub const FALLBACK_SHARE_TITLE: &str = "QR Code";

/// Urls longer than this are shortened in the result view.
pub const DISPLAY_URL_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL must not be empty")]
    EmptyUrl,
}

/// Payload of a generate action.
///
/// Both fields are trimmed and `url` is never empty. Instances are immutable;
/// a new submission replaces the payload instead of editing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratePayload {
    url: String,
    title: String,
}

impl GeneratePayload {
    /// Trims both inputs and rejects a url that is empty afterwards.
    pub fn new(url: &str, title: &str) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(Self {
            url: url.to_owned(),
            title: title.trim().to_owned(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Text written to the clipboard and attached to shares.
    ///
    /// `"{title}\n{url}"` when a title is present, the bare url otherwise.
    pub fn share_text(&self) -> String {
        if self.has_title() {
            format!("{}\n{}", self.title, self.url)
        } else {
            self.url.clone()
        }
    }

    /// Title for the share sheet, falling back to [`FALLBACK_SHARE_TITLE`].
    pub fn share_title(&self) -> &str {
        if self.has_title() {
            &self.title
        } else {
            FALLBACK_SHARE_TITLE
        }
    }

    /// The url as shown under the code: at most 50 characters, then `...`.
    pub fn display_url(&self) -> String {
        if self.url.chars().count() > DISPLAY_URL_MAX_CHARS {
            let head: String = self.url.chars().take(DISPLAY_URL_MAX_CHARS).collect();
            format!("{head}...")
        } else {
            self.url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_both_fields() {
        let payload = GeneratePayload::new("  https://x  ", "\tT \n").expect("valid payload");
        assert_eq!(payload.url(), "https://x");
        assert_eq!(payload.title(), "T");
    }

    #[test]
    fn new_rejects_whitespace_url() {
        assert_eq!(
            GeneratePayload::new(" \t\n ", "title"),
            Err(ValidationError::EmptyUrl)
        );
    }

    #[test]
    fn share_text_joins_title_and_url() {
        let payload = GeneratePayload::new("https://x", "T").expect("valid payload");
        assert_eq!(payload.share_text(), "T\nhttps://x");
    }

    #[test]
    fn share_text_without_title_is_url() {
        let payload = GeneratePayload::new("https://x", "   ").expect("valid payload");
        assert_eq!(payload.share_text(), "https://x");
        assert_eq!(payload.share_title(), FALLBACK_SHARE_TITLE);
    }

    #[test]
    fn display_url_truncates_long_urls() {
        let long = format!("https://example.com/{}", "a".repeat(60));
        let payload = GeneratePayload::new(&long, "").expect("valid payload");
        let shown = payload.display_url();
        assert!(shown.ends_with("..."), "long url should be elided");
        assert_eq!(shown.chars().count(), DISPLAY_URL_MAX_CHARS + 3);

        let short = GeneratePayload::new("https://a.b", "").expect("valid payload");
        assert_eq!(short.display_url(), "https://a.b");
    }

    #[test]
    fn display_url_counts_characters_not_bytes() {
        let url = format!("https://例え.jp/{}", "ノ".repeat(40));
        let payload = GeneratePayload::new(&url, "").expect("valid payload");
        assert_eq!(payload.display_url().chars().count(), DISPLAY_URL_MAX_CHARS + 3);
    }
}
