use serde::{Deserialize, Serialize};

use crate::error::{WaterfallError, WaterfallResult};

/// Row label truncation rule.
///
/// Labels longer than `max_chars` keep `prefix_chars` leading and
/// `suffix_chars` trailing characters joined by `marker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTruncation {
    pub max_chars: usize,
    pub prefix_chars: usize,
    pub suffix_chars: usize,
    pub marker: String,
}

impl Default for LabelTruncation {
    fn default() -> Self {
        Self {
            max_chars: 40,
            prefix_chars: 25,
            suffix_chars: 10,
            marker: " ... ".to_owned(),
        }
    }
}

impl LabelTruncation {
    pub fn validate(&self) -> WaterfallResult<()> {
        let shortened = self.prefix_chars + self.suffix_chars + self.marker.chars().count();
        if shortened > self.max_chars {
            return Err(WaterfallError::InvalidConfig(format!(
                "label truncation keeps {shortened} chars but max is {}",
                self.max_chars
            )));
        }
        Ok(())
    }

    /// Shortens a URL for its row label.
    ///
    /// Query string and fragment are stripped before the length check.
    #[must_use]
    pub fn shorten(&self, url: &str) -> String {
        let stripped = strip_query_and_fragment(url);
        let len = stripped.chars().count();
        if len <= self.max_chars {
            return stripped.to_owned();
        }

        let prefix: String = stripped.chars().take(self.prefix_chars).collect();
        let suffix: String = stripped
            .chars()
            .skip(len.saturating_sub(self.suffix_chars))
            .collect();
        format!("{prefix}{}{suffix}", self.marker)
    }
}

/// Everything before the first `?` or `#`.
#[must_use]
pub fn strip_query_and_fragment(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(index) => &url[..index],
        None => url,
    }
}

/// Shortens a URL with the default 40/25/10 rule.
#[must_use]
pub fn shorten_url(url: &str) -> String {
    LabelTruncation::default().shorten(url)
}
