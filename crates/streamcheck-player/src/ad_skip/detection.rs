//! Ad presence detection.

use streamcheck_config::TextMatch;
use streamcheck_protocols::{PageError, PageHandle};
use tracing::trace;

use super::controller::AdSkipController;
use super::types::AdSignal;

impl AdSkipController {
    /// Probe the marker selectors in order, then fall back to the text check.
    ///
    /// A failing or slow marker probe counts as "not visible". Only the text
    /// read can fail the call.
    pub async fn detect(&self, page: &dyn PageHandle) -> Result<AdSignal, PageError> {
        let timeout = self.config.marker_visibility_timeout();

        for selector in &self.config.marker_selectors {
            match page.is_visible(selector, timeout).await {
                Ok(true) => return Ok(AdSignal::Marker(selector.clone())),
                Ok(false) => trace!("Ad marker {} not visible", selector),
                Err(e) => trace!("Ad marker probe {} failed: {}", selector, e),
            }
        }

        if self.config.ad_text_markers.is_empty() {
            return Ok(AdSignal::Absent);
        }

        let text = page
            .text_content(&self.config.ad_text_selector)
            .await?
            .unwrap_or_default();

        Ok(
            find_text_marker(&text, &self.config.ad_text_markers, self.config.ad_text_match)
                .map(|marker| AdSignal::Text(marker.to_string()))
                .unwrap_or(AdSignal::Absent),
        )
    }
}

/// First marker found in `text`.
///
/// `Substring` is a plain case-sensitive `contains`. `Word` requires the
/// marker to stand alone between non-alphanumeric boundaries.
pub fn find_text_marker<'a>(text: &str, markers: &'a [String], mode: TextMatch) -> Option<&'a str> {
    markers
        .iter()
        .filter(|m| !m.is_empty())
        .find(|marker| match mode {
            TextMatch::Substring => text.contains(marker.as_str()),
            TextMatch::Word => contains_word(text, marker),
        })
        .map(|m| m.as_str())
}

fn contains_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
