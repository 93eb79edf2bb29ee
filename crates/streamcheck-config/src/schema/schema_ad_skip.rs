//! Ad detection and skip configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do once every skip round has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Return to the caller straight away.
    ReturnImmediately,
    /// Wait, bounded by `fallback_timeout_ms`, for the ad markers to vanish.
    #[default]
    WaitForAdToEnd,
}

/// How ad text markers are matched against the page text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    /// Case-sensitive substring match.
    #[default]
    Substring,
    /// Case-sensitive match on word boundaries.
    Word,
}

/// Selectors and timing for ad detection and skipping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdSkipConfig {
    /// Pause before detection so a pre-roll has time to render.
    pub grace_wait_ms: u64,

    /// Selectors whose visibility indicates an ad overlay, in probe order.
    pub marker_selectors: Vec<String>,

    pub marker_visibility_timeout_ms: u64,

    /// Element whose text is searched when no marker is visible.
    pub ad_text_selector: String,

    pub ad_text_markers: Vec<String>,

    pub ad_text_match: TextMatch,

    /// Candidate selectors for the skip control, in probe order.
    pub skip_selectors: Vec<String>,

    /// Attempt budget (number of polling rounds).
    pub max_attempts: u32,

    pub probe_timeout_ms: u64,

    /// Delay between seeing a skip control and interacting with it.
    pub settle_delay_ms: u64,

    pub hover_timeout_ms: u64,

    pub click_timeout_ms: u64,

    /// Pause after a round in which no candidate succeeded.
    pub round_delay_ms: u64,

    pub on_exhaustion: ExhaustionPolicy,

    /// Upper bound for the wait-for-ad-to-end fallback.
    pub fallback_timeout_ms: u64,
}

impl Default for AdSkipConfig {
    fn default() -> Self {
        Self {
            grace_wait_ms: 3000,
            marker_selectors: strings(&[
                ".ytp-ad-player-overlay",
                ".ytp-ad-text",
                ".ytp-ad-preview-text",
                ".ytp-ad-module",
                ".ytp-ad-overlay",
                ".ytp-ad-player-overlay-instream-info",
                ".ytp-ad-skip-button-modern",
            ]),
            marker_visibility_timeout_ms: 2000,
            ad_text_selector: "body".to_string(),
            ad_text_markers: strings(&["Ad", "Advertisement", "Skip"]),
            ad_text_match: TextMatch::Substring,
            skip_selectors: strings(&[
                ".ytp-ad-skip-button",
                ".ytp-ad-skip-button-modern",
                r#"button[aria-label*="Skip"]"#,
                r#"button:has-text("Skip")"#,
                r#"button:has-text("Skip Ad")"#,
                ".ytp-skip-ad-button",
                r#"[class*="skip"][class*="button"]"#,
                r#"button[class*="ad-skip"]"#,
            ]),
            max_attempts: 20,
            probe_timeout_ms: 100,
            settle_delay_ms: 500,
            hover_timeout_ms: 1000,
            click_timeout_ms: 2000,
            round_delay_ms: 1000,
            on_exhaustion: ExhaustionPolicy::WaitForAdToEnd,
            fallback_timeout_ms: 30000,
        }
    }
}

impl AdSkipConfig {
    pub fn grace_wait(&self) -> Duration {
        Duration::from_millis(self.grace_wait_ms)
    }

    pub fn marker_visibility_timeout(&self) -> Duration {
        Duration::from_millis(self.marker_visibility_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn hover_timeout(&self) -> Duration {
        Duration::from_millis(self.hover_timeout_ms)
    }

    pub fn click_timeout(&self) -> Duration {
        Duration::from_millis(self.click_timeout_ms)
    }

    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    /// Worst-case length of the skip polling window, excluding the grace
    /// wait and the fallback wait.
    pub fn polling_window(&self) -> Duration {
        let per_candidate = self.probe_timeout_ms
            + self.settle_delay_ms
            + self.hover_timeout_ms
            + self.click_timeout_ms;
        let per_round = self.round_delay_ms + per_candidate * self.skip_selectors.len() as u64;
        Duration::from_millis(per_round.saturating_mul(u64::from(self.max_attempts)))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
