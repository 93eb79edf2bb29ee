//! Outcome types of one ad-handling pass.

use serde::Serialize;
use thiserror::Error;

use streamcheck_protocols::PageError;

/// Whether an ad is showing, and what gave it away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdSignal {
    Absent,
    /// A marker selector was visible.
    Marker(String),
    /// The ad text container mentioned one of the text markers.
    Text(String),
}

impl AdSignal {
    pub fn is_present(&self) -> bool {
        !matches!(self, AdSignal::Absent)
    }
}

/// Why a single skip candidate did not get clicked.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    #[error("not visible")]
    NotVisible,

    #[error("visibility probe failed: {0}")]
    Probe(PageError),

    #[error("settle delay failed: {0}")]
    Settle(PageError),

    #[error("hover failed: {0}")]
    Hover(PageError),

    #[error("click failed: {0}")]
    Click(PageError),
}

/// Outcome of one pass over the skip candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundResult {
    pub matched: bool,
    pub selector_used: Option<String>,
}

impl RoundResult {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(selector: impl Into<String>) -> Self {
        Self {
            matched: true,
            selector_used: Some(selector.into()),
        }
    }
}

/// What happened after the attempt budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackOutcome {
    /// Policy was `return_immediately`.
    Skipped,
    /// Every marker went hidden within the fallback timeout.
    AdEnded,
    /// The fallback timeout elapsed first.
    TimedOut,
}

/// Terminal result of [`AdSkipController::resolve_ad`](super::AdSkipController::resolve_ad).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdResolution {
    NoAd,
    Skipped { selector: String, round: u32 },
    Exhausted { rounds: u32, fallback: FallbackOutcome },
    Aborted { reason: String },
}

impl AdResolution {
    pub fn was_skipped(&self) -> bool {
        matches!(self, AdResolution::Skipped { .. })
    }
}
