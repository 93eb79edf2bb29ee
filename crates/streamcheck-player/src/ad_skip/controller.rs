//! AdSkipController: configuration holder and top-level flow.

use streamcheck_config::{AdSkipConfig, ExhaustionPolicy};
use streamcheck_protocols::{Condition, PageError, PageHandle};
use tracing::{debug, info, warn};

use super::types::{AdResolution, AdSignal, FallbackOutcome};

/// Detects an interstitial ad on a page and tries to dismiss it.
///
/// Holds only configuration; the page is borrowed per call and nothing
/// survives between calls.
#[derive(Debug, Clone, Default)]
pub struct AdSkipController {
    pub(super) config: AdSkipConfig,
}

impl AdSkipController {
    pub fn new(config: AdSkipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdSkipConfig {
        &self.config
    }

    /// Handle a possible ad on `page`. Never fails.
    pub async fn resolve_ad(&self, page: &dyn PageHandle) -> AdResolution {
        match self.try_resolve(page).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("No ad to skip or ad handling failed gracefully: {}", e);
                AdResolution::Aborted {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_resolve(&self, page: &dyn PageHandle) -> Result<AdResolution, PageError> {
        page.wait_for_timeout(self.config.grace_wait()).await?;

        match self.detect(page).await? {
            AdSignal::Absent => {
                info!("No ad present");
                return Ok(AdResolution::NoAd);
            }
            AdSignal::Marker(selector) => {
                info!("Ad detected via {}, attempting to skip", selector);
            }
            AdSignal::Text(marker) => {
                info!("Ad detected via text \"{}\", attempting to skip", marker);
            }
        }

        let max_attempts = self.config.max_attempts;
        for round in 1..=max_attempts {
            let result = self.run_round(page).await;
            if let Some(selector) = result.selector_used.filter(|_| result.matched) {
                info!("Skipped ad successfully via {} (round {})", selector, round);
                return Ok(AdResolution::Skipped { selector, round });
            }

            debug!("No skip candidate clickable in round {}/{}", round, max_attempts);
            if round < max_attempts {
                page.wait_for_timeout(self.config.round_delay()).await?;
            }
        }

        warn!("Skip button not found or not clickable, ad may be non-skippable");
        let fallback = self.after_exhaustion(page).await?;

        Ok(AdResolution::Exhausted {
            rounds: max_attempts,
            fallback,
        })
    }

    async fn after_exhaustion(&self, page: &dyn PageHandle) -> Result<FallbackOutcome, PageError> {
        if self.config.on_exhaustion == ExhaustionPolicy::ReturnImmediately {
            return Ok(FallbackOutcome::Skipped);
        }

        let timeout = self.config.fallback_timeout();
        let condition = Condition::AllHidden(self.config.marker_selectors.clone());
        info!("Waiting up to {}ms for the ad to end", timeout.as_millis());

        // Bounded even if the backend ignores its own timeout.
        match tokio::time::timeout(timeout, page.wait_for_condition(&condition, timeout)).await {
            Ok(Ok(())) => {
                info!("Ad finished playing");
                Ok(FallbackOutcome::AdEnded)
            }
            Ok(Err(e)) if e.is_timeout() => {
                info!("Ad still showing after {}ms, continuing", timeout.as_millis());
                Ok(FallbackOutcome::TimedOut)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                info!("Ad still showing after {}ms, continuing", timeout.as_millis());
                Ok(FallbackOutcome::TimedOut)
            }
        }
    }
}
