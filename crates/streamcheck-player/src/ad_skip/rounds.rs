//! Skip polling: one round over the candidates, one attempt per candidate.

use streamcheck_protocols::PageHandle;
use tracing::debug;

use super::controller::AdSkipController;
use super::types::{AttemptFailure, RoundResult};

impl AdSkipController {
    /// Try each skip candidate in order; stop at the first successful click.
    pub async fn run_round(&self, page: &dyn PageHandle) -> RoundResult {
        for selector in &self.config.skip_selectors {
            match self.attempt(page, selector).await {
                Ok(()) => return RoundResult::hit(selector.as_str()),
                Err(AttemptFailure::NotVisible) => {}
                Err(e) => debug!("Skip candidate {}: {}", selector, e),
            }
        }
        RoundResult::miss()
    }

    /// Probe, settle, hover, click.
    pub async fn attempt(&self, page: &dyn PageHandle, selector: &str) -> Result<(), AttemptFailure> {
        let visible = page
            .is_visible(selector, self.config.probe_timeout())
            .await
            .map_err(AttemptFailure::Probe)?;
        if !visible {
            return Err(AttemptFailure::NotVisible);
        }

        page.wait_for_timeout(self.config.settle_delay())
            .await
            .map_err(AttemptFailure::Settle)?;
        page.hover(selector, self.config.hover_timeout())
            .await
            .map_err(AttemptFailure::Hover)?;
        page.click(selector, self.config.click_timeout())
            .await
            .map_err(AttemptFailure::Click)?;
        Ok(())
    }
}
