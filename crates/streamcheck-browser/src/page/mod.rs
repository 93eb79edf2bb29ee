//! [`PageHandle`] implementation backed by a CDP page session.

mod selector;

pub use selector::SelectorQuery;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;
use tracing::{debug, trace};

use streamcheck_protocols::{Condition, PageError, PageHandle};

use crate::cdp::{CdpError, PageSession};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One browser tab.
///
/// Cheap to clone; clones share the underlying session.
#[derive(Clone)]
pub struct CdpPage {
    session: Arc<PageSession>,
}

impl CdpPage {
    pub(crate) fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn target_id(&self) -> &str {
        self.session.target_id()
    }

    /// Raw session, for CDP calls the page trait does not cover.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Evaluate, treating a JavaScript exception as "not yet".
    ///
    /// Polling straddles navigations, where the execution context can be
    /// torn down between two probes.
    async fn probe(&self, expression: &str) -> Result<bool, PageError> {
        match self.session.evaluate(expression).await {
            Ok(value) => Ok(value.as_bool().unwrap_or(false)),
            Err(CdpError::JavaScript(msg)) => {
                trace!("Probe raised: {}", msg);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Wait for a visible match and return the centre of its box.
    async fn action_point(&self, selector: &str, timeout: Duration) -> Result<(f64, f64), PageError> {
        let script = SelectorQuery::parse(selector).action_point_js();
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let value = self.session.evaluate(&script).await?;
            if let (Some(x), Some(y)) = (value["x"].as_f64(), value["y"].as_f64()) {
                return Ok((x, y));
            }
            if tokio::time::Instant::now() + POLL_INTERVAL > deadline {
                return Err(PageError::Timeout(format!(
                    "{} not visible after {}ms",
                    selector,
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn focus(&self, selector: &str, clear: bool) -> Result<(), PageError> {
        let focused = self
            .session
            .evaluate(&SelectorQuery::parse(selector).focus_js(clear))
            .await?;
        if focused.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(PageError::ElementNotFound(selector.to_string()))
        }
    }
}

#[async_trait]
impl PageHandle for CdpPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError> {
        self.session.navigate(url, timeout).await?;
        Ok(())
    }

    async fn is_visible(&self, selector: &str, timeout: Duration) -> Result<bool, PageError> {
        let script = SelectorQuery::parse(selector).visible_js();
        match tokio::time::timeout(timeout, self.session.evaluate(&script)).await {
            Ok(result) => Ok(result?.as_bool().unwrap_or(false)),
            Err(_) => {
                trace!("Visibility check for {} timed out", selector);
                Ok(false)
            }
        }
    }

    async fn count(&self, selector: &str) -> Result<usize, PageError> {
        let value = self
            .session
            .evaluate(&SelectorQuery::parse(selector).count_js())
            .await?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| PageError::UnexpectedValue(format!("expected count, got {}", value)))
    }

    async fn hover(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        let (x, y) = self.action_point(selector, timeout).await?;
        self.session.mouse_move(x, y).await?;
        debug!("Hovered {}", selector);
        Ok(())
    }

    async fn click(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        let (x, y) = self.action_point(selector, timeout).await?;
        self.session.mouse_move(x, y).await?;
        self.session.click(x, y).await?;
        debug!("Clicked {}", selector);
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), PageError> {
        self.focus(selector, true).await?;
        self.session.type_text(value).await?;
        Ok(())
    }

    async fn press(&self, selector: &str, key: &str) -> Result<(), PageError> {
        self.focus(selector, false).await?;
        self.session.press_key(key).await?;
        Ok(())
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>, PageError> {
        let value = self
            .session
            .evaluate(&SelectorQuery::parse(selector).text_js())
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, PageError> {
        Ok(self.session.evaluate(expression).await?)
    }

    async fn wait_for_condition(
        &self,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<(), PageError> {
        let script = selector::condition_js(condition);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.probe(&script).await? {
                return Ok(());
            }
            if tokio::time::Instant::now() + POLL_INTERVAL > deadline {
                return Err(PageError::Timeout(format!(
                    "{} after {}ms",
                    condition,
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn title(&self) -> Result<String, PageError> {
        Ok(self.session.get_title().await?)
    }

    async fn screenshot(&self, path: &Path) -> Result<(), PageError> {
        let data = self.session.screenshot_png().await?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| PageError::UnexpectedValue(format!("screenshot data: {}", e)))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;

        debug!("Saved screenshot to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
