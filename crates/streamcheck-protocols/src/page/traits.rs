//! PageHandle trait definition.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::Condition;
use crate::error::PageError;

/// Capability over one live browser page.
///
/// The page is owned by the caller (a test step, a page object); consumers
/// only borrow it for the duration of a call. Every operation that can take
/// time is bounded either by an explicit timeout or by the backend's own
/// request timeout.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Navigate to a URL and wait for the document to load.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    /// Whether an element matching `selector` is currently visible.
    ///
    /// Returns `Ok(false)` when no element matches or the check does not
    /// complete within `timeout`.
    async fn is_visible(&self, selector: &str, timeout: Duration) -> Result<bool, PageError>;

    /// Number of elements matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize, PageError>;

    /// Move the pointer over the first element matching `selector`.
    async fn hover(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// Replace the value of an input element.
    async fn fill(&self, selector: &str, value: &str) -> Result<(), PageError>;

    /// Focus an element and press a key (e.g. `"Enter"`).
    async fn press(&self, selector: &str, key: &str) -> Result<(), PageError>;

    /// Rendered text of the first element matching `selector`.
    async fn text_content(&self, selector: &str) -> Result<Option<String>, PageError>;

    /// Evaluate a JavaScript expression in the page and return its value.
    async fn evaluate(&self, expression: &str) -> Result<Value, PageError>;

    /// Poll until `condition` holds, failing with [`PageError::Timeout`]
    /// once `timeout` elapses.
    async fn wait_for_condition(
        &self,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<(), PageError>;

    /// Current document title.
    async fn title(&self) -> Result<String, PageError>;

    /// Capture the viewport as a PNG file.
    async fn screenshot(&self, path: &Path) -> Result<(), PageError>;

    /// Unconditional delay.
    async fn wait_for_timeout(&self, duration: Duration) -> Result<(), PageError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    /// Evaluate an expression expected to produce a boolean.
    async fn evaluate_bool(&self, expression: &str) -> Result<bool, PageError> {
        match self.evaluate(expression).await? {
            Value::Bool(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(PageError::UnexpectedValue(format!(
                "expected boolean, got {}",
                other
            ))),
        }
    }

    /// Evaluate an expression expected to produce a number.
    async fn evaluate_f64(&self, expression: &str) -> Result<f64, PageError> {
        let value = self.evaluate(expression).await?;
        value.as_f64().ok_or_else(|| {
            PageError::UnexpectedValue(format!("expected number, got {}", value))
        })
    }
}
