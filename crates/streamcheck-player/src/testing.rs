//! Recording fake page shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use streamcheck_protocols::{Condition, PageError, PageHandle};

/// Answers `evaluate` from a queue and records every call as a short
/// `"verb:argument"` string.
#[derive(Default)]
pub struct MockPage {
    pub evaluations: Mutex<VecDeque<Value>>,
    pub counts: HashMap<String, usize>,
    pub visible: Vec<String>,
    pub condition_times_out: bool,
    pub title: String,
    pub calls: Mutex<Vec<String>>,
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluating(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            evaluations: Mutex::new(values.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Calls whose verb is `verb`, argument only.
    pub fn calls_of(&self, verb: &str) -> Vec<String> {
        let prefix = format!("{}:", verb);
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix(&prefix).map(|s| s.to_string()))
            .collect()
    }

    fn record(&self, verb: &str, arg: impl std::fmt::Display) {
        self.calls.lock().push(format!("{}:{}", verb, arg));
    }
}

#[async_trait]
impl PageHandle for MockPage {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), PageError> {
        self.record("navigate", url);
        Ok(())
    }

    async fn is_visible(&self, selector: &str, _timeout: Duration) -> Result<bool, PageError> {
        self.record("is_visible", selector);
        Ok(self.visible.iter().any(|s| s == selector))
    }

    async fn count(&self, selector: &str) -> Result<usize, PageError> {
        self.record("count", selector);
        Ok(self.counts.get(selector).copied().unwrap_or(0))
    }

    async fn hover(&self, selector: &str, _timeout: Duration) -> Result<(), PageError> {
        self.record("hover", selector);
        Ok(())
    }

    async fn click(&self, selector: &str, _timeout: Duration) -> Result<(), PageError> {
        self.record("click", selector);
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), PageError> {
        self.record("fill", format!("{}={}", selector, value));
        Ok(())
    }

    async fn press(&self, selector: &str, key: &str) -> Result<(), PageError> {
        self.record("press", format!("{}={}", selector, key));
        Ok(())
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>, PageError> {
        self.record("text", selector);
        Ok(None)
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, PageError> {
        self.record("evaluate", expression);
        Ok(self.evaluations.lock().pop_front().unwrap_or(Value::Null))
    }

    async fn wait_for_condition(
        &self,
        condition: &Condition,
        _timeout: Duration,
    ) -> Result<(), PageError> {
        self.record("wait", condition);
        if self.condition_times_out {
            Err(PageError::Timeout(condition.to_string()))
        } else {
            Ok(())
        }
    }

    async fn title(&self) -> Result<String, PageError> {
        self.record("title", "");
        Ok(self.title.clone())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), PageError> {
        self.record("screenshot", path.display());
        Ok(())
    }

    async fn wait_for_timeout(&self, duration: Duration) -> Result<(), PageError> {
        self.record("sleep", duration.as_millis());
        Ok(())
    }
}
