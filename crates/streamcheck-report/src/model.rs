//! Cucumber JSON result model.
//!
//! Only the fields the report renders are modelled; everything is optional
//! or defaulted so output from different Cucumber writers still parses.

use std::time::Duration;

use serde::Deserialize;

/// Step (and derived scenario/feature) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Pending,
    Undefined,
    Ambiguous,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Pending => "pending",
            Status::Undefined => "undefined",
            Status::Ambiguous => "ambiguous",
            Status::Unknown => "unknown",
        }
    }

    /// Combine the statuses of a sequence of steps.
    ///
    /// Any failure wins; otherwise everything must pass for the whole to pass.
    fn fold(statuses: impl IntoIterator<Item = Status>) -> Status {
        let mut result = Status::Passed;
        for status in statuses {
            match status {
                Status::Failed | Status::Ambiguous => return Status::Failed,
                Status::Passed => {}
                other if result == Status::Passed => result = other,
                _ => {}
            }
        }
        result
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub keyword: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub elements: Vec<Scenario>,
}

impl Feature {
    /// Scenarios, without background elements.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.elements.iter().filter(|e| !e.is_background())
    }

    pub fn status(&self) -> Status {
        Status::fold(self.scenarios().map(Scenario::status))
    }

    pub fn duration(&self) -> Duration {
        self.elements.iter().map(Scenario::duration).sum()
    }
}

/// A `elements[]` entry: scenario or background.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub keyword: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub name: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn is_background(&self) -> bool {
        self.kind.as_deref() == Some("background")
    }

    pub fn status(&self) -> Status {
        Status::fold(self.steps.iter().map(|s| s.result.status))
    }

    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.result.duration()).sum()
    }

    /// Message of the first failing step.
    pub fn error_message(&self) -> Option<&str> {
        self.steps
            .iter()
            .find_map(|s| s.result.error_message.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub keyword: String,
    pub name: String,
    #[serde(default)]
    pub line: Option<u32>,
    pub result: StepResult,
    #[serde(default)]
    pub embeddings: Vec<Embedding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepResult {
    pub status: Status,
    /// Nanoseconds.
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl StepResult {
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.duration.unwrap_or(0))
    }
}

/// Attachment; `data` is base64.
#[derive(Debug, Clone, Deserialize)]
pub struct Embedding {
    pub mime_type: String,
    pub data: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Embedding {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Pass/fail counts across every loaded feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub features: usize,
    pub features_failed: usize,
    pub scenarios: usize,
    pub scenarios_passed: usize,
    pub scenarios_failed: usize,
    pub steps: usize,
    pub steps_passed: usize,
    pub steps_failed: usize,
}

impl Totals {
    pub fn from_features(features: &[Feature]) -> Self {
        let mut totals = Totals::default();
        for feature in features {
            totals.features += 1;
            if feature.status() == Status::Failed {
                totals.features_failed += 1;
            }
            for scenario in feature.scenarios() {
                totals.scenarios += 1;
                match scenario.status() {
                    Status::Passed => totals.scenarios_passed += 1,
                    Status::Failed => totals.scenarios_failed += 1,
                    _ => {}
                }
            }
            for step in feature.elements.iter().flat_map(|e| &e.steps) {
                totals.steps += 1;
                match step.result.status {
                    Status::Passed => totals.steps_passed += 1,
                    Status::Failed => totals.steps_failed += 1,
                    _ => {}
                }
            }
        }
        totals
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
