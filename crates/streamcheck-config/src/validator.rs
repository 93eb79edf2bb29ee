//! Configuration validation.

use std::time::Duration;

use crate::error::ConfigError;
use crate::schema::{Config, TextMatch};

/// Polling windows longer than this get a warning.
const LONG_POLLING_WINDOW: Duration = Duration::from_secs(120);

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_site(config, &mut result);
        Self::validate_ad_skip(config, &mut result);

        Ok(result)
    }

    /// Validate and turn the first error into a [`ConfigError`].
    pub fn ensure_valid(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = Self::validate(config)?;
        if result.errors.is_empty() {
            return Ok(result);
        }
        let first = result.errors.remove(0);
        Err(ConfigError::InvalidValue {
            field: first.path,
            message: first.message,
        })
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.request_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.request_timeout_ms",
                "request_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_site(config: &Config, result: &mut ValidationResult) {
        let url = &config.site.base_url;
        if url.is_empty() {
            result.add_error(ValidationError::new(
                "site.base_url",
                "base_url cannot be empty",
            ));
        } else if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "site.base_url",
                "base_url must start with http:// or https://",
            ));
        }
    }

    fn validate_ad_skip(config: &Config, result: &mut ValidationResult) {
        let ad = &config.ad_skip;

        if ad.max_attempts == 0 {
            result.add_error(ValidationError::new(
                "ad_skip.max_attempts",
                "max_attempts must be greater than 0",
            ));
        }

        if ad.skip_selectors.is_empty() {
            result.add_error(ValidationError::new(
                "ad_skip.skip_selectors",
                "At least one skip selector is required",
            ));
        }

        if ad.marker_selectors.is_empty() && ad.ad_text_markers.is_empty() {
            result.add_error(ValidationError::new(
                "ad_skip.marker_selectors",
                "Ads can never be detected without marker selectors or text markers",
            ));
        }

        if ad.grace_wait_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "ad_skip.grace_wait_ms",
                "No grace wait, pre-roll ads may not have rendered yet at detection time",
            ));
        }

        if ad.ad_text_match == TextMatch::Substring
            && ad.ad_text_markers.iter().any(|m| m.chars().count() <= 2)
        {
            result.add_warning(ValidationWarning::new(
                "ad_skip.ad_text_markers",
                "Very short text markers match almost any page with substring matching, consider ad_text_match = \"word\"",
            ));
        }

        let window = ad.polling_window();
        if window > LONG_POLLING_WINDOW {
            result.add_warning(ValidationWarning::new(
                "ad_skip",
                format!(
                    "Worst-case skip polling window is {}s, scenarios may run very long",
                    window.as_secs()
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
