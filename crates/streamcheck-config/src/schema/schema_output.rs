//! Artifact locations and HTML report configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::default_true;

/// Where screenshots, JSON results, HTML reports and logs are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub screenshots_dir: PathBuf,
    /// Directory holding Cucumber JSON result files.
    pub reports_dir: PathBuf,
    pub html_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            screenshots_dir: PathBuf::from("screenshots"),
            reports_dir: PathBuf::from("reports"),
            html_dir: PathBuf::from("reports/html"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

/// HTML report labels and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_name")]
    pub report_name: String,

    #[serde(default = "default_page_title")]
    pub page_title: String,

    #[serde(default = "default_browser_name")]
    pub browser_name: String,

    #[serde(default = "default_browser_version")]
    pub browser_version: String,

    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default = "default_project")]
    pub project: String,

    #[serde(default = "default_release")]
    pub release: String,

    #[serde(default)]
    pub executed_by: Option<String>,

    /// Attach screenshots named after failed scenarios.
    #[serde(default = "default_true")]
    pub automatically_add_screenshots: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_name: default_report_name(),
            page_title: default_page_title(),
            browser_name: default_browser_name(),
            browser_version: default_browser_version(),
            device: default_device(),
            project: default_project(),
            release: default_release(),
            executed_by: None,
            automatically_add_screenshots: true,
        }
    }
}

fn default_report_name() -> String {
    "QA Automation Report".to_string()
}

fn default_page_title() -> String {
    "Video E2E Test Results".to_string()
}

fn default_browser_name() -> String {
    "chromium".to_string()
}

fn default_browser_version() -> String {
    "latest".to_string()
}

fn default_device() -> String {
    "Local test machine".to_string()
}

fn default_project() -> String {
    "Video E2E Test".to_string()
}

fn default_release() -> String {
    "1.0.0".to_string()
}
