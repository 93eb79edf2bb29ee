//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod schema_ad_skip;
mod schema_output;

pub use schema_ad_skip::*;
pub use schema_output::*;

/// Shared default helper used by submodules.
pub(crate) fn default_true() -> bool {
    true
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub ad_skip: AdSkipConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Browser launch and connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Profile directory; defaults to `~/.streamcheck/browser-profile`.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    /// How long to wait for a freshly launched Chrome to answer.
    #[serde(default = "default_launch_timeout_ms")]
    pub launch_timeout_ms: u64,

    /// Upper bound for a single CDP request.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            profile_dir: None,
            launch_timeout_ms: default_launch_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl BrowserConfig {
    /// Get the profile directory, falling back to the per-user default.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".streamcheck")
                .join("browser-profile")
        })
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_millis(self.launch_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

fn default_launch_timeout_ms() -> u64 {
    6000
}

fn default_request_timeout_ms() -> u64 {
    30000
}

/// Target site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,

    /// How long to wait for the `<video>` element after opening a result.
    #[serde(default = "default_video_timeout_ms")]
    pub video_timeout_ms: u64,

    /// How long to wait for the player to report `paused` after a click.
    #[serde(default = "default_pause_timeout_ms")]
    pub pause_timeout_ms: u64,

    #[serde(default)]
    pub selectors: SiteSelectors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            search_timeout_ms: default_search_timeout_ms(),
            video_timeout_ms: default_video_timeout_ms(),
            pause_timeout_ms: default_pause_timeout_ms(),
            selectors: SiteSelectors::default(),
        }
    }
}

impl SiteConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    pub fn video_timeout(&self) -> Duration {
        Duration::from_millis(self.video_timeout_ms)
    }

    pub fn pause_timeout(&self) -> Duration {
        Duration::from_millis(self.pause_timeout_ms)
    }
}

fn default_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    30000
}

fn default_search_timeout_ms() -> u64 {
    60000
}

fn default_video_timeout_ms() -> u64 {
    30000
}

fn default_pause_timeout_ms() -> u64 {
    5000
}

/// UI selectors used by the site page object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub search_box: String,
    pub search_button: String,
    pub search_result: String,
    pub video_player: String,
    pub play_button: String,
    pub video: String,
    pub captions_button: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            search_box: r#"input[placeholder="Search"]"#.to_string(),
            search_button: "button#search-icon-legacy".to_string(),
            search_result: "ytd-video-renderer".to_string(),
            video_player: ".html5-video-player".to_string(),
            play_button: ".ytp-play-button".to_string(),
            video: "video".to_string(),
            captions_button: r#"button[aria-label*="Subtitles"]"#.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
