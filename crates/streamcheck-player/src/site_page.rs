//! Page object for the video site.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use streamcheck_config::{AdSkipConfig, SiteConfig};
use streamcheck_protocols::{Condition, PageError, PageHandle};

use crate::ad_skip::{AdResolution, AdSkipController};
use crate::video::{self, video_script, PlaybackChange};

/// Immediate visibility checks don't wait for the element to appear.
const VISIBILITY_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// Site interactions expressed in terms of [`SiteConfig`] selectors.
pub struct VideoSitePage {
    page: Arc<dyn PageHandle>,
    site: SiteConfig,
    ads: AdSkipController,
}

impl VideoSitePage {
    pub fn new(page: Arc<dyn PageHandle>, site: SiteConfig, ad_skip: AdSkipConfig) -> Self {
        Self {
            page,
            site,
            ads: AdSkipController::new(ad_skip),
        }
    }

    pub fn page(&self) -> &dyn PageHandle {
        self.page.as_ref()
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Open the home page and wait for the search box.
    pub async fn goto(&self) -> Result<(), PageError> {
        let timeout = self.site.navigation_timeout();
        self.page.navigate(&self.site.base_url, timeout).await?;
        self.page
            .wait_for_condition(&Condition::visible(&self.site.selectors.search_box), timeout)
            .await?;
        info!("Opened {}", self.site.base_url);
        Ok(())
    }

    pub async fn is_search_box_visible(&self) -> Result<bool, PageError> {
        self.page
            .is_visible(&self.site.selectors.search_box, VISIBILITY_CHECK_TIMEOUT)
            .await
    }

    /// Type `keyword`, submit with Enter and wait for the first result.
    pub async fn search(&self, keyword: &str) -> Result<(), PageError> {
        let search_box = &self.site.selectors.search_box;
        self.page.fill(search_box, keyword).await?;
        self.page.press(search_box, "Enter").await?;
        self.page
            .wait_for_condition(
                &Condition::attached(&self.site.selectors.search_result),
                self.site.search_timeout(),
            )
            .await?;
        info!("Searched for \"{}\"", keyword);
        Ok(())
    }

    pub async fn search_result_count(&self) -> Result<usize, PageError> {
        self.page.count(&self.site.selectors.search_result).await
    }

    /// Open the first search result and wait for its `<video>`.
    pub async fn click_first_video(&self) -> Result<(), PageError> {
        let timeout = self.site.video_timeout();
        self.page
            .click(&self.site.selectors.search_result, timeout)
            .await?;
        self.page
            .wait_for_condition(&Condition::attached(&self.site.selectors.video), timeout)
            .await
    }

    pub async fn current_time(&self) -> Result<f64, PageError> {
        self.page
            .evaluate_f64(&self.video_script("return video ? video.currentTime : 0;"))
            .await
    }

    pub async fn is_paused(&self) -> Result<bool, PageError> {
        self.page
            .evaluate_bool(&self.video_script("return video ? video.paused : false;"))
            .await
    }

    pub async fn playback_rate(&self) -> Result<f64, PageError> {
        self.page
            .evaluate_f64(&self.video_script("return video ? video.playbackRate : 1;"))
            .await
    }

    pub async fn set_playback_rate(&self, rate: f64) -> Result<(), PageError> {
        self.page
            .evaluate(&self.video_script(&format!(
                "if (video) video.playbackRate = {}; return null;",
                rate
            )))
            .await?;
        Ok(())
    }

    /// Click the captions button. Returns `false` when the player has none.
    pub async fn toggle_captions(&self) -> Result<bool, PageError> {
        let button = &self.site.selectors.captions_button;
        if self.page.count(button).await? == 0 {
            debug!("No captions button on this video");
            return Ok(false);
        }
        self.page.click(button, self.site.video_timeout()).await?;
        Ok(true)
    }

    /// Whether the video element carries a subtitles track.
    pub async fn captions_available(&self) -> Result<bool, PageError> {
        self.page
            .evaluate_bool(&format!(
                "document.querySelectorAll({}).length > 0",
                serde_json::Value::String(format!(
                    "{} track[kind=\"subtitles\"]",
                    self.site.selectors.video
                ))
            ))
            .await
    }

    pub async fn take_screenshot(&self, path: &Path) -> Result<(), PageError> {
        self.page.screenshot(path).await
    }

    pub async fn title(&self) -> Result<String, PageError> {
        self.page.title().await
    }

    pub async fn skip_ads_if_present(&self) -> AdResolution {
        self.ads.resolve_ad(self.page.as_ref()).await
    }

    pub async fn play(&self) -> Result<PlaybackChange, PageError> {
        video::play_video(self.page.as_ref(), &self.site).await
    }

    pub async fn pause(&self) -> Result<PlaybackChange, PageError> {
        video::pause_video(self.page.as_ref(), &self.site).await
    }

    pub async fn seek(&self, seconds: f64) -> Result<PlaybackChange, PageError> {
        video::seek_video(self.page.as_ref(), &self.site, seconds).await
    }

    fn video_script(&self, body: &str) -> String {
        video_script(&self.site.selectors.video, body)
    }
}

/// File name for a failed scenario's screenshot:
/// `Play and pause a video` -> `Play_and_pause_a_video.png`.
///
/// The report generator looks screenshots up by the same stem.
pub fn failure_screenshot_name(scenario_name: &str) -> String {
    format!(
        "{}.png",
        scenario_name.split_whitespace().collect::<Vec<_>>().join("_")
    )
}

#[cfg(test)]
#[path = "site_page_tests.rs"]
mod tests;
