//! Subcommands that drive a real browser.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use streamcheck_browser::{BrowserManager, CdpPage};
use streamcheck_config::Config;
use streamcheck_player::{AdSkipController, VideoSitePage};
use streamcheck_protocols::PageHandle;

/// Open a blank tab, run `journey` on it, then close the tab and shut down
/// the browser (if this process launched it) whatever the journey returned.
async fn with_page<F, Fut>(config: &Config, journey: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(CdpPage) -> Fut,
    Fut: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    let manager = BrowserManager::new(config.browser.clone());
    let page = manager.new_page("about:blank").await?;

    let result = journey(page.clone()).await;

    if let Err(e) = manager.close_page(&page).await {
        warn!("Failed to close page: {}", e);
    }
    if let Err(e) = manager.shutdown_chrome().await {
        warn!("Failed to shut down browser: {}", e);
    }
    result
}

/// Open, search, pick the first video, get past any ad, then play, pause
/// and seek.
pub(crate) async fn run_smoke(
    config: &Config,
    query: &str,
    seek_seconds: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running smoke journey for \"{}\"", query);

    with_page(config, |page| async move {
        let site = VideoSitePage::new(
            Arc::new(page),
            config.site.clone(),
            config.ad_skip.clone(),
        );

        site.goto().await?;
        site.search(query).await?;
        println!("Search results: {}", site.search_result_count().await?);

        site.click_first_video().await?;
        println!("Now watching: {}", site.title().await?);

        let resolution = site.skip_ads_if_present().await;
        println!("Ad: {}", serde_json::to_string(&resolution)?);

        for change in [
            site.play().await?,
            site.pause().await?,
            site.seek(seek_seconds).await?,
        ] {
            println!("Playback: {}", serde_json::to_string(&change)?);
        }

        let screenshot = smoke_screenshot_path(config);
        site.take_screenshot(&screenshot).await?;
        println!("Screenshot: {}", screenshot.display());

        Ok(())
    })
    .await
}

/// Open `url` (or the site's base URL) and resolve whatever ad is showing.
pub(crate) async fn run_skip_ads(
    config: &Config,
    url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = url.unwrap_or(config.site.base_url.as_str()).to_string();

    with_page(config, |page| async move {
        page.navigate(&url, config.site.navigation_timeout()).await?;
        info!("Opened {}", url);

        let controller = AdSkipController::new(config.ad_skip.clone());
        let resolution = controller.resolve_ad(&page).await;
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        Ok(())
    })
    .await
}

fn smoke_screenshot_path(config: &Config) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    config
        .artifacts
        .screenshots_dir
        .join(format!("smoke_{}.png", stamp))
}
