//! BDD suite against the live video site.
//!
//! Run with: cargo test -p streamcheck-player --features browser-tests --test video_player
//!
//! Reads `config/streamcheck.toml` at the workspace root (or the file named
//! by `STREAMCHECK_CONFIG`) and writes Cucumber JSON into the configured
//! reports directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cucumber::{event, given, then, when, writer, World, WriterExt};

use streamcheck_browser::{BrowserManager, CdpPage};
use streamcheck_config::{Config, ConfigLoader};
use streamcheck_player::{failure_screenshot_name, VideoSitePage};

const SCREENSHOT_NAME: &str = "video_playing.png";

#[derive(World, Default)]
pub struct VideoWorld {
    config: Config,
    page: Option<CdpPage>,
    site: Option<VideoSitePage>,
    initial_time: f64,
}

impl fmt::Debug for VideoWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoWorld")
            .field("page", &self.page.as_ref().map(|p| p.target_id().to_string()))
            .field("initial_time", &self.initial_time)
            .finish()
    }
}

impl VideoWorld {
    fn site(&self) -> &VideoSitePage {
        self.site.as_ref().expect("page opened in before hook")
    }

    fn screenshot_path(&self) -> PathBuf {
        self.config.artifacts.screenshots_dir.join(SCREENSHOT_NAME)
    }
}

// ============================================================================
// GIVEN STEPS
// ============================================================================

#[given("I open the video site")]
async fn open_site(w: &mut VideoWorld) {
    w.site().goto().await.expect("site should open");
}

// ============================================================================
// WHEN STEPS
// ============================================================================

#[when(expr = "I search for {string}")]
async fn search_for(w: &mut VideoWorld, keyword: String) {
    w.site().search(&keyword).await.expect("search should return results");
}

#[when("I click the first video")]
async fn click_first_video(w: &mut VideoWorld) {
    w.site().click_first_video().await.expect("first video should open");
}

#[when("I pause the video")]
async fn pause_video(w: &mut VideoWorld) {
    w.site().pause().await.expect("video should pause");
}

#[when(expr = "I seek forward {int} seconds")]
async fn seek_forward(w: &mut VideoWorld, seconds: i32) {
    w.site().seek(f64::from(seconds)).await.expect("seek should succeed");
}

#[when(expr = "I change playback speed to {string}")]
async fn change_speed(w: &mut VideoWorld, speed: String) {
    let rate: f64 = speed.parse().expect("speed should be a number");
    w.site().set_playback_rate(rate).await.expect("rate should be set");
}

#[when("I toggle captions")]
async fn toggle_captions(w: &mut VideoWorld) {
    w.site().toggle_captions().await.expect("captions toggle should not fail");
}

#[when("I skip ads if present")]
async fn skip_ads(w: &mut VideoWorld) {
    let resolution = w.site().skip_ads_if_present().await;
    tracing::info!("Ad handling: {:?}", resolution);
}

// ============================================================================
// THEN STEPS
// ============================================================================

#[then("the search box should be visible")]
async fn search_box_visible(w: &mut VideoWorld) {
    assert!(
        w.site().is_search_box_visible().await.unwrap_or(false),
        "Search box should be visible"
    );
}

#[then("I should see search results")]
async fn see_results(w: &mut VideoWorld) {
    let count = w.site().search_result_count().await.expect("results should be countable");
    assert!(count > 0, "expected search results, got none");
}

#[then("the video should start playing")]
async fn video_playing(w: &mut VideoWorld) {
    w.site().play().await.expect("video should play");
    w.site()
        .page()
        .wait_for_timeout(Duration::from_secs(3))
        .await
        .expect("wait should not fail");
}

#[then("the video should be paused")]
async fn video_paused(w: &mut VideoWorld) {
    assert!(w.site().is_paused().await.expect("paused state"), "Video should be paused");
    w.initial_time = w.site().current_time().await.expect("current time");
}

#[then("the video time should be greater than before")]
async fn time_advanced(w: &mut VideoWorld) {
    let now = w.site().current_time().await.expect("current time");
    assert!(now > w.initial_time, "expected {} > {}", now, w.initial_time);
}

#[then(expr = "the playback speed should be {string}")]
async fn speed_is(w: &mut VideoWorld, expected: String) {
    let rate = w.site().playback_rate().await.expect("playback rate");
    assert_eq!(rate.to_string(), expected);
}

#[then("captions should be visible or gracefully skipped")]
async fn captions_checked(w: &mut VideoWorld) {
    let available = w.site().captions_available().await.unwrap_or(false);
    tracing::info!("Captions {}", if available { "enabled" } else { "not available" });
}

#[then("I take a screenshot")]
async fn take_screenshot(w: &mut VideoWorld) {
    let path = w.screenshot_path();
    w.site().take_screenshot(&path).await.expect("screenshot should be saved");
}

#[then("the screenshot should exist in the screenshots folder")]
async fn screenshot_exists(w: &mut VideoWorld) {
    assert!(w.screenshot_path().exists());
}

#[then("the video title should not be empty")]
async fn title_not_empty(w: &mut VideoWorld) {
    let title = w.site().title().await.expect("title");
    assert!(!title.trim().is_empty());
}

#[then("the video title should be empty")]
async fn title_empty(w: &mut VideoWorld) {
    let title = w.site().title().await.expect("title");
    assert!(title.trim().is_empty());
}

// ============================================================================
// MAIN
// ============================================================================

fn load_config() -> Config {
    let path = std::env::var_os("STREAMCHECK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/streamcheck.toml")
        });
    ConfigLoader::load_or_default(&path).expect("config should parse")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Arc::new(load_config());
    let manager = Arc::new(BrowserManager::new(config.browser.clone()));

    fs::create_dir_all(&config.artifacts.reports_dir).expect("reports dir");
    fs::create_dir_all(&config.artifacts.screenshots_dir).expect("screenshots dir");
    let json = fs::File::create(config.artifacts.reports_dir.join("cucumber_report.json"))
        .expect("JSON report file");

    let (before_config, before_manager) = (config.clone(), manager.clone());
    let (after_config, after_manager) = (config.clone(), manager.clone());

    VideoWorld::cucumber()
        .max_concurrent_scenarios(1)
        .before(move |_feature, _rule, scenario, world| {
            let config = before_config.clone();
            let manager = before_manager.clone();
            Box::pin(async move {
                tracing::info!("Starting scenario: {}", scenario.name);
                let page = manager.new_page("about:blank").await.expect("new page");
                world.config = (*config).clone();
                world.site = Some(VideoSitePage::new(
                    Arc::new(page.clone()),
                    config.site.clone(),
                    config.ad_skip.clone(),
                ));
                world.page = Some(page);
            })
        })
        .after(move |_feature, _rule, scenario, ev, world| {
            let config = after_config.clone();
            let manager = after_manager.clone();
            Box::pin(async move {
                let failed = matches!(
                    ev,
                    event::ScenarioFinished::StepFailed(..)
                        | event::ScenarioFinished::BeforeHookFailed(..)
                );
                let Some(world) = world else { return };

                if let Some(site) = world.site.take() {
                    if failed {
                        let path = config
                            .artifacts
                            .screenshots_dir
                            .join(failure_screenshot_name(&scenario.name));
                        if let Err(e) = site.take_screenshot(&path).await {
                            tracing::warn!("Failure screenshot not saved: {}", e);
                        }
                    }
                }
                if let Some(page) = world.page.take() {
                    let _ = manager.close_page(&page).await;
                }
                tracing::info!("Finished scenario: {}", scenario.name);
            })
        })
        .with_writer(
            writer::Basic::stdout()
                .summarized()
                .tee::<VideoWorld, _>(writer::Json::for_tee(json))
                .normalized(),
        )
        .run(concat!(env!("CARGO_MANIFEST_DIR"), "/features"))
        .await;

    let _ = manager.shutdown_chrome().await;
}

