//! Playback actions on the page's `<video>` element.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use streamcheck_config::SiteConfig;
use streamcheck_protocols::{Condition, PageError, PageHandle};

/// What a playback action did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum PlaybackChange {
    Started,
    AlreadyPlaying,
    Paused,
    AlreadyPaused,
    Seeked { from: f64, to: f64 },
}

/// Wrap `body` in a function that has the first video element bound to
/// `video` (possibly `null`).
pub(crate) fn video_script(selector: &str, body: &str) -> String {
    format!(
        "(() => {{ const video = document.querySelector({}); {} }})()",
        Value::String(selector.to_string()),
        body
    )
}

async fn video_paused(page: &dyn PageHandle, site: &SiteConfig) -> Result<bool, PageError> {
    page.evaluate_bool(&video_script(
        &site.selectors.video,
        "return video ? video.paused : false;",
    ))
    .await
}

/// Click play if the video is paused.
pub async fn play_video(page: &dyn PageHandle, site: &SiteConfig) -> Result<PlaybackChange, PageError> {
    if video_paused(page, site).await? {
        page.click(&site.selectors.play_button, site.video_timeout())
            .await?;
        info!("Video started");
        Ok(PlaybackChange::Started)
    } else {
        info!("Video is already playing");
        Ok(PlaybackChange::AlreadyPlaying)
    }
}

/// Pause a playing video and wait until the element reports `paused`.
pub async fn pause_video(page: &dyn PageHandle, site: &SiteConfig) -> Result<PlaybackChange, PageError> {
    if video_paused(page, site).await? {
        info!("Video is already paused");
        return Ok(PlaybackChange::AlreadyPaused);
    }

    // Controls only render while the pointer is over the player.
    page.hover(&site.selectors.video_player, site.video_timeout())
        .await?;
    page.click(&site.selectors.play_button, site.video_timeout())
        .await?;

    let paused = video_script(&site.selectors.video, "return video ? video.paused : false;");
    page.wait_for_condition(&Condition::Script(paused), site.pause_timeout())
        .await?;

    info!("Video paused");
    Ok(PlaybackChange::Paused)
}

/// Move the playhead forward by `seconds`.
pub async fn seek_video(
    page: &dyn PageHandle,
    site: &SiteConfig,
    seconds: f64,
) -> Result<PlaybackChange, PageError> {
    let script = video_script(
        &site.selectors.video,
        &format!(
            "if (!video) return null; const from = video.currentTime; \
             video.currentTime += {}; return [from, video.currentTime];",
            seconds
        ),
    );

    let value = page.evaluate(&script).await?;
    match (value[0].as_f64(), value[1].as_f64()) {
        (Some(from), Some(to)) => {
            info!("Skipped ahead {} seconds", seconds);
            Ok(PlaybackChange::Seeked { from, to })
        }
        _ if value.is_null() => Err(PageError::ElementNotFound(site.selectors.video.clone())),
        _ => Err(PageError::UnexpectedValue(format!(
            "expected [from, to], got {}",
            value
        ))),
    }
}

#[cfg(test)]
#[path = "video_tests.rs"]
mod tests;
