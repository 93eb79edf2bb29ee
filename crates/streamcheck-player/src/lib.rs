//! # streamcheck Player
//!
//! Everything that drives the video site through a
//! [`PageHandle`](streamcheck_protocols::PageHandle):
//!
//! - [`ad_skip`] - detect an interstitial ad and try to dismiss it
//! - [`video`] - play / pause / seek on the `<video>` element
//! - [`VideoSitePage`] - page object binding the site's selectors
//!
//! The BDD suite lives in `tests/video_player.rs` and is enabled with the
//! `browser-tests` feature.

pub mod ad_skip;
pub mod site_page;
pub mod video;

pub use ad_skip::{AdResolution, AdSkipController};
pub use site_page::{failure_screenshot_name, VideoSitePage};
pub use video::PlaybackChange;

#[cfg(test)]
mod testing;
