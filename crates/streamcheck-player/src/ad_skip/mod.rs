//! Interstitial ad detection and skipping.
//!
//! [`AdSkipController::resolve_ad`] waits for an ad to load, decides whether
//! one is showing, then polls the skip candidates for a bounded number of
//! rounds. If no candidate can be clicked it either returns straight away or
//! waits for the ad to end, depending on
//! [`ExhaustionPolicy`](streamcheck_config::ExhaustionPolicy). Every failure
//! is contained: the caller always gets an [`AdResolution`] back.

mod controller;
mod detection;
mod rounds;
mod types;

pub use controller::AdSkipController;
pub use detection::find_text_marker;
pub use types::{AdResolution, AdSignal, AttemptFailure, FallbackOutcome, RoundResult};
