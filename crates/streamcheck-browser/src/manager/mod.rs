//! Browser instance manager.
//!
//! Launches Chrome with a persistent profile when nothing answers on the
//! debug port, then hands out one [`CdpPage`](crate::CdpPage) per tab.

mod manager_core;
mod manager_pages;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::BrowserError;

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
