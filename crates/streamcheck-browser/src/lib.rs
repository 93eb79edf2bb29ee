//! Chrome automation backend for streamcheck.
//!
//! Drives Chrome through the Chrome DevTools Protocol (CDP) over a WebSocket
//! and exposes each open tab as a [`PageHandle`](streamcheck_protocols::PageHandle).
//! Pure Rust, no Node.js runtime involved.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐    WebSocket     ┌──────────────────┐
//! │  BrowserManager  │ ◄──────────────► │   Chrome/Edge    │
//! │  CdpPage (tabs)  │       CDP        │ (launched or     │
//! └──────────────────┘                  │  already running)│
//!                                       └──────────────────┘
//! ```
//!
//! ## Setup
//!
//! The manager launches Chrome itself when nothing answers on the debug
//! port. To reuse a running browser instead, start it with:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```

pub mod cdp;
pub mod manager;
mod page;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager};
pub use page::{CdpPage, SelectorQuery};
