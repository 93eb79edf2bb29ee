//! Minimal Chrome DevTools Protocol client.
//!
//! One WebSocket to the browser; page sessions are attached in flattened
//! mode and share it.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//! let page = client.new_page("about:blank").await?;
//! page.navigate("https://www.youtube.com", Duration::from_secs(30)).await?;
//! ```

mod client;
mod error;
pub(crate) mod protocol;
mod session;
pub(crate) mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use session::PageSession;
