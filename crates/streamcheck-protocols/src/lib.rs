//! # streamcheck Protocols
//!
//! Interface definitions shared by the streamcheck crates.
//! Contains only traits and value types - no browser implementation.
//!
//! ## Core Traits
//!
//! - [`PageHandle`] - Capability over a single live browser page

pub mod error;
pub mod page;

pub use error::PageError;
pub use page::{Condition, PageHandle};
