//! Page capability.

mod condition;
mod traits;

pub use condition::Condition;
pub use traits::PageHandle;
