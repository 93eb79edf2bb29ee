//! Conditions a page can be asked to wait for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A condition evaluated repeatedly by [`PageHandle::wait_for_condition`].
///
/// [`PageHandle::wait_for_condition`]: super::PageHandle::wait_for_condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Condition {
    /// An element matching the selector is attached and visible.
    Visible(String),

    /// An element matching the selector is attached to the DOM.
    Attached(String),

    /// No element matching any of the selectors is visible.
    AllHidden(Vec<String>),

    /// A JavaScript expression evaluates to a truthy value.
    Script(String),
}

impl Condition {
    pub fn visible(selector: impl Into<String>) -> Self {
        Condition::Visible(selector.into())
    }

    pub fn attached(selector: impl Into<String>) -> Self {
        Condition::Attached(selector.into())
    }

    pub fn script(expression: impl Into<String>) -> Self {
        Condition::Script(expression.into())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Visible(s) => write!(f, "visible({})", s),
            Condition::Attached(s) => write!(f, "attached({})", s),
            Condition::AllHidden(selectors) => write!(f, "all_hidden({})", selectors.join(", ")),
            Condition::Script(expr) => write!(f, "script({})", expr),
        }
    }
}
