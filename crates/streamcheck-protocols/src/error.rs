//! Page capability errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Unexpected evaluation result: {0}")]
    UnexpectedValue(String),

    #[error("Page closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PageError {
    /// Whether this error came from a bounded wait running out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PageError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found() {
        let err = PageError::ElementNotFound(".ytp-ad-skip-button".to_string());
        assert!(err.to_string().contains("Element not found"));
        assert!(err.to_string().contains(".ytp-ad-skip-button"));
    }

    #[test]
    fn test_timeout_is_timeout() {
        let err = PageError::Timeout("click".to_string());
        assert!(err.is_timeout());
        assert!(err.to_string().contains("Timed out"));
    }

    #[test]
    fn test_closed_is_not_timeout() {
        assert!(!PageError::Closed.is_timeout());
        assert_eq!(PageError::Closed.to_string(), "Page closed");
    }

    #[test]
    fn test_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PageError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }
}
