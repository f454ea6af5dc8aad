use thiserror::Error;

/// Errors raised by the search and navigation core.
///
/// All variants are recoverable by the user. None of them should reach the
/// host uncaught: callers route them to a [`crate::notify::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    /// Search options are malformed; callers fall back to defaults
    #[error("Invalid search options: {0}")]
    Configuration(String),

    /// User-entered floor number is malformed or out of range
    #[error("{0}")]
    Validation(String),

    /// The message exists but the host has not rendered it yet
    #[error("Message {index} is not loaded; scroll up or load more history to reach it")]
    NotRendered { index: usize },
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
