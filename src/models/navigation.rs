use crate::error::NavigatorError;

/// Why a navigation target could not be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Index is outside the transcript
    OutOfRange,
    /// Message exists but is not rendered by the host
    NotRendered,
}

impl NotFoundReason {
    /// User-facing text; each reason calls for a different user action
    pub fn user_message(&self) -> &'static str {
        match self {
            NotFoundReason::OutOfRange => "Invalid message id",
            NotFoundReason::NotRendered => "Floor not loaded, cannot jump",
        }
    }
}

/// Result of resolving a message index to a rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome<E> {
    Found(E),
    NotFound(NotFoundReason),
}

impl<E> NavigationOutcome<E> {
    pub fn is_found(&self) -> bool {
        matches!(self, NavigationOutcome::Found(_))
    }

    /// Convert into a `Result` for callers that prefer `?`
    pub fn into_error(self, index: usize) -> Result<E, NavigatorError> {
        match self {
            NavigationOutcome::Found(element) => Ok(element),
            NavigationOutcome::NotFound(NotFoundReason::OutOfRange) => {
                Err(NavigatorError::Validation(format!("Invalid message id: {}", index)))
            }
            NavigationOutcome::NotFound(NotFoundReason::NotRendered) => {
                Err(NavigatorError::NotRendered { index })
            }
        }
    }
}
