use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, Result};

pub const DEFAULT_MAX_RESULTS: usize = 200;
pub const DEFAULT_PREVIEW_RADIUS: usize = 40;

/// Per-search options, passed by the caller on every invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    /// Scan stops once this many matches have been produced (must be >= 1)
    pub max_results: usize,
    /// Characters of context kept on each side of the first match
    pub preview_radius: usize,
    /// Wrap occurrences inside the preview in highlight markers
    pub highlight: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            max_results: DEFAULT_MAX_RESULTS,
            preview_radius: DEFAULT_PREVIEW_RADIUS,
            highlight: true,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(NavigatorError::Configuration(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return these options if valid, otherwise the defaults
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default search options");
                Self::default()
            }
        }
    }
}

/// One search hit, derived from a transcript snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub message_index: usize,
    pub author: String,
    /// Context window around the first match, possibly with ellipsis and highlight markers.
    /// `&` and `<` from the message are escaped; see [`crate::search::preview`].
    pub preview: String,
    pub raw_text: String,
}
