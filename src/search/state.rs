use thiserror::Error;

use crate::api::types::ProcessResult;

/// User-facing search failures. `Display` is the message shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please paste a YouTube or SoundCloud link.")]
    Validation,
    #[error("Error fetching data. Check the link or backend.")]
    Transport,
    #[error("No tracks found for the provided URL.")]
    DataShape,
}

/// The client's view of the current search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    /// A payload was received. `warning` is set when it carried no usable
    /// tracks; title and type stay displayable alongside the message.
    Success {
        result: ProcessResult,
        warning: Option<SearchError>,
    },
    Error(SearchError),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn result(&self) -> Option<&ProcessResult> {
        match self {
            SearchState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The message to surface, if any.
    pub fn error(&self) -> Option<SearchError> {
        match self {
            SearchState::Error(e) => Some(*e),
            SearchState::Success { warning, .. } => *warning,
            _ => None,
        }
    }
}
