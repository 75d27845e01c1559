//! Search lifecycle: validate the pasted link, hand out a request ticket,
//! and fold the request's outcome back into [`SearchState`].
//!
//! The controller does no I/O itself. `submit` returns a [`SearchTicket`]
//! that the caller turns into an HTTP request; the outcome comes back through
//! [`SearchController::complete`]. Every ticket carries a sequence number so
//! that only the most recently initiated search can change the state.

pub mod state;
pub mod validate;

use tokio_util::sync::CancellationToken;

use crate::api::types::ProcessResult;
use crate::event::ApiResult;

pub use state::{SearchError, SearchState};
pub use validate::validate_query;

/// A request the caller must perform on behalf of the controller.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub seq: u64,
    /// The validated, trimmed media link.
    pub url: String,
    /// Cancelled when a newer search supersedes this one.
    pub cancel: CancellationToken,
}

#[derive(Debug, Default)]
pub struct SearchController {
    state: SearchState,
    last_seq: u64,
    in_flight: Option<CancellationToken>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn result(&self) -> Option<&ProcessResult> {
        self.state.result()
    }

    pub fn error(&self) -> Option<SearchError> {
        self.state.error()
    }

    /// Start a new search from raw user input.
    ///
    /// Returns `None` when the input is rejected; the state then holds the
    /// validation error and no request must be issued.
    pub fn submit(&mut self, raw_input: &str) -> Option<SearchTicket> {
        // Any newer submit, valid or not, supersedes what is in flight.
        self.last_seq += 1;
        if let Some(token) = self.in_flight.take() {
            tracing::debug!("cancelling superseded search");
            token.cancel();
        }

        let url = match validate_query(raw_input) {
            Ok(url) => url.to_owned(),
            Err(e) => {
                tracing::debug!("rejected search input: {e}");
                self.state = SearchState::Error(SearchError::Validation);
                return None;
            }
        };

        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        self.state = SearchState::Loading;
        tracing::info!(seq = self.last_seq, %url, "search started");

        Some(SearchTicket {
            seq: self.last_seq,
            url,
            cancel,
        })
    }

    /// Cancel the in-flight request, if any, and drop its eventual outcome.
    /// The state is left as is.
    pub fn abandon(&mut self) {
        if let Some(token) = self.in_flight.take() {
            tracing::debug!(seq = self.last_seq, "abandoning in-flight search");
            token.cancel();
            self.last_seq += 1;
        }
    }

    /// Apply the outcome of the request issued for ticket `seq`.
    ///
    /// Outcomes of superseded tickets are dropped. Returns whether the state
    /// changed.
    pub fn complete(&mut self, seq: u64, outcome: ApiResult<Option<ProcessResult>>) -> bool {
        if seq != self.last_seq {
            tracing::debug!(seq, latest = self.last_seq, "ignoring stale search response");
            return false;
        }
        self.in_flight = None;

        self.state = match outcome {
            Ok(Some(result)) if result.has_tracks() => {
                tracing::info!(seq, tracks = result.tracks().len(), "search succeeded");
                SearchState::Success {
                    result,
                    warning: None,
                }
            }
            Ok(Some(result)) => {
                tracing::info!(seq, "search returned no tracks");
                SearchState::Success {
                    result,
                    warning: Some(SearchError::DataShape),
                }
            }
            Ok(None) => {
                tracing::info!(seq, "search returned no payload");
                SearchState::Error(SearchError::DataShape)
            }
            Err(e) => {
                tracing::warn!(seq, "search request failed: {e}");
                SearchState::Error(SearchError::Transport)
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::types::Track;

    fn track(time: &str, title: &str) -> Track {
        Track {
            time: time.into(),
            title: title.into(),
        }
    }

    fn mix() -> ProcessResult {
        ProcessResult {
            title: "Mix 1".into(),
            kind: "youtube".into(),
            tracks: Some(vec![track("00:00", "Intro"), track("03:12", "Track 2")]),
        }
    }

    fn transport_failure() -> ApiResult<Option<ProcessResult>> {
        Err(Arc::new("HTTP error: connection refused".to_string()))
    }

    #[test]
    fn starts_idle() {
        let controller = SearchController::new();
        assert_eq!(controller.state(), &SearchState::Idle);
        assert!(!controller.is_loading());
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn blank_input_never_issues_a_request() {
        for raw in ["", "   ", "\t\n"] {
            let mut controller = SearchController::new();
            assert!(controller.submit(raw).is_none());
            assert_eq!(controller.state(), &SearchState::Error(SearchError::Validation));
            assert_eq!(
                controller.error().unwrap().to_string(),
                "Please paste a YouTube or SoundCloud link."
            );
        }
    }

    #[test]
    fn valid_input_enters_loading_with_trimmed_link() {
        let mut controller = SearchController::new();
        let ticket = controller
            .submit("  https://youtube.com/watch?v=abc ")
            .unwrap();
        assert_eq!(ticket.url, "https://youtube.com/watch?v=abc");
        assert!(controller.is_loading());
        assert_eq!(controller.result(), None);
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn success_keeps_tracks_in_order() {
        let mut controller = SearchController::new();
        let ticket = controller.submit("https://youtube.com/watch?v=abc").unwrap();
        assert!(controller.complete(ticket.seq, Ok(Some(mix()))));

        let result = controller.result().unwrap();
        assert_eq!(result.title, "Mix 1");
        assert_eq!(result.kind, "youtube");
        assert_eq!(result.tracks(), mix().tracks());
        assert_eq!(controller.error(), None);
        assert!(!controller.is_loading());
    }

    #[test]
    fn empty_tracks_keep_payload_alongside_error() {
        let mut controller = SearchController::new();
        let ticket = controller.submit("https://soundcloud.com/a/set").unwrap();
        let set = ProcessResult {
            title: "Set".into(),
            kind: "soundcloud".into(),
            tracks: Some(vec![]),
        };
        controller.complete(ticket.seq, Ok(Some(set)));

        assert_eq!(controller.error(), Some(SearchError::DataShape));
        assert_eq!(
            controller.error().unwrap().to_string(),
            "No tracks found for the provided URL."
        );
        let result = controller.result().unwrap();
        assert_eq!(result.title, "Set");
        assert_eq!(result.kind, "soundcloud");
        assert!(!controller.is_loading());
    }

    #[test]
    fn missing_tracks_is_a_data_shape_error() {
        let mut controller = SearchController::new();
        let ticket = controller.submit("x").unwrap();
        let partial = ProcessResult {
            title: String::new(),
            kind: String::new(),
            tracks: None,
        };
        controller.complete(ticket.seq, Ok(Some(partial)));
        assert_eq!(controller.error(), Some(SearchError::DataShape));
        assert!(controller.result().is_some());
    }

    #[test]
    fn absent_payload_is_a_data_shape_error_without_result() {
        let mut controller = SearchController::new();
        let ticket = controller.submit("x").unwrap();
        controller.complete(ticket.seq, Ok(None));
        assert_eq!(controller.state(), &SearchState::Error(SearchError::DataShape));
        assert_eq!(controller.result(), None);
    }

    #[test]
    fn transport_failure_clears_result() {
        let mut controller = SearchController::new();
        let first = controller.submit("x").unwrap();
        controller.complete(first.seq, Ok(Some(mix())));

        let second = controller.submit("x").unwrap();
        controller.complete(second.seq, transport_failure());

        assert_eq!(controller.state(), &SearchState::Error(SearchError::Transport));
        assert_eq!(
            controller.error().unwrap().to_string(),
            "Error fetching data. Check the link or backend."
        );
        assert_eq!(controller.result(), None);
    }

    #[test]
    fn new_search_clears_prior_error_and_result() {
        let mut controller = SearchController::new();
        controller.submit("");
        assert!(controller.error().is_some());

        let ticket = controller.submit("x").unwrap();
        assert_eq!(controller.state(), &SearchState::Loading);
        controller.complete(ticket.seq, Ok(Some(mix())));

        controller.submit("y").unwrap();
        assert_eq!(controller.state(), &SearchState::Loading);
    }

    #[test]
    fn invalid_submit_after_success_goes_straight_to_error() {
        let mut controller = SearchController::new();
        let ticket = controller.submit("x").unwrap();
        controller.complete(ticket.seq, Ok(Some(mix())));

        assert!(controller.submit("  ").is_none());
        assert_eq!(controller.state(), &SearchState::Error(SearchError::Validation));
    }

    #[test]
    fn repeated_search_reaches_same_terminal_state() {
        let mut controller = SearchController::new();
        let first = controller.submit("x").unwrap();
        controller.complete(first.seq, Ok(Some(mix())));
        let after_first = controller.state().clone();

        let second = controller.submit("x").unwrap();
        controller.complete(second.seq, Ok(Some(mix())));
        assert_eq!(controller.state(), &after_first);
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut controller = SearchController::new();
        let slow = controller.submit("https://youtube.com/watch?v=old").unwrap();
        let fast = controller.submit("https://youtube.com/watch?v=new").unwrap();
        assert!(fast.seq > slow.seq);

        assert!(controller.complete(fast.seq, Ok(Some(mix()))));
        assert!(!controller.complete(slow.seq, transport_failure()));

        assert_eq!(controller.result().unwrap().title, "Mix 1");
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn resubmit_cancels_in_flight_request() {
        let mut controller = SearchController::new();
        let first = controller.submit("a").unwrap();
        assert!(!first.cancel.is_cancelled());

        let second = controller.submit("b").unwrap();
        assert!(first.cancel.is_cancelled());
        assert!(!second.cancel.is_cancelled());
    }

    #[test]
    fn abandon_cancels_and_ignores_late_outcome() {
        let mut controller = SearchController::new();
        let pending = controller.submit("a").unwrap();
        controller.abandon();
        assert!(pending.cancel.is_cancelled());
        assert!(!controller.complete(pending.seq, Ok(Some(mix()))));
    }

    #[test]
    fn abandon_without_request_keeps_state() {
        let mut controller = SearchController::new();
        let ticket = controller.submit("a").unwrap();
        controller.complete(ticket.seq, Ok(Some(mix())));
        controller.abandon();
        assert_eq!(controller.result().unwrap().title, "Mix 1");
    }

    #[test]
    fn invalid_submit_supersedes_in_flight_request() {
        let mut controller = SearchController::new();
        let pending = controller.submit("a").unwrap();
        assert!(controller.submit("").is_none());
        assert!(pending.cancel.is_cancelled());

        assert!(!controller.complete(pending.seq, Ok(Some(mix()))));
        assert_eq!(controller.state(), &SearchState::Error(SearchError::Validation));
    }
}
