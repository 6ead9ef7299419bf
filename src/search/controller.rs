use tracing::{debug, info, warn};

use crate::{
    http::{ApiError, SearchBackend},
    search::model::ResultRecord,
};

/// Shown for every failed search. Failure details only go to the log.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch results. Try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<ResultRecord>),
    Error(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Records currently on screen; empty in every state but `Success`.
    pub fn results(&self) -> &[ResultRecord] {
        match self {
            SearchState::Success(results) => results,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Issued by [`SearchController::submit`]. The holder performs exactly one
/// request for `query` and hands the outcome back together with `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    state: SearchState,
    latest: u64,
    pending: Option<u64>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Starts a search for the trimmed query. Blank queries are ignored and
    /// yield no ticket.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.latest += 1;
        self.pending = Some(self.latest);
        self.state = SearchState::Loading;

        info!(seq = self.latest, query = trimmed, "search_submitted");
        Some(SearchTicket {
            seq: self.latest,
            query: trimmed.to_string(),
        })
    }

    /// Applies the outcome of the request tagged `seq`. Anything but the most
    /// recent pending request is dropped without touching state.
    pub fn resolve(
        &mut self,
        seq: u64,
        outcome: Result<Vec<ResultRecord>, ApiError>,
    ) -> Resolution {
        if self.pending != Some(seq) {
            debug!(seq, latest = self.latest, "search_stale_discarded");
            return Resolution::Stale;
        }
        self.pending = None;

        self.state = match outcome {
            Ok(results) => {
                info!(seq, count = results.len(), "search_succeeded");
                SearchState::Success(results)
            }
            Err(err) => {
                match err.status() {
                    Some(status) => warn!(seq, %status, "search_failed"),
                    None => warn!(seq, error = %err, "search_failed"),
                }
                SearchState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
        Resolution::Applied
    }

    /// Submits and awaits `backend` in one step. Returns `None` when the query
    /// was blank.
    pub async fn search<B>(&mut self, backend: &B) -> Option<Resolution>
    where
        B: SearchBackend + ?Sized,
    {
        let ticket = self.submit()?;
        let outcome = backend.search(&ticket.query).await;
        Some(self.resolve(ticket.seq, outcome))
    }

    pub fn reset(&mut self) {
        if let Some(seq) = self.pending.take() {
            debug!(seq, "search_abandoned");
        }
        self.query.clear();
        self.state = SearchState::Idle;
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }
}
