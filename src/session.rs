use tracing::{debug, info, warn};

use crate::client::JobSource;
use crate::error::SearchError;
use crate::models::{JobRecord, SearchFilters, SortOrder};
use crate::pagination::{clamp_page, next_page, PageDirection, MIN_PAGE};
use crate::query::{build_query, SearchQuery};
use crate::sort::sort_jobs;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub credential: Option<String>,
    pub current_page: u32,
    pub sort_order: SortOrder,
    pub results: Vec<JobRecord>,
}

impl SearchState {
    pub fn new(credential: Option<String>, sort_order: SortOrder) -> Self {
        Self {
            credential,
            current_page: MIN_PAGE,
            sort_order,
            results: Vec::new(),
        }
    }
}

/// Which of the mutually exclusive screens is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Loading,
    Error(SearchError),
    Results,
}

/// A search that has been started. Only the most recent ticket's outcome is applied.
#[derive(Debug)]
pub struct PendingSearch {
    id: u64,
    pub query: SearchQuery,
    pub credential: String,
}

pub struct Session {
    state: SearchState,
    display: DisplayState,
    latest_ticket: u64,
}

impl Session {
    pub fn new(state: SearchState) -> Self {
        Self {
            state,
            display: DisplayState::Idle,
            latest_ticket: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Enters Loading for the current page. Fails before any network work
    /// when no credential is configured; prior results stay untouched then.
    pub fn begin_search(&mut self, filters: &SearchFilters) -> Result<PendingSearch, SearchError> {
        let Some(credential) = self.state.credential.clone() else {
            warn!("Search attempted without an API key");
            self.display = DisplayState::Error(SearchError::MissingCredential);
            return Err(SearchError::MissingCredential);
        };

        self.state.current_page = clamp_page(self.state.current_page as i64);
        self.latest_ticket += 1;
        self.state.results.clear();
        self.display = DisplayState::Loading;

        let query = build_query(filters, self.state.current_page);
        debug!(ticket = self.latest_ticket, query = %query.query, page = query.page, "Search started");
        Ok(PendingSearch {
            id: self.latest_ticket,
            query,
            credential,
        })
    }

    /// Applies a settled fetch. Returns `false` when a newer search has
    /// started since `pending` was issued; its outcome is dropped.
    pub fn finish_search(
        &mut self,
        pending: PendingSearch,
        outcome: Result<Vec<JobRecord>, SearchError>,
    ) -> bool {
        if pending.id != self.latest_ticket {
            debug!(ticket = pending.id, latest = self.latest_ticket, "Discarding superseded search result");
            return false;
        }

        match outcome {
            Ok(mut jobs) => {
                sort_jobs(&mut jobs, self.state.sort_order);
                info!(count = jobs.len(), page = self.state.current_page, "Search succeeded");
                self.state.results = jobs;
                self.display = DisplayState::Results;
            }
            Err(err) => {
                match err.detail() {
                    Some(detail) => warn!(error = %err, detail, "Search failed"),
                    None => warn!(error = %err, "Search failed"),
                }
                self.state.results.clear();
                self.display = DisplayState::Error(err);
            }
        }
        true
    }

    pub fn search(&mut self, filters: &SearchFilters, source: &dyn JobSource) -> &DisplayState {
        if let Ok(pending) = self.begin_search(filters) {
            let outcome = source.search(&pending.query, &pending.credential);
            self.finish_search(pending, outcome);
        }
        &self.display
    }

    /// Reorders the current page in place. No fetch, no screen change.
    pub fn set_sort(&mut self, order: SortOrder) {
        self.state.sort_order = order;
        sort_jobs(&mut self.state.results, order);
    }

    /// Moves one page and re-fetches. Returns `false` without fetching when
    /// the page is already at the boundary in that direction.
    pub fn change_page(
        &mut self,
        direction: PageDirection,
        filters: &SearchFilters,
        source: &dyn JobSource,
    ) -> bool {
        if !self.step_page(direction) {
            return false;
        }
        self.search(filters, source);
        true
    }

    /// Moves the page number only. `false` when clamping left it unchanged.
    pub fn step_page(&mut self, direction: PageDirection) -> bool {
        let target = next_page(self.state.current_page, direction);
        if target == self.state.current_page {
            return false;
        }
        self.state.current_page = target;
        true
    }

    /// Jumps straight to `page` (clamped). Used for `--page` on the command line.
    pub fn go_to_page(&mut self, page: u32) {
        self.state.current_page = clamp_page(page as i64);
    }
}
