//! Live search-as-you-type coordination.
//!
//! Everything here runs on the host's event loop: timers are deadlines checked
//! by `poll(now)` rather than threads. Rapid keystrokes are coalesced by
//! [`DebouncedSearch`], and [`SearchGeneration`] keeps a late completion for an
//! old query from overwriting results for a newer one.

use std::time::{Duration, Instant};

use crate::models::MatchRecord;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

/// Coalesces rapid input into a single search.
///
/// A new input replaces the pending one (earlier queries are discarded, not
/// queued) and restarts the delay.
#[derive(Debug, Clone)]
pub struct DebouncedSearch {
    delay: Duration,
    pending: Option<PendingQuery>,
}

impl DebouncedSearch {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(PendingQuery { query: query.into(), due: now + self.delay });
    }

    /// Take the pending query if its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            return self.pending.take().map(|p| p.query);
        }
        None
    }

    /// Take the pending query immediately, ignoring the delay
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.query)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

/// Monotonic counter identifying the most recently started search
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchGeneration {
    current: u64,
}

impl SearchGeneration {
    /// Start a new search, invalidating every earlier generation
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }
}

/// A search that has been started and may later be completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// Debounce + generation guard + the results currently on display
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    debounce: DebouncedSearch,
    generation: SearchGeneration,
    displayed_query: String,
    results: Vec<MatchRecord>,
}

impl SearchSession {
    pub fn new(delay: Duration) -> Self {
        Self { debounce: DebouncedSearch::new(delay), ..Self::default() }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.debounce.set_delay(delay);
    }

    /// Record a keystroke; the search fires after the debounce delay
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.debounce.input(query, now);
    }

    /// Start the pending search if its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<SearchTicket> {
        let query = self.debounce.poll(now)?;
        Some(self.begin(query))
    }

    /// Start the pending search right away
    pub fn flush(&mut self) -> Option<SearchTicket> {
        let query = self.debounce.flush()?;
        Some(self.begin(query))
    }

    /// Start a search for `query` immediately, discarding any pending input
    pub fn begin(&mut self, query: impl Into<String>) -> SearchTicket {
        self.debounce.cancel();
        SearchTicket { generation: self.generation.begin(), query: query.into() }
    }

    /// Publish results for `ticket`. Returns false (and keeps the current
    /// results) when a newer search has started since.
    pub fn complete(&mut self, ticket: SearchTicket, results: Vec<MatchRecord>) -> bool {
        if !self.generation.is_current(ticket.generation) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation.current(),
                "Discarding stale search results"
            );
            return false;
        }
        self.displayed_query = ticket.query;
        self.results = results;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn displayed_query(&self) -> &str {
        &self.displayed_query
    }

    pub fn results(&self) -> &[MatchRecord] {
        &self.results
    }

    /// Drop all state (panel teardown)
    pub fn reset(&mut self) {
        self.debounce.cancel();
        self.generation.begin();
        self.displayed_query.clear();
        self.results.clear();
    }
}
