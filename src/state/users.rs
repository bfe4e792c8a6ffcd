// User list state.
// Search input, debouncing and generation tracking for the listing/search view.

use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::model::User;
use crate::paging::Pagination;

use super::list::SelectableList;

/// Rows from the end of the list at which the next page is requested.
pub const APPEND_THRESHOLD: usize = 5;

/// Holds back a typed query until input has been quiet for `delay`.
#[derive(Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the pending query; the timer restarts.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    /// Take the pending query once it has waited long enough.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if !ready {
            return None;
        }
        self.pending.take().map(|(query, _)| query)
    }
}

/// State behind the users view.
#[derive(Debug)]
pub struct UserListState {
    pub list: SelectableList<User>,
    /// Text in the search box.
    pub input: String,
    /// Whether keystrokes go to the search box.
    pub editing: bool,
    /// Query the current pager was built for.
    active_query: String,
    /// Bumped by every refresh or new query; older results are dropped.
    generation: u64,
    /// A full refresh is in flight.
    refreshing: bool,
    /// Stops near-end appends from retrying the network after a failure until
    /// the next refresh. Cached rows past the window still page in.
    append_blocked: bool,
    debouncer: QueryDebouncer,
}

impl UserListState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            list: SelectableList::new(),
            input: String::new(),
            editing: false,
            active_query: String::new(),
            generation: 0,
            refreshing: false,
            append_blocked: false,
            debouncer: QueryDebouncer::new(debounce),
        }
    }

    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    pub fn is_search(&self) -> bool {
        !self.active_query.trim().is_empty()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.list.selected_item()
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.input.push(c);
        self.debouncer.schedule(self.input.clone(), now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        if self.input.pop().is_some() {
            self.debouncer.schedule(self.input.clone(), now);
        }
    }

    pub fn clear_input(&mut self, now: Instant) {
        if !self.input.is_empty() {
            self.input.clear();
            self.debouncer.schedule(String::new(), now);
        }
    }

    /// A settled query that differs from the one already shown.
    pub fn poll_query(&mut self, now: Instant) -> Option<String> {
        let query = self.debouncer.poll(now)?;
        (query.trim() != self.active_query.trim()).then_some(query)
    }

    /// Start loading `query` from scratch. Returns the generation results must carry.
    pub fn begin_query(&mut self, query: impl Into<String>) -> u64 {
        self.active_query = query.into();
        self.generation += 1;
        self.refreshing = true;
        self.append_blocked = false;
        self.list.reset();
        self.list.set_loading();
        self.generation
    }

    /// Reload the current query, keeping rows on screen until results arrive.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.refreshing = true;
        self.append_blocked = false;
        if !self.list.data.is_loaded() {
            self.list.set_loading();
        }
        self.generation
    }

    /// Claim the next append if the selection is near the end.
    pub fn begin_append(&mut self) -> Option<u64> {
        if self.refreshing || self.append_blocked || !self.list.near_end(APPEND_THRESHOLD) {
            return None;
        }
        self.list.set_loading_more(true);
        Some(self.generation)
    }

    /// Cached rows shown while the refresh is still running.
    pub fn apply_cached(&mut self, generation: u64, users: Vec<User>) -> bool {
        if generation != self.generation || users.is_empty() {
            return false;
        }
        self.list.set_loaded(users, false);
        true
    }

    /// Finished refresh or append.
    pub fn apply_loaded(&mut self, generation: u64, users: Vec<User>, status: Pagination) -> bool {
        if generation != self.generation {
            return false;
        }
        self.refreshing = false;
        self.list.set_loaded(users, status.is_end());
        true
    }

    /// Failed refresh or append. `users` is whatever the pager still holds;
    /// `cached_more` says whether the cache can serve further pages offline.
    pub fn apply_failed(
        &mut self,
        generation: u64,
        users: Vec<User>,
        error: &AppError,
        cached_more: bool,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.refreshing = false;
        self.append_blocked = !cached_more;
        if users.is_empty() {
            self.list.set_error(error.to_string());
        } else {
            self.list.set_loaded(users, false);
        }
        true
    }
}
