// Scripted in-memory `UserApi` for tests.
// Responses are queued per endpoint and every call is recorded.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{GhUsersError, Result};

use super::endpoints::UserApi;
use super::types::{SearchResponse, UserDetailResponse, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { since: i64, per_page: usize },
    Search { query: String, page: u32, per_page: usize },
    Detail { username: String },
}

#[derive(Debug, Default)]
pub struct FakeApi {
    lists: Mutex<VecDeque<Result<Vec<UserSummary>>>>,
    searches: Mutex<VecDeque<Result<SearchResponse>>>,
    details: Mutex<VecDeque<Result<UserDetailResponse>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, response: Result<Vec<UserSummary>>) {
        self.lists.lock().unwrap().push_back(response);
    }

    pub fn push_search(&self, response: Result<SearchResponse>) {
        self.searches.lock().unwrap().push_back(response);
    }

    pub fn push_detail(&self, response: Result<UserDetailResponse>) {
        self.details.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unscripted() -> GhUsersError {
    GhUsersError::Other("no scripted response".to_string())
}

impl UserApi for FakeApi {
    async fn list_users(&self, since: i64, per_page: usize) -> Result<Vec<UserSummary>> {
        self.record(Call::List { since, per_page });
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn search_users(&self, query: &str, page: u32, per_page: usize) -> Result<SearchResponse> {
        self.record(Call::Search {
            query: query.to_string(),
            page,
            per_page,
        });
        self.searches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn user_detail(&self, username: &str) -> Result<UserDetailResponse> {
        self.record(Call::Detail {
            username: username.to_string(),
        });
        self.details
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}

/// Minimal user summary with a predictable login.
pub fn summary(id: i64) -> UserSummary {
    UserSummary {
        id,
        login: format!("user{}", id),
        avatar_url: Some(format!("https://avatars.example.com/u/{}", id)),
        ..Default::default()
    }
}

pub fn summaries(ids: impl IntoIterator<Item = i64>) -> Vec<UserSummary> {
    ids.into_iter().map(summary).collect()
}

pub fn search_page(ids: impl IntoIterator<Item = i64>) -> SearchResponse {
    let items = summaries(ids);
    SearchResponse {
        total_count: items.len() as u64,
        incomplete_results: false,
        items,
    }
}

pub fn detail(id: i64, login: &str) -> UserDetailResponse {
    UserDetailResponse {
        summary: UserSummary {
            id,
            login: login.to_string(),
            avatar_url: Some(format!("https://avatars.example.com/u/{}", id)),
            ..Default::default()
        },
        name: Some("The Octocat".to_string()),
        company: Some("@github".to_string()),
        followers: Some(42),
        following: Some(7),
        public_repos: Some(8),
        ..Default::default()
    }
}

/// Transport-level failure, as a dropped connection would produce.
pub fn network_error() -> GhUsersError {
    GhUsersError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}
