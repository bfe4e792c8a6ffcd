// Network-only paging source for user search.
// Page-number keyed; nothing is persisted.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::Result;
use crate::github::UserApi;
use crate::model::User;

use super::source::{LoadParams, Page, PagingSource, PagingState};

const FIRST_PAGE: u32 = 1;

pub struct UserSearchSource<A: UserApi> {
    api: Arc<A>,
    query: String,
}

impl<A: UserApi> UserSearchSource<A> {
    pub fn new(api: Arc<A>, query: impl Into<String>) -> Self {
        Self {
            api,
            query: query.into(),
        }
    }
}

impl<A: UserApi> PagingSource for UserSearchSource<A> {
    type Key = u32;
    type Item = User;

    async fn load(&self, params: LoadParams<u32>) -> Result<Page<u32, User>> {
        if self.query.trim().is_empty() {
            return Ok(Page::empty());
        }

        let page = params.key.unwrap_or(FIRST_PAGE);
        let response = self
            .api
            .search_users(&self.query, page, params.load_size)
            .await
            .inspect_err(|e| error!(query = %self.query, page, error = %e, "search failed"))?;
        debug!(
            query = %self.query,
            page,
            count = response.items.len(),
            total = response.total_count,
            "search page loaded"
        );

        let data: Vec<User> = response.items.iter().map(User::from).collect();
        Ok(Page {
            prev_key: (page > FIRST_PAGE).then(|| page - 1),
            next_key: (!data.is_empty()).then(|| page + 1),
            data,
        })
    }

    fn refresh_key(&self, state: &PagingState<u32, User>) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|key| key + 1)
            .or_else(|| page.next_key.map(|key| key - 1))
    }
}
