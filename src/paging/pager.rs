// Pagers driving a paging source.
// `Pager` walks one source; `MediatedPager` backs the cached listing with the network.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::CacheDb;
use crate::error::Result;
use crate::github::UserApi;
use crate::model::User;

use super::cached::CachedUserSource;
use super::mediator::UserRemoteMediator;
use super::source::{LoadParams, LoadType, Page, Pagination, PagingConfig, PagingSource, PagingState};

/// Loads pages from a single source and keeps the loaded window.
pub struct Pager<S: PagingSource> {
    source: S,
    state: PagingState<S::Key, S::Item>,
}

impl<S: PagingSource> Pager<S> {
    pub fn new(source: S, config: PagingConfig) -> Self {
        Self {
            source,
            state: PagingState::new(config),
        }
    }

    pub fn state(&self) -> &PagingState<S::Key, S::Item> {
        &self.state
    }

    /// Record which item the user is looking at, for the next refresh.
    pub fn set_anchor(&mut self, position: Option<usize>) {
        self.state.anchor_position = position;
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.state
            .pages
            .iter()
            .flat_map(|page| page.data.iter().cloned())
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    pub fn can_append(&self) -> bool {
        self.state
            .pages
            .last()
            .is_some_and(|page| page.next_key.is_some())
    }

    pub fn can_prepend(&self) -> bool {
        self.state
            .pages
            .first()
            .is_some_and(|page| page.prev_key.is_some())
    }

    /// Whether the window can still grow forwards.
    pub fn status(&self) -> Pagination {
        Pagination::from_end_reached(!self.can_append())
    }

    /// Drop the window and reload around the source's refresh key, then
    /// prepend back to the first page. A failed load leaves the window as it was.
    pub async fn refresh(&mut self) -> Result<Pagination> {
        let key = self.source.refresh_key(&self.state);
        debug!(?key, "refreshing pager");
        let page = self.load(key).await?;

        self.state.pages = vec![page];
        self.state.anchor_position = None;

        while self.can_prepend() {
            self.prepend().await?;
        }
        Ok(self.status())
    }

    /// Load the page after the last loaded one.
    pub async fn append(&mut self) -> Result<Pagination> {
        let Some(key) = self.state.pages.last().and_then(|page| page.next_key) else {
            return Ok(Pagination::EndReached);
        };
        self.append_at(key).await
    }

    /// Load the page at `key` and place it after the loaded window, dropping
    /// trailing empty pages first.
    pub async fn append_at(&mut self, key: S::Key) -> Result<Pagination> {
        let page = self.load(Some(key)).await?;

        while self.state.pages.last().is_some_and(Page::is_empty) {
            self.state.pages.pop();
        }
        self.state.pages.push(page);
        Ok(self.status())
    }

    /// Load the page before the first loaded one.
    pub async fn prepend(&mut self) -> Result<Pagination> {
        let Some(key) = self.state.pages.first().and_then(|page| page.prev_key) else {
            return Ok(Pagination::EndReached);
        };
        let page = self.load(Some(key)).await?;
        let end_reached = page.prev_key.is_none();

        if let Some(anchor) = self.state.anchor_position.as_mut() {
            *anchor += page.data.len();
        }
        self.state.pages.insert(0, page);
        Ok(Pagination::from_end_reached(end_reached))
    }

    async fn load(&self, key: Option<S::Key>) -> Result<Page<S::Key, S::Item>> {
        self.source
            .load(LoadParams {
                key,
                load_size: self.state.config.page_size,
            })
            .await
    }
}

/// Offline-first user listing: the cache is read through a `Pager` and
/// refilled from the network by the remote mediator when it runs dry.
pub struct MediatedPager<A: UserApi> {
    pager: Pager<CachedUserSource>,
    mediator: UserRemoteMediator<A>,
    remote_end_reached: bool,
}

impl<A: UserApi> MediatedPager<A> {
    pub fn new(api: Arc<A>, db: CacheDb, config: PagingConfig) -> Self {
        Self {
            pager: Pager::new(CachedUserSource::new(db.clone()), config),
            mediator: UserRemoteMediator::new(api, db),
            remote_end_reached: false,
        }
    }

    pub fn set_anchor(&mut self, position: Option<usize>) {
        self.pager.set_anchor(position);
    }

    pub fn items(&self) -> Vec<User> {
        self.pager
            .state()
            .pages
            .iter()
            .flat_map(|page| page.data.iter().map(User::from))
            .collect()
    }

    pub fn status(&self) -> Pagination {
        Pagination::from_end_reached(!self.pager.can_append() && self.remote_end_reached)
    }

    /// Whether the next append can still be served from the cache alone.
    pub fn has_cached_more(&self) -> bool {
        self.pager.can_append()
    }

    /// Show whatever is cached without touching the network.
    pub async fn load_cached(&mut self) -> Result<Pagination> {
        self.pager.refresh().await?;
        Ok(self.status())
    }

    /// Refetch the first network page into a wiped cache, then reread the cache.
    /// The cache is reread even when the network fails so stale rows stay visible.
    pub async fn refresh(&mut self) -> Result<Pagination> {
        info!("refreshing user listing");
        self.remote_end_reached = false;

        let remote = self.mediator.load(LoadType::Refresh, self.pager.state()).await;
        let local = self.pager.refresh().await;

        match remote {
            Ok(Pagination::EndReached) => self.remote_end_reached = true,
            Ok(Pagination::HasMore) => {}
            Err(e) => {
                warn!(error = %e, "listing refresh failed, showing cached rows");
                return Err(e);
            }
        }
        local?;
        Ok(self.status())
    }

    /// Read the next cached page, asking the mediator for more once the
    /// cache has nothing left past the loaded window.
    pub async fn append(&mut self) -> Result<Pagination> {
        if self.pager.can_append() {
            let before = self.pager.item_count();
            self.pager.append().await?;
            if self.pager.item_count() > before {
                return Ok(self.status());
            }
        }

        if self.remote_end_reached {
            return Ok(Pagination::EndReached);
        }

        match self.mediator.load(LoadType::Append, self.pager.state()).await? {
            Pagination::EndReached => {
                self.remote_end_reached = true;
                Ok(Pagination::EndReached)
            }
            Pagination::HasMore => {
                let offset = self.pager.item_count();
                self.pager.append_at(offset).await?;
                Ok(self.status())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{RemoteKeyCache, UserCache};
    use crate::github::testing::{Call, FakeApi, network_error, summaries};

    /// Numbers 1..=total, paged by 1-based page number.
    struct NumberSource {
        total: u32,
    }

    impl PagingSource for NumberSource {
        type Key = u32;
        type Item = u32;

        async fn load(&self, params: LoadParams<u32>) -> Result<Page<u32, u32>> {
            let page = params.key.unwrap_or(1);
            let size = params.load_size as u32;
            let start = (page - 1) * size + 1;
            let data: Vec<u32> = (start..start + size).filter(|n| *n <= self.total).collect();
            Ok(Page {
                prev_key: (page > 1).then(|| page - 1),
                next_key: (!data.is_empty()).then(|| page + 1),
                data,
            })
        }

        fn refresh_key(&self, state: &PagingState<u32, u32>) -> Option<u32> {
            let anchor = state.anchor_position?;
            let page = state.closest_page_to_position(anchor)?;
            page.prev_key
                .map(|k| k + 1)
                .or_else(|| page.next_key.map(|k| k - 1))
        }
    }

    fn number_pager(total: u32) -> Pager<NumberSource> {
        Pager::new(NumberSource { total }, PagingConfig { page_size: 2 })
    }

    #[tokio::test]
    async fn test_pager_appends_until_empty_page() {
        let mut pager = number_pager(3);

        assert_eq!(pager.refresh().await.unwrap(), Pagination::HasMore);
        assert_eq!(pager.items(), vec![1, 2]);

        assert_eq!(pager.append().await.unwrap(), Pagination::HasMore);
        assert_eq!(pager.items(), vec![1, 2, 3]);

        assert_eq!(pager.append().await.unwrap(), Pagination::EndReached);
        assert_eq!(pager.items(), vec![1, 2, 3]);
        assert_eq!(pager.append().await.unwrap(), Pagination::EndReached);
    }

    #[tokio::test]
    async fn test_refresh_restores_window_around_anchor() {
        let mut pager = number_pager(10);
        pager.refresh().await.unwrap();
        pager.append().await.unwrap();
        pager.append().await.unwrap();
        assert_eq!(pager.items(), vec![1, 2, 3, 4, 5, 6]);

        // Looking at item 5 (page 3): refresh reloads page 3 then prepends 2 and 1
        pager.set_anchor(Some(4));
        pager.refresh().await.unwrap();
        assert_eq!(pager.items(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(pager.state().pages.len(), 3);
    }

    fn listing(api: &Arc<FakeApi>, db: &CacheDb) -> MediatedPager<FakeApi> {
        MediatedPager::new(api.clone(), db.clone(), PagingConfig { page_size: 2 })
    }

    #[tokio::test]
    async fn test_mediated_refresh_then_append_from_network() {
        let api = Arc::new(FakeApi::new());
        let db = CacheDb::open_in_memory().unwrap();
        api.push_list(Ok(summaries([1, 2])));
        api.push_list(Ok(summaries([3])));
        api.push_list(Ok(vec![]));

        let mut pager = listing(&api, &db);
        assert_eq!(pager.refresh().await.unwrap(), Pagination::HasMore);
        let ids: Vec<i64> = pager.items().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);

        // Cache page at offset 2 is empty, so the mediator fetches since=2
        assert_eq!(pager.append().await.unwrap(), Pagination::HasMore);
        let ids: Vec<i64> = pager.items().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Cache is short, mediator gets an empty page
        assert_eq!(pager.append().await.unwrap(), Pagination::EndReached);
        assert_eq!(pager.status(), Pagination::EndReached);

        assert_eq!(
            api.calls(),
            vec![
                Call::List { since: 0, per_page: 2 },
                Call::List { since: 2, per_page: 2 },
                Call::List { since: 3, per_page: 2 },
            ]
        );

        // Once the end is known, appending makes no further calls
        assert_eq!(pager.append().await.unwrap(), Pagination::EndReached);
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_mediated_refresh_failure_keeps_cached_rows_visible() {
        let api = Arc::new(FakeApi::new());
        let db = CacheDb::open_in_memory().unwrap();
        api.push_list(Ok(summaries([1, 2])));
        api.push_list(Err(network_error()));

        let mut pager = listing(&api, &db);
        pager.refresh().await.unwrap();

        let mut reopened = listing(&api, &db);
        assert!(reopened.refresh().await.is_err());
        let ids: Vec<i64> = reopened.items().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let conn = db.conn().unwrap();
        assert_eq!(UserCache::new(&conn).count().unwrap(), 2);
        assert_eq!(RemoteKeyCache::new(&conn).all().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_cached_reads_without_network() {
        let api = Arc::new(FakeApi::new());
        let db = CacheDb::open_in_memory().unwrap();
        api.push_list(Ok(summaries([1, 2, 3])));
        listing(&api, &db).refresh().await.unwrap();

        let mut restarted = listing(&api, &db);
        restarted.load_cached().await.unwrap();
        let ids: Vec<i64> = restarted.items().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(api.calls().len(), 1);

        // Second cached page still comes from the cache
        restarted.append().await.unwrap();
        assert_eq!(restarted.items().len(), 3);
        assert_eq!(api.calls().len(), 1);
    }
}
