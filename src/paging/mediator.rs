// Remote mediator for the cached user listing.
// Fetches network pages and stores users plus their cursor records atomically.

use std::sync::Arc;

use tracing::{debug, error};

use crate::cache::{CacheDb, RemoteKey, RemoteKeyCache, UserCache, UserRow};
use crate::error::Result;
use crate::github::UserApi;

use super::source::{LoadType, Pagination, PagingState};

/// `since` cursor for the very first page of `/users`.
const STARTING_SINCE: i64 = 0;

pub struct UserRemoteMediator<A: UserApi> {
    api: Arc<A>,
    db: CacheDb,
}

impl<A: UserApi> UserRemoteMediator<A> {
    pub fn new(api: Arc<A>, db: CacheDb) -> Self {
        Self { api, db }
    }

    /// Fetch the page `load_type` asks for and write it to the cache.
    /// Transport and HTTP failures are returned as-is, never retried.
    pub async fn load(
        &self,
        load_type: LoadType,
        state: &PagingState<usize, UserRow>,
    ) -> Result<Pagination> {
        let since = match load_type {
            LoadType::Refresh => STARTING_SINCE,
            LoadType::Prepend => return Ok(Pagination::EndReached),
            LoadType::Append => match self.remote_key_for_last_item(state)? {
                Some(RemoteKey {
                    next_key: Some(next_key),
                    ..
                }) => next_key,
                _ => return Ok(Pagination::EndReached),
            },
        };

        let users = self
            .api
            .list_users(since, state.config.page_size)
            .await
            .inspect_err(|e| error!(?load_type, since, error = %e, "failed to fetch users"))?;
        debug!(?load_type, since, count = users.len(), "fetched users");

        let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
        let keys: Vec<RemoteKey> = users
            .iter()
            .map(|user| RemoteKey {
                user_id: user.id,
                prev_key: None,
                next_key: Some(user.id),
            })
            .collect();

        self.db.transaction(|tx| {
            if load_type == LoadType::Refresh {
                UserCache::new(tx).clear_all()?;
                RemoteKeyCache::new(tx).clear()?;
            }
            RemoteKeyCache::new(tx).insert_all(&keys)?;
            UserCache::new(tx).upsert_all(&rows)?;
            Ok(())
        })?;

        Ok(Pagination::from_end_reached(users.is_empty()))
    }

    fn remote_key_for_last_item(
        &self,
        state: &PagingState<usize, UserRow>,
    ) -> Result<Option<RemoteKey>> {
        let Some(user) = state.last_item() else {
            return Ok(None);
        };
        let conn = self.db.conn()?;
        RemoteKeyCache::new(&conn).for_user(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{Call, FakeApi, network_error, summaries};
    use crate::paging::source::{Page, PagingConfig};

    fn setup() -> (Arc<FakeApi>, CacheDb, UserRemoteMediator<FakeApi>) {
        let api = Arc::new(FakeApi::new());
        let db = CacheDb::open_in_memory().unwrap();
        let mediator = UserRemoteMediator::new(api.clone(), db.clone());
        (api, db, mediator)
    }

    fn state_with(ids: &[i64]) -> PagingState<usize, UserRow> {
        let mut state = PagingState::new(PagingConfig { page_size: 30 });
        if !ids.is_empty() {
            state.pages.push(Page {
                data: ids
                    .iter()
                    .map(|id| UserRow {
                        id: *id,
                        login: format!("user{}", id),
                        ..Default::default()
                    })
                    .collect(),
                prev_key: None,
                next_key: None,
            });
        }
        state
    }

    fn cached_ids(db: &CacheDb) -> Vec<i64> {
        let conn = db.conn().unwrap();
        UserCache::new(&conn)
            .page(0, 100)
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect()
    }

    fn cached_keys(db: &CacheDb) -> Vec<RemoteKey> {
        let conn = db.conn().unwrap();
        RemoteKeyCache::new(&conn).all().unwrap()
    }

    #[tokio::test]
    async fn test_refresh_stores_users_and_cursor_records() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(summaries([1, 2])));

        let result = mediator.load(LoadType::Refresh, &state_with(&[])).await;

        assert_eq!(result.unwrap(), Pagination::HasMore);
        assert_eq!(cached_ids(&db), vec![1, 2]);
        assert_eq!(
            cached_keys(&db),
            vec![
                RemoteKey {
                    user_id: 1,
                    prev_key: None,
                    next_key: Some(1),
                },
                RemoteKey {
                    user_id: 2,
                    prev_key: None,
                    next_key: Some(2),
                },
            ]
        );
        assert_eq!(api.calls(), vec![Call::List { since: 0, per_page: 30 }]);
    }

    #[tokio::test]
    async fn test_refresh_clears_previous_rows() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(summaries([1, 2, 3])));
        api.push_list(Ok(summaries([10, 11])));

        mediator.load(LoadType::Refresh, &state_with(&[])).await.unwrap();
        mediator
            .load(LoadType::Refresh, &state_with(&[1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(cached_ids(&db), vec![10, 11]);
        let key_ids: Vec<i64> = cached_keys(&db).iter().map(|k| k.user_id).collect();
        assert_eq!(key_ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_refresh_failure_leaves_cache_intact() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(summaries([1, 2])));
        api.push_list(Err(network_error()));

        mediator.load(LoadType::Refresh, &state_with(&[])).await.unwrap();
        let result = mediator.load(LoadType::Refresh, &state_with(&[1, 2])).await;

        assert!(result.is_err());
        assert_eq!(cached_ids(&db), vec![1, 2]);
        assert_eq!(cached_keys(&db).len(), 2);
    }

    #[tokio::test]
    async fn test_empty_refresh_is_end_reached() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(vec![]));

        let result = mediator.load(LoadType::Refresh, &state_with(&[])).await;

        assert_eq!(result.unwrap(), Pagination::EndReached);
        assert!(cached_ids(&db).is_empty());
    }

    #[tokio::test]
    async fn test_prepend_is_always_end_reached() {
        let (api, _db, mediator) = setup();

        let result = mediator.load(LoadType::Prepend, &state_with(&[1])).await;

        assert_eq!(result.unwrap(), Pagination::EndReached);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_append_without_cursor_record_makes_no_call() {
        let (api, _db, mediator) = setup();

        // Nothing loaded at all
        let result = mediator.load(LoadType::Append, &state_with(&[])).await;
        assert_eq!(result.unwrap(), Pagination::EndReached);

        // Last item has no cursor record
        let result = mediator.load(LoadType::Append, &state_with(&[5])).await;
        assert_eq!(result.unwrap(), Pagination::EndReached);

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_append_with_null_next_key_makes_no_call() {
        let (api, db, mediator) = setup();
        {
            let conn = db.conn().unwrap();
            RemoteKeyCache::new(&conn)
                .insert_all(&[RemoteKey {
                    user_id: 5,
                    prev_key: None,
                    next_key: None,
                }])
                .unwrap();
        }

        let result = mediator.load(LoadType::Append, &state_with(&[5])).await;

        assert_eq!(result.unwrap(), Pagination::EndReached);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_append_continues_after_last_cursor_without_wipe() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(summaries([1, 2])));
        api.push_list(Ok(summaries([3, 4])));

        mediator.load(LoadType::Refresh, &state_with(&[])).await.unwrap();
        let result = mediator.load(LoadType::Append, &state_with(&[1, 2])).await;

        assert_eq!(result.unwrap(), Pagination::HasMore);
        assert_eq!(cached_ids(&db), vec![1, 2, 3, 4]);
        assert_eq!(cached_keys(&db).len(), 4);
        assert_eq!(
            api.calls()[1],
            Call::List {
                since: 2,
                per_page: 30
            }
        );
    }

    #[tokio::test]
    async fn test_empty_append_is_end_reached() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(summaries([1])));
        api.push_list(Ok(vec![]));

        mediator.load(LoadType::Refresh, &state_with(&[])).await.unwrap();
        let result = mediator.load(LoadType::Append, &state_with(&[1])).await;

        assert_eq!(result.unwrap(), Pagination::EndReached);
        assert_eq!(cached_ids(&db), vec![1]);
    }

    #[tokio::test]
    async fn test_append_failure_is_reported() {
        let (api, db, mediator) = setup();
        api.push_list(Ok(summaries([1])));
        api.push_list(Err(network_error()));

        mediator.load(LoadType::Refresh, &state_with(&[])).await.unwrap();
        let result = mediator.load(LoadType::Append, &state_with(&[1])).await;

        assert!(result.is_err());
        assert_eq!(cached_ids(&db), vec![1]);
    }
}
