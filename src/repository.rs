// Repository facade over the API client and the cache.
// Picks the listing or search pager and fetches user details.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::cache::{CacheDb, UserDetailCache, UserDetailRow};
use crate::error::Result;
use crate::github::UserApi;
use crate::model::{User, UserDetail};
use crate::paging::{MediatedPager, Pager, Pagination, PagingConfig, UserSearchSource};

/// Whichever pager backs the user list right now.
pub enum UserPager<A: UserApi> {
    /// Offline-first listing of all users.
    Listing(MediatedPager<A>),
    /// Network-only search results.
    Search(Pager<UserSearchSource<A>>),
}

impl<A: UserApi> UserPager<A> {
    pub fn items(&self) -> Vec<User> {
        match self {
            UserPager::Listing(pager) => pager.items(),
            UserPager::Search(pager) => pager.items(),
        }
    }

    pub fn status(&self) -> Pagination {
        match self {
            UserPager::Listing(pager) => pager.status(),
            UserPager::Search(pager) => pager.status(),
        }
    }

    /// Rows left in the cache past the loaded window; search never has any.
    pub fn has_cached_more(&self) -> bool {
        match self {
            UserPager::Listing(pager) => pager.has_cached_more(),
            UserPager::Search(_) => false,
        }
    }

    pub fn set_anchor(&mut self, position: Option<usize>) {
        match self {
            UserPager::Listing(pager) => pager.set_anchor(position),
            UserPager::Search(pager) => pager.set_anchor(position),
        }
    }

    /// Cached rows for the listing; search has no cache and loads nothing.
    pub async fn load_cached(&mut self) -> Result<Pagination> {
        match self {
            UserPager::Listing(pager) => pager.load_cached().await,
            UserPager::Search(pager) => Ok(pager.status()),
        }
    }

    pub async fn refresh(&mut self) -> Result<Pagination> {
        match self {
            UserPager::Listing(pager) => pager.refresh().await,
            UserPager::Search(pager) => pager.refresh().await,
        }
    }

    pub async fn append(&mut self) -> Result<Pagination> {
        match self {
            UserPager::Listing(pager) => pager.append().await,
            UserPager::Search(pager) => pager.append().await,
        }
    }
}

pub struct UserRepository<A: UserApi> {
    api: Arc<A>,
    db: CacheDb,
    config: PagingConfig,
}

impl<A: UserApi> UserRepository<A> {
    pub fn new(api: Arc<A>, db: CacheDb, config: PagingConfig) -> Self {
        Self { api, db, config }
    }

    /// Offline-first listing; the cache is the source of truth for reads.
    pub fn users_pager(&self) -> MediatedPager<A> {
        MediatedPager::new(self.api.clone(), self.db.clone(), self.config)
    }

    /// Network-only search for `query`.
    pub fn search_pager(&self, query: &str) -> Pager<UserSearchSource<A>> {
        Pager::new(UserSearchSource::new(self.api.clone(), query), self.config)
    }

    /// Listing for a blank query, search otherwise.
    pub fn pager_for(&self, query: &str) -> UserPager<A> {
        if query.trim().is_empty() {
            UserPager::Listing(self.users_pager())
        } else {
            UserPager::Search(self.search_pager(query))
        }
    }

    /// Fetch a profile from the network and cache it. Failing to write the
    /// cache only logs; failing to fetch is an error.
    pub async fn user_detail(&self, username: &str) -> Result<UserDetail> {
        let response = self
            .api
            .user_detail(username)
            .await
            .inspect_err(|e| error!(username, error = %e, "failed to fetch user detail"))?;

        let row = UserDetailRow::from(&response);
        if let Err(e) = self.store_detail(&row) {
            warn!(username, error = %e, "failed to save user detail to cache");
        } else {
            info!(username, "cached user detail");
        }

        Ok(UserDetail::from(&row))
    }

    /// Profile from a previous fetch, if any.
    pub fn cached_user_detail(&self, username: &str) -> Result<Option<UserDetail>> {
        let conn = self.db.conn()?;
        let row = UserDetailCache::new(&conn).get_by_login(username)?;
        Ok(row.as_ref().map(UserDetail::from))
    }

    fn store_detail(&self, row: &UserDetailRow) -> Result<()> {
        let conn = self.db.conn()?;
        UserDetailCache::new(&conn).insert(row, CacheDb::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GhUsersError;
    use crate::github::testing::{Call, FakeApi, detail, network_error, search_page, summaries};

    fn setup() -> (Arc<FakeApi>, CacheDb, UserRepository<FakeApi>) {
        let api = Arc::new(FakeApi::new());
        let db = CacheDb::open_in_memory().unwrap();
        let repo = UserRepository::new(api.clone(), db.clone(), PagingConfig::default());
        (api, db, repo)
    }

    #[test]
    fn test_pager_for_picks_by_query() {
        let (_api, _db, repo) = setup();

        assert!(matches!(repo.pager_for(""), UserPager::Listing(_)));
        assert!(matches!(repo.pager_for("   "), UserPager::Listing(_)));
        assert!(matches!(repo.pager_for("octo"), UserPager::Search(_)));
    }

    #[tokio::test]
    async fn test_listing_pager_maps_to_domain_users() {
        let (api, _db, repo) = setup();
        api.push_list(Ok(summaries([1, 2])));

        let mut pager = repo.pager_for("");
        pager.refresh().await.unwrap();

        let users = pager.items();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].login, "user1");
        assert_eq!(users[0].avatar_url, "https://avatars.example.com/u/1");
    }

    #[tokio::test]
    async fn test_search_pager_goes_to_network() {
        let (api, _db, repo) = setup();
        api.push_search(Ok(search_page([7, 8])));

        let mut pager = repo.pager_for("mona");
        assert_eq!(pager.refresh().await.unwrap(), Pagination::HasMore);

        assert_eq!(pager.items().len(), 2);
        assert!(matches!(&api.calls()[0], Call::Search { query, page: 1, .. } if query == "mona"));
    }

    #[tokio::test]
    async fn test_user_detail_success_is_cached() {
        let (api, _db, repo) = setup();
        api.push_detail(Ok(detail(583231, "octocat")));

        let user = repo.user_detail("octocat").await.unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.followers, 42);

        let cached = repo.cached_user_detail("octocat").unwrap();
        assert_eq!(cached, Some(user));
    }

    #[tokio::test]
    async fn test_user_detail_survives_cache_write_failure() {
        let (api, db, repo) = setup();
        api.push_detail(Ok(detail(583231, "octocat")));
        db.conn()
            .unwrap()
            .execute_batch("DROP TABLE user_detail")
            .unwrap();

        let user = repo.user_detail("octocat").await.unwrap();

        assert_eq!(user.id, 583231);
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
    }

    #[tokio::test]
    async fn test_user_detail_network_failure_is_error() {
        let (api, _db, repo) = setup();
        api.push_detail(Err(network_error()));

        let err = repo.user_detail("octocat").await.unwrap_err();

        assert!(matches!(err, GhUsersError::Io(_)));
        assert_eq!(repo.cached_user_detail("octocat").unwrap(), None);
    }
}
