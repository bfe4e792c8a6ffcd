// Paging source over the cached `users` table.
// Offset-keyed, ordered by user id.

use crate::cache::{CacheDb, UserCache, UserRow};
use crate::error::Result;

use super::source::{LoadParams, Page, PagingSource, PagingState};

pub struct CachedUserSource {
    db: CacheDb,
}

impl CachedUserSource {
    pub fn new(db: CacheDb) -> Self {
        Self { db }
    }
}

impl PagingSource for CachedUserSource {
    type Key = usize;
    type Item = UserRow;

    async fn load(&self, params: LoadParams<usize>) -> Result<Page<usize, UserRow>> {
        let offset = params.key.unwrap_or(0);
        let data = {
            let conn = self.db.conn()?;
            UserCache::new(&conn).page(offset, params.load_size)?
        };

        let prev_key = (offset > 0).then(|| offset.saturating_sub(params.load_size));
        // A short page means the cache has nothing further right now
        let next_key = (data.len() >= params.load_size).then(|| offset + data.len());

        Ok(Page {
            data,
            prev_key,
            next_key,
        })
    }

    /// The cache is rebuilt from its first row on every refresh.
    fn refresh_key(&self, _state: &PagingState<usize, UserRow>) -> Option<usize> {
        None
    }
}
