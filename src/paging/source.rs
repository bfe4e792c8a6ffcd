// Paging primitives.
// Pages, load parameters, the loaded-window state and the source trait pagers drive.

use std::fmt::Debug;
use std::future::Future;

use crate::error::Result;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Which direction a load extends the loaded window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadType {
    /// Restart from the beginning and drop everything loaded so far.
    Refresh,
    /// Extend the window backwards.
    Prepend,
    /// Extend the window forwards.
    Append,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    HasMore,
    EndReached,
}

impl Pagination {
    pub fn from_end_reached(end_reached: bool) -> Self {
        if end_reached {
            Pagination::EndReached
        } else {
            Pagination::HasMore
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Pagination::EndReached)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams<K> {
    /// `None` means "start wherever the source starts".
    pub key: Option<K>,
    pub load_size: usize,
}

/// One page of items and the keys of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<K, T> {
    pub data: Vec<T>,
    pub prev_key: Option<K>,
    pub next_key: Option<K>,
}

impl<K, T> Page<K, T> {
    /// A page with no items and no neighbours.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            prev_key: None,
            next_key: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Snapshot of the pages loaded so far.
#[derive(Debug, Clone)]
pub struct PagingState<K, T> {
    pub pages: Vec<Page<K, T>>,
    /// Index into the flattened items the user is looking at.
    pub anchor_position: Option<usize>,
    pub config: PagingConfig,
}

impl<K, T> PagingState<K, T> {
    pub fn new(config: PagingConfig) -> Self {
        Self {
            pages: Vec::new(),
            anchor_position: None,
            config,
        }
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.data.len()).sum()
    }

    /// Last item of the last non-empty page.
    pub fn last_item(&self) -> Option<&T> {
        self.pages
            .iter()
            .rev()
            .find(|page| !page.data.is_empty())
            .and_then(|page| page.data.last())
    }

    /// Page holding the item at `position`, or the last page when past the end.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page<K, T>> {
        let mut start = 0;
        for page in &self.pages {
            let end = start + page.data.len();
            if position < end {
                return Some(page);
            }
            start = end;
        }
        self.pages.last()
    }
}

/// A keyed source of pages.
pub trait PagingSource: Send + Sync {
    type Key: Copy + Send + Sync + Debug;
    type Item: Clone + Send + Sync;

    fn load(
        &self,
        params: LoadParams<Self::Key>,
    ) -> impl Future<Output = Result<Page<Self::Key, Self::Item>>> + Send;

    /// Key to restart from when the loaded window is invalidated.
    fn refresh_key(&self, state: &PagingState<Self::Key, Self::Item>) -> Option<Self::Key>;
}
