// Paging module.
// Offline-first listing (cache + remote mediator) and network-only search.

pub mod cached;
pub mod mediator;
pub mod pager;
pub mod search;
pub mod source;

pub use pager::{MediatedPager, Pager};
pub use search::UserSearchSource;
pub use source::{Pagination, PagingConfig};
