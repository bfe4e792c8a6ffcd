// Cache module for the local SQLite store.
// Holds listed users, their pagination cursors and full user profiles.

pub mod db;
pub mod paths;
pub mod remote_keys;
pub mod schema;
pub mod user_detail;
pub mod users;

pub use db::CacheDb;
pub use remote_keys::{RemoteKey, RemoteKeyCache};
pub use user_detail::{UserDetailCache, UserDetailRow};
pub use users::{UserCache, UserRow};
