// GitHub API module.
// Provides client and types for the users REST endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::GitHubClient;
pub use endpoints::UserApi;
pub use types::*;
