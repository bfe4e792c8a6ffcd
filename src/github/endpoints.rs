// GitHub API endpoint functions.
// Typed calls for listing, searching and fetching users, behind the `UserApi` seam.

use std::future::Future;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{SearchResponse, UserDetailResponse, UserSummary};

/// The three user endpoints the pagers and repository depend on.
pub trait UserApi: Send + Sync {
    /// `GET /users?since={since}&per_page={per_page}`.
    fn list_users(
        &self,
        since: i64,
        per_page: usize,
    ) -> impl Future<Output = Result<Vec<UserSummary>>> + Send;

    /// `GET /search/users?q={query}&page={page}&per_page={per_page}`.
    fn search_users(
        &self,
        query: &str,
        page: u32,
        per_page: usize,
    ) -> impl Future<Output = Result<SearchResponse>> + Send;

    /// `GET /users/{username}`.
    fn user_detail(&self, username: &str)
    -> impl Future<Output = Result<UserDetailResponse>> + Send;
}

impl UserApi for GitHubClient {
    async fn list_users(&self, since: i64, per_page: usize) -> Result<Vec<UserSummary>> {
        let params = [
            ("since", since.to_string()),
            ("per_page", per_page.to_string()),
        ];
        let response = self.get_with_params(self.url(&["users"])?, &params).await?;
        let users: Vec<UserSummary> = response.json().await?;
        Ok(users)
    }

    async fn search_users(
        &self,
        query: &str,
        page: u32,
        per_page: usize,
    ) -> Result<SearchResponse> {
        let params = [
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        let response = self.get_with_params(self.url(&["search", "users"])?, &params).await?;
        let wrapper: SearchResponse = response.json().await?;
        Ok(wrapper)
    }

    async fn user_detail(&self, username: &str) -> Result<UserDetailResponse> {
        let response = self.get(self.url(&["users", username])?).await?;
        let detail: UserDetailResponse = response.json().await?;
        Ok(detail)
    }
}
