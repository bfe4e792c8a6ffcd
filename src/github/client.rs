// GitHub API HTTP client.
// Handles authentication headers and request/response status processing.

use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{GhUsersError, Result};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client authenticated with a static bearer token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client against an API root: the public API, GitHub Enterprise or a proxy.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GhUsersError::Config(format!("invalid API URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GhUsersError::Config(format!(
                "invalid API URL {:?}: not a base URL",
                base_url.as_str()
            )));
        }

        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GhUsersError::Config(e.to_string()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("ghusers"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url })
    }

    /// Endpoint URL under the API root. Each segment is percent-encoded, so a
    /// login can never add path components or a query.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GhUsersError::Config(format!("{} is not a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        params: &T,
    ) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url).query(params).send().await?;

        Self::check_response(response).await
    }

    /// Check response status and convert non-2xx into an HTTP error.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GhUsersError::Http { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_segments_under_base_path() {
        let client = GitHubClient::with_base_url("t0ken", "https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(
            client.url(&["search", "users"]).unwrap().as_str(),
            "https://ghe.example.com/api/v3/search/users"
        );

        let client = GitHubClient::with_base_url("t0ken", GITHUB_API_BASE).unwrap();
        assert_eq!(
            client.url(&["users"]).unwrap().as_str(),
            "https://api.github.com/users"
        );
    }

    #[test]
    fn test_url_escapes_login() {
        let client = GitHubClient::with_base_url("t0ken", GITHUB_API_BASE).unwrap();

        let url = client.url(&["users", "a/b c?x=1"]).unwrap();

        assert_eq!(url.as_str(), "https://api.github.com/users/a%2Fb%20c%3Fx=1");
        assert_eq!(url.path_segments().unwrap().count(), 2);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = GitHubClient::with_base_url("t0ken", "not a url").unwrap_err();
        assert!(matches!(err, GhUsersError::Config(_)));

        let err = GitHubClient::with_base_url("t0ken", "mailto:octocat@example.com").unwrap_err();
        assert!(matches!(err, GhUsersError::Config(_)));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = GitHubClient::with_base_url("bad\ntoken", GITHUB_API_BASE).unwrap_err();
        assert!(matches!(err, GhUsersError::Config(_)));
    }
}
