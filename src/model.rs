// Domain models and mappers.
// Converts API responses into cache rows and cache rows into what the UI shows.

use chrono::{DateTime, Utc};

use crate::cache::{UserDetailRow, UserRow};
use crate::github::{UserDetailResponse, UserSummary};

/// A user as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub avatar_url: String,
}

/// A user profile as shown in the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetail {
    pub id: i64,
    pub login: String,
    pub avatar_url: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub followers: i64,
    pub following: i64,
    pub public_repos: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&UserSummary> for UserRow {
    fn from(dto: &UserSummary) -> Self {
        Self {
            id: dto.id,
            login: dto.login.clone(),
            avatar_url: dto.avatar_url.clone(),
            gravatar_id: dto.gravatar_id.clone(),
            node_id: dto.node_id.clone(),
            url: dto.url.clone(),
            html_url: dto.html_url.clone(),
            followers_url: dto.followers_url.clone(),
            following_url: dto.following_url.clone(),
            gists_url: dto.gists_url.clone(),
            starred_url: dto.starred_url.clone(),
            subscriptions_url: dto.subscriptions_url.clone(),
            organizations_url: dto.organizations_url.clone(),
            repos_url: dto.repos_url.clone(),
            events_url: dto.events_url.clone(),
            received_events_url: dto.received_events_url.clone(),
            user_type: dto.user_type.clone(),
            site_admin: dto.site_admin,
        }
    }
}

impl From<&UserRow> for User {
    fn from(row: &UserRow) -> Self {
        Self {
            id: row.id,
            login: row.login.clone(),
            avatar_url: row.avatar_url.clone().unwrap_or_default(),
        }
    }
}

impl From<&UserSummary> for User {
    fn from(dto: &UserSummary) -> Self {
        User::from(&UserRow::from(dto))
    }
}

impl From<&UserDetailResponse> for UserDetailRow {
    fn from(dto: &UserDetailResponse) -> Self {
        Self {
            user: UserRow::from(&dto.summary),
            name: dto.name.clone(),
            company: dto.company.clone(),
            blog: dto.blog.clone(),
            location: dto.location.clone(),
            email: dto.email.clone(),
            hireable: dto.hireable,
            bio: dto.bio.clone(),
            twitter_username: dto.twitter_username.clone(),
            public_repos: dto.public_repos,
            public_gists: dto.public_gists,
            followers: dto.followers,
            following: dto.following,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<&UserDetailRow> for UserDetail {
    fn from(row: &UserDetailRow) -> Self {
        Self {
            id: row.user.id,
            login: row.user.login.clone(),
            avatar_url: row.user.avatar_url.clone().unwrap_or_default(),
            name: row.name.clone(),
            company: row.company.clone(),
            location: row.location.clone(),
            bio: row.bio.clone(),
            blog: row.blog.clone(),
            followers: row.followers.unwrap_or_default(),
            following: row.following.unwrap_or_default(),
            public_repos: row.public_repos.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}
