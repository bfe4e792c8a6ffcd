// Cache operations for full user profiles.
// One row per user id; a refetch replaces the whole row.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::Result;

use super::users::UserRow;

/// A full profile as stored in the `user_detail` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDetailRow {
    pub user: UserRow,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub hireable: Option<bool>,
    pub bio: Option<String>,
    pub twitter_username: Option<String>,
    pub public_repos: Option<i64>,
    pub public_gists: Option<i64>,
    pub followers: Option<i64>,
    pub following: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

const COLUMNS: &str = "id, login, avatar_url, gravatar_id, node_id, url, html_url, \
     followers_url, following_url, gists_url, starred_url, subscriptions_url, \
     organizations_url, repos_url, events_url, received_events_url, user_type, site_admin, \
     name, company, blog, location, email, hireable, bio, twitter_username, \
     public_repos, public_gists, followers, following, created_at, updated_at";

impl UserDetailRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user: UserRow {
                id: row.get(0)?,
                login: row.get(1)?,
                avatar_url: row.get(2)?,
                gravatar_id: row.get(3)?,
                node_id: row.get(4)?,
                url: row.get(5)?,
                html_url: row.get(6)?,
                followers_url: row.get(7)?,
                following_url: row.get(8)?,
                gists_url: row.get(9)?,
                starred_url: row.get(10)?,
                subscriptions_url: row.get(11)?,
                organizations_url: row.get(12)?,
                repos_url: row.get(13)?,
                events_url: row.get(14)?,
                received_events_url: row.get(15)?,
                user_type: row.get(16)?,
                site_admin: row.get(17)?,
            },
            name: row.get(18)?,
            company: row.get(19)?,
            blog: row.get(20)?,
            location: row.get(21)?,
            email: row.get(22)?,
            hireable: row.get(23)?,
            bio: row.get(24)?,
            twitter_username: row.get(25)?,
            public_repos: row.get(26)?,
            public_gists: row.get(27)?,
            followers: row.get(28)?,
            following: row.get(29)?,
            created_at: row.get(30)?,
            updated_at: row.get(31)?,
        })
    }
}

pub struct UserDetailCache<'c> {
    conn: &'c Connection,
}

impl<'c> UserDetailCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Store a profile, replacing any previous row for the same id.
    pub fn insert(&self, detail: &UserDetailRow, fetched_at: i64) -> Result<()> {
        let user = &detail.user;
        self.conn.execute(
            &format!(
                r#"
                INSERT OR REPLACE INTO user_detail ({COLUMNS}, fetched_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                        ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
                        ?31, ?32, ?33)
                "#
            ),
            params![
                user.id,
                user.login,
                user.avatar_url,
                user.gravatar_id,
                user.node_id,
                user.url,
                user.html_url,
                user.followers_url,
                user.following_url,
                user.gists_url,
                user.starred_url,
                user.subscriptions_url,
                user.organizations_url,
                user.repos_url,
                user.events_url,
                user.received_events_url,
                user.user_type,
                user.site_admin,
                detail.name,
                detail.company,
                detail.blog,
                detail.location,
                detail.email,
                detail.hireable,
                detail.bio,
                detail.twitter_username,
                detail.public_repos,
                detail.public_gists,
                detail.followers,
                detail.following,
                detail.created_at,
                detail.updated_at,
                fetched_at,
            ],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn get(&self, id: i64) -> Result<Option<UserDetailRow>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM user_detail WHERE id = ?1"),
                [id],
                UserDetailRow::from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Look up a profile by login, case-insensitively as GitHub does.
    pub fn get_by_login(&self, login: &str) -> Result<Option<UserDetailRow>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {COLUMNS} FROM user_detail WHERE login = ?1 COLLATE NOCASE \
                     ORDER BY fetched_at DESC LIMIT 1"
                ),
                [login],
                UserDetailRow::from_row,
            )
            .optional()?;
        Ok(row)
    }
}
