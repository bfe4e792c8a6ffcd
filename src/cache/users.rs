// Cache operations for listed users.
// Works on a plain connection or an open transaction.

use rusqlite::{Connection, Row, params};

use crate::error::Result;

/// A user as stored in the `users` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub login: String,
    pub avatar_url: Option<String>,
    pub gravatar_id: Option<String>,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub followers_url: Option<String>,
    pub following_url: Option<String>,
    pub gists_url: Option<String>,
    pub starred_url: Option<String>,
    pub subscriptions_url: Option<String>,
    pub organizations_url: Option<String>,
    pub repos_url: Option<String>,
    pub events_url: Option<String>,
    pub received_events_url: Option<String>,
    pub user_type: Option<String>,
    pub site_admin: bool,
}

const COLUMNS: &str = "id, login, avatar_url, gravatar_id, node_id, url, html_url, \
     followers_url, following_url, gists_url, starred_url, subscriptions_url, \
     organizations_url, repos_url, events_url, received_events_url, user_type, site_admin";

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
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
        })
    }
}

/// Cache operations for the `users` table.
pub struct UserCache<'c> {
    conn: &'c Connection,
}

impl<'c> UserCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert or update users by id.
    pub fn upsert_all(&self, users: &[UserRow]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(&format!(
            r#"
            INSERT INTO users ({COLUMNS})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            ON CONFLICT(id) DO UPDATE SET
                login = excluded.login,
                avatar_url = excluded.avatar_url,
                gravatar_id = excluded.gravatar_id,
                node_id = excluded.node_id,
                url = excluded.url,
                html_url = excluded.html_url,
                followers_url = excluded.followers_url,
                following_url = excluded.following_url,
                gists_url = excluded.gists_url,
                starred_url = excluded.starred_url,
                subscriptions_url = excluded.subscriptions_url,
                organizations_url = excluded.organizations_url,
                repos_url = excluded.repos_url,
                events_url = excluded.events_url,
                received_events_url = excluded.received_events_url,
                user_type = excluded.user_type,
                site_admin = excluded.site_admin
            "#
        ))?;

        for user in users {
            stmt.execute(params![
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
            ])?;
        }

        Ok(())
    }

    /// One page of users ordered by id, starting at `offset`.
    pub fn page(&self, offset: usize, limit: usize) -> Result<Vec<UserRow>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY id ASC LIMIT ?1 OFFSET ?2"
        ))?;

        let rows = stmt
            .query_map(params![limit as i64, offset as i64], UserRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    #[cfg(test)]
    pub fn get(&self, id: i64) -> Result<Option<UserRow>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {COLUMNS} FROM users WHERE id = ?1"))?;

        match stmt.query_row([id], UserRow::from_row) {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(test)]
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every cached user.
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM users", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheDb;

    fn row(id: i64) -> UserRow {
        UserRow {
            id,
            login: format!("user{}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_page_orders_by_id() {
        let db = CacheDb::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let cache = UserCache::new(&conn);

        cache.upsert_all(&[row(3), row(1), row(2)]).unwrap();

        let ids: Vec<i64> = cache.page(0, 10).unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let ids: Vec<i64> = cache.page(1, 1).unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);

        assert!(cache.page(3, 10).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_overwrites_existing() {
        let db = CacheDb::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let cache = UserCache::new(&conn);

        cache.upsert_all(&[row(1)]).unwrap();
        let renamed = UserRow {
            login: "renamed".to_string(),
            site_admin: true,
            ..row(1)
        };
        cache.upsert_all(&[renamed.clone()]).unwrap();

        assert_eq!(cache.count().unwrap(), 1);
        assert_eq!(cache.get(1).unwrap(), Some(renamed));
    }

    #[test]
    fn test_clear_all() {
        let db = CacheDb::open_in_memory().unwrap();
        let conn = db.conn().unwrap();
        let cache = UserCache::new(&conn);

        cache.upsert_all(&[row(1), row(2)]).unwrap();
        cache.clear_all().unwrap();

        assert_eq!(cache.count().unwrap(), 0);
        assert_eq!(cache.get(1).unwrap(), None);
    }
}
