// Cursor records for the user listing.
// One row per cached user, telling the mediator where the next page starts.

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;

/// Pagination cursor stored alongside each cached user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteKey {
    pub user_id: i64,
    pub prev_key: Option<i64>,
    pub next_key: Option<i64>,
}

pub struct RemoteKeyCache<'c> {
    conn: &'c Connection,
}

impl<'c> RemoteKeyCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert cursor records, replacing any existing record for the same user.
    pub fn insert_all(&self, keys: &[RemoteKey]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR REPLACE INTO remote_keys (user_id, prev_key, next_key) VALUES (?1, ?2, ?3)",
        )?;

        for key in keys {
            stmt.execute(params![key.user_id, key.prev_key, key.next_key])?;
        }
        Ok(())
    }

    pub fn for_user(&self, user_id: i64) -> Result<Option<RemoteKey>> {
        let key = self
            .conn
            .query_row(
                "SELECT user_id, prev_key, next_key FROM remote_keys WHERE user_id = ?1",
                [user_id],
                |row| {
                    Ok(RemoteKey {
                        user_id: row.get(0)?,
                        prev_key: row.get(1)?,
                        next_key: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(key)
    }

    #[cfg(test)]
    pub fn all(&self) -> Result<Vec<RemoteKey>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT user_id, prev_key, next_key FROM remote_keys ORDER BY user_id")?;
        let keys = stmt
            .query_map([], |row| {
                Ok(RemoteKey {
                    user_id: row.get(0)?,
                    prev_key: row.get(1)?,
                    next_key: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys)
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM remote_keys", [])?;
        Ok(())
    }
}
