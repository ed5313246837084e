use crate::database::models::UserRecord;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteUserRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::UserRepository for SqliteUserRepository<'conn> {
    fn create(&self, record: &UserRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (id, username)
            VALUES (?1, ?2)
            "#,
            params![record.id, record.username],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<UserRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, username FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        username: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, username FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        username: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}
