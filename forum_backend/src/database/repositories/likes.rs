use crate::database::models::LikeRecord;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteLikeRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::LikeRepository for SqliteLikeRepository<'conn> {
    fn add(&self, comment_id: &str, owner: &str, date: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO comment_likes (comment_id, owner, date)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(comment_id, owner) DO NOTHING
            "#,
            params![comment_id, owner, date],
        )?;
        Ok(())
    }

    fn remove(&self, comment_id: &str, owner: &str) -> Result<()> {
        self.conn.execute(
            r#"
            DELETE FROM comment_likes
            WHERE comment_id = ?1 AND owner = ?2
            "#,
            params![comment_id, owner],
        )?;
        Ok(())
    }

    fn exists(&self, comment_id: &str, owner: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM comment_likes WHERE comment_id = ?1 AND owner = ?2",
                params![comment_id, owner],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<LikeRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT comment_likes.comment_id
            FROM comment_likes
            INNER JOIN comments ON comments.id = comment_likes.comment_id
            WHERE comments.thread_id = ?1
            "#,
        )?;
        let rows = stmt.query_map(params![thread_id], |row| {
            Ok(LikeRecord {
                comment_id: row.get(0)?,
            })
        })?;

        let mut likes = Vec::new();
        for row in rows {
            likes.push(row?);
        }
        Ok(likes)
    }
}
