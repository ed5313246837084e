use crate::database::models::{CommentRecord, NewCommentRecord};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteCommentRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::CommentRepository for SqliteCommentRepository<'conn> {
    fn create(&self, record: &NewCommentRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO comments (id, thread_id, owner, content, date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id,
                record.thread_id,
                record.owner,
                record.content,
                record.date
            ],
        )?;
        Ok(())
    }

    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<CommentRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT comments.id, comments.thread_id, users.username, comments.date,
                   comments.content, comments.is_deleted
            FROM comments
            INNER JOIN users ON users.id = comments.owner
            WHERE comments.thread_id = ?1
            ORDER BY datetime(comments.date) ASC, comments.rowid ASC
            "#,
        )?;
        let rows = stmt.query_map(params![thread_id], |row| {
            Ok(CommentRecord {
                id: row.get(0)?,
                thread_id: row.get(1)?,
                username: row.get(2)?,
                date: row.get(3)?,
                content: row.get(4)?,
                is_deleted: row.get::<_, i64>(5)? != 0,
            })
        })?;

        let mut comments = Vec::new();
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }

    fn exists_in_thread(&self, thread_id: &str, comment_id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM comments WHERE id = ?1 AND thread_id = ?2",
                params![comment_id, thread_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn soft_delete(&self, comment_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE comments SET is_deleted = 1 WHERE id = ?1",
            params![comment_id],
        )?;
        Ok(())
    }
}
