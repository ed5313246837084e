use crate::database::models::{NewReplyRecord, ReplyRecord};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteReplyRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> super::ReplyRepository for SqliteReplyRepository<'conn> {
    fn create(&self, record: &NewReplyRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO replies (id, comment_id, owner, content, date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id,
                record.comment_id,
                record.owner,
                record.content,
                record.date
            ],
        )?;
        Ok(())
    }

    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<ReplyRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT replies.id, replies.comment_id, users.username, replies.date,
                   replies.content, replies.is_deleted
            FROM replies
            INNER JOIN comments ON comments.id = replies.comment_id
            INNER JOIN users ON users.id = replies.owner
            WHERE comments.thread_id = ?1
            ORDER BY datetime(replies.date) ASC, replies.rowid ASC
            "#,
        )?;
        let rows = stmt.query_map(params![thread_id], |row| {
            Ok(ReplyRecord {
                id: row.get(0)?,
                comment_id: row.get(1)?,
                username: row.get(2)?,
                date: row.get(3)?,
                content: row.get(4)?,
                is_deleted: row.get::<_, i64>(5)? != 0,
            })
        })?;

        let mut replies = Vec::new();
        for row in rows {
            replies.push(row?);
        }
        Ok(replies)
    }

    fn exists(&self, thread_id: &str, comment_id: &str, reply_id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                r#"
                SELECT 1
                FROM replies
                INNER JOIN comments ON comments.id = replies.comment_id
                WHERE replies.id = ?1 AND replies.comment_id = ?2 AND comments.thread_id = ?3
                "#,
                params![reply_id, comment_id, thread_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn soft_delete(&self, reply_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE replies SET is_deleted = 1 WHERE id = ?1",
            params![reply_id],
        )?;
        Ok(())
    }
}
