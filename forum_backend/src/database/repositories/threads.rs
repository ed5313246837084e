use crate::database::models::{NewThreadRecord, ThreadRecord};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(super) struct SqliteThreadRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

fn map_thread(row: &Row<'_>) -> rusqlite::Result<ThreadRecord> {
    Ok(ThreadRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        date: row.get(3)?,
        username: row.get(4)?,
    })
}

impl<'conn> super::ThreadRepository for SqliteThreadRepository<'conn> {
    fn create(&self, record: &NewThreadRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO threads (id, title, body, owner, date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id,
                record.title,
                record.body,
                record.owner,
                record.date
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<ThreadRecord>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT threads.id, threads.title, threads.body, threads.date, users.username
                FROM threads
                INNER JOIN users ON users.id = threads.owner
                WHERE threads.id = ?1
                "#,
                params![id],
                map_thread,
            )
            .optional()?;
        Ok(row)
    }

    fn exists(&self, id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM threads WHERE id = ?1",
                params![id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<ThreadRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT threads.id, threads.title, threads.body, threads.date, users.username
            FROM threads
            INNER JOIN users ON users.id = threads.owner
            ORDER BY datetime(threads.date) DESC, threads.rowid DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![i64::try_from(limit).unwrap_or(i64::MAX)], map_thread)?;

        let mut threads = Vec::new();
        for row in rows {
            threads.push(row?);
        }
        Ok(threads)
    }
}
