use crate::models::Notification;
use crate::Database;
use anyhow::Result;
use rusqlite::Row;

const MAX_TITLE_LENGTH: usize = 200;

fn map_notification(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        read_at: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn create(db: &Database, user_id: i64, title: &str, body: &str) -> Result<i64> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Notification title cannot be empty");
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        anyhow::bail!(
            "Notification title must be {} characters or less",
            MAX_TITLE_LENGTH
        );
    }
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO notifications (user_id, title, body) VALUES (?, ?, ?)",
        (user_id, title, body.trim()),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_for_user(db: &Database, user_id: i64, limit: usize) -> Result<Vec<Notification>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        r#"
        SELECT id, user_id, title, body, read_at, created_at
        FROM notifications
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )?;
    let notifications = stmt
        .query_map((user_id, limit), map_notification)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notifications)
}

pub fn unread_count(db: &Database, user_id: i64) -> Result<i64> {
    let conn = db.get()?;
    let count = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read_at IS NULL",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Marks every unread notification of `user_id` as read. Returns the
/// number of rows touched.
pub fn mark_all_read(db: &Database, user_id: i64) -> Result<usize> {
    let conn = db.get()?;
    let updated = conn.execute(
        "UPDATE notifications SET read_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now') WHERE user_id = ? AND read_at IS NULL",
        [user_id],
    )?;
    Ok(updated)
}
