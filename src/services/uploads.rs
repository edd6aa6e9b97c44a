use crate::models::MediaUpload;
use crate::Database;
use anyhow::Result;
use rusqlite::Row;

/// Upper bound on rows returned for a single account page.
pub const MAX_LISTED_UPLOADS: usize = 100;

fn map_upload(row: &Row<'_>) -> rusqlite::Result<MediaUpload> {
    Ok(MediaUpload {
        id: row.get(0)?,
        user_id: row.get(1)?,
        filename: row.get(2)?,
        original_name: row.get(3)?,
        mime_type: row.get(4)?,
        size_bytes: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn record_upload(
    db: &Database,
    user_id: i64,
    filename: &str,
    original_name: &str,
    mime_type: &str,
    size_bytes: i64,
) -> Result<i64> {
    if filename.is_empty() || filename.contains('/') || filename.contains("..") {
        anyhow::bail!("Invalid stored filename '{}'", filename);
    }
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO media_uploads (user_id, filename, original_name, mime_type, size_bytes) VALUES (?, ?, ?, ?, ?)",
        (user_id, filename, original_name, mime_type, size_bytes),
    )?;
    Ok(conn.last_insert_rowid())
}

fn query_uploads(db: &Database, user_id: i64) -> Result<Vec<MediaUpload>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        r#"
        SELECT m.id, m.user_id, m.filename, m.original_name, m.mime_type, m.size_bytes, m.created_at
        FROM media_uploads m
        JOIN users u ON u.id = m.user_id
        WHERE m.user_id = ?
        ORDER BY m.created_at DESC, m.id DESC
        LIMIT ?
        "#,
    )?;
    let uploads = stmt
        .query_map((user_id, MAX_LISTED_UPLOADS), map_upload)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(uploads)
}

/// Newest-first uploads belonging to `user_id`.
///
/// Best-effort: a failed query is logged and reported as an empty list so
/// account pages keep rendering.
pub fn list_for_user(db: &Database, user_id: i64) -> Vec<MediaUpload> {
    match query_uploads(db, user_id) {
        Ok(uploads) => uploads,
        Err(e) => {
            tracing::error!("Failed to list uploads for user {}: {:#}", user_id, e);
            Vec::new()
        }
    }
}
