use serde::Serialize;

/// A file a user uploaded (product photos, partner documents).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MediaUpload {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: String,
}
