use crate::i18n::Locale;
use crate::models::{ContactMessage, NewContactMessage};
use crate::services::auth;
use crate::Database;
use anyhow::Result;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_MESSAGE_LENGTH: usize = 5000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name must be between 1 and 100 characters")]
    InvalidName,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("message must be between 1 and 5000 characters")]
    InvalidMessage,
}

impl ContactError {
    /// Dictionary key of the message shown next to the form.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidName => "contact.errors.name",
            Self::InvalidEmail => "contact.errors.email",
            Self::InvalidMessage => "contact.errors.message",
        }
    }
}

/// Trims the submission and checks it, returning the cleaned message.
pub fn validate(msg: &NewContactMessage) -> Result<NewContactMessage, ContactError> {
    let name = msg.name.trim();
    let email = msg.email.trim();
    let message = msg.message.trim();

    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        return Err(ContactError::InvalidName);
    }
    if auth::validate_email(email).is_err() {
        return Err(ContactError::InvalidEmail);
    }
    if message.is_empty() || message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ContactError::InvalidMessage);
    }

    Ok(NewContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        locale: msg.locale,
    })
}

pub fn submit(db: &Database, msg: &NewContactMessage) -> Result<i64> {
    let msg = validate(msg)?;
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO contact_messages (name, email, message, locale) VALUES (?, ?, ?, ?)",
        (&msg.name, &msg.email, &msg.message, msg.locale.code()),
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, locale = %msg.locale, "Contact message received");
    Ok(id)
}

pub fn list_recent(db: &Database, limit: usize) -> Result<Vec<ContactMessage>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, name, email, message, locale, created_at FROM contact_messages ORDER BY created_at DESC, id DESC LIMIT ?",
    )?;
    let messages = stmt
        .query_map([limit], |row| {
            Ok(ContactMessage {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                message: row.get(3)?,
                locale: Locale::resolve(row.get::<_, String>(4).ok().as_deref(), Locale::default()),
                created_at: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(messages)
}
