pub mod auth;
pub mod blog;
pub mod contact;
pub mod markdown;
pub mod notifications;
pub mod slug;
pub mod uploads;
