pub mod cli;
pub mod config;
pub mod db;
pub mod i18n;
pub mod models;
pub mod seo;
pub mod services;
pub mod web;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use db::Database;
