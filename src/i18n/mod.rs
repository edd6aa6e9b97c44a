//! Locale handling and translation dictionaries.
//!
//! The storefront speaks two languages. Each has a JSON dictionary embedded
//! in the binary from `locales/<code>.json`; lookups never fail, unknown
//! locales fall back to the default one and unknown keys to the key itself.

mod dictionary;
mod locale;

pub use dictionary::{Dictionaries, Dictionary};
pub use locale::{Locale, LocaleError};
