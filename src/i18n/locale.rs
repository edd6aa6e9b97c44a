use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported storefront language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Kk,
    #[default]
    Ru,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unknown locale code: '{0}'")]
    Unknown(String),
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Kk, Locale::Ru];

    /// Strict parse of a locale code. `kz` is accepted for Kazakh since that
    /// is the code most visitors from Kazakhstan type.
    pub fn from_code(code: &str) -> Result<Self, LocaleError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "kk" | "kz" => Ok(Self::Kk),
            "ru" => Ok(Self::Ru),
            _ => Err(LocaleError::Unknown(code.to_string())),
        }
    }

    /// Lenient parse: a missing or unsupported code silently yields `default`.
    pub fn resolve(code: Option<&str>, default: Locale) -> Self {
        code.and_then(|c| Self::from_code(c).ok())
            .unwrap_or(default)
    }

    /// Picks the best supported language from an `Accept-Language` header.
    ///
    /// Ranges are ordered by q-value (ties keep header order); region
    /// subtags are ignored, so `ru-RU` matches `ru`. Returns `default`
    /// when nothing matches.
    pub fn negotiate(accept_language: Option<&str>, default: Locale) -> Self {
        let Some(header) = accept_language else {
            return default;
        };

        let mut ranges: Vec<(f32, usize, &str)> = header
            .split(',')
            .enumerate()
            .filter_map(|(idx, part)| {
                let mut pieces = part.split(';');
                let tag = pieces.next()?.trim();
                if tag.is_empty() {
                    return None;
                }
                let q = pieces
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|v| v.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((q, idx, tag))
            })
            .filter(|(q, _, _)| *q > 0.0)
            .collect();

        ranges.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

        ranges
            .into_iter()
            .find_map(|(_, _, tag)| {
                let primary = tag.split('-').next().unwrap_or(tag);
                Self::from_code(primary).ok()
            })
            .unwrap_or(default)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Kk => "kk",
            Self::Ru => "ru",
        }
    }

    /// Open Graph / `og:locale` territory form.
    pub fn og_locale(&self) -> &'static str {
        match self {
            Self::Kk => "kk_KZ",
            Self::Ru => "ru_RU",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Kk => "Қазақша",
            Self::Ru => "Русский",
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
