use super::Locale;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

#[derive(RustEmbed)]
#[folder = "locales/"]
struct LocaleAssets;

static DICTIONARIES: Lazy<Dictionaries> = Lazy::new(|| {
    Dictionaries::load().expect("embedded locale dictionaries must be valid JSON objects")
});

/// Translation strings for a single locale.
#[derive(Debug, Clone)]
pub struct Dictionary {
    locale: Locale,
    messages: Value,
    version: String,
}

impl Dictionary {
    pub fn from_json(locale: Locale, raw: &[u8]) -> Result<Self> {
        let messages: Value = serde_json::from_slice(raw)
            .with_context(|| format!("locale dictionary '{}' is not valid JSON", locale))?;
        if !messages.is_object() {
            anyhow::bail!("locale dictionary '{}' must be a JSON object", locale);
        }

        let digest = Sha256::digest(raw);
        let version = hex::encode(&digest[..8]);

        Ok(Self {
            locale,
            messages,
            version,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn messages(&self) -> &Value {
        &self.messages
    }

    /// Short content hash, stable for as long as the JSON file is unchanged.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks up a dotted key such as `nav.home`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.lookup_value(key).and_then(Value::as_str)
    }

    pub fn lookup_value(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.messages, |node, segment| node.get(segment))
    }

    /// Every dotted path that ends in a non-object value.
    pub fn leaf_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        collect_leaf_keys(&self.messages, String::new(), &mut keys);
        keys
    }
}

fn collect_leaf_keys(value: &Value, prefix: String, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                collect_leaf_keys(v, path, out);
            }
        }
        _ => {
            out.insert(prefix);
        }
    }
}

/// The full set of dictionaries, one per supported locale.
#[derive(Debug)]
pub struct Dictionaries {
    kk: Dictionary,
    ru: Dictionary,
}

impl Dictionaries {
    /// Process-wide dictionaries, parsed from the embedded assets on first use.
    pub fn get() -> &'static Dictionaries {
        &DICTIONARIES
    }

    pub fn load() -> Result<Self> {
        Ok(Self {
            kk: load_embedded(Locale::Kk)?,
            ru: load_embedded(Locale::Ru)?,
        })
    }

    pub fn dictionary(&self, locale: Locale) -> &Dictionary {
        match locale {
            Locale::Kk => &self.kk,
            Locale::Ru => &self.ru,
        }
    }

    /// Translates `key` for `locale`, falling back to the site's `default`
    /// locale and finally to the key itself so a missing string is visible,
    /// not fatal.
    pub fn translate(&self, locale: Locale, default: Locale, key: &str) -> String {
        self.dictionary(locale)
            .lookup(key)
            .or_else(|| self.dictionary(default).lookup(key))
            .unwrap_or(key)
            .to_string()
    }

    /// Keys present in `a`'s dictionary but absent from `b`'s.
    pub fn missing_keys(&self, a: Locale, b: Locale) -> Vec<String> {
        let theirs = self.dictionary(b).leaf_keys();
        self.dictionary(a)
            .leaf_keys()
            .into_iter()
            .filter(|k| !theirs.contains(k))
            .collect()
    }
}

fn load_embedded(locale: Locale) -> Result<Dictionary> {
    let filename = format!("{}.json", locale.code());
    let file = LocaleAssets::get(&filename)
        .with_context(|| format!("missing embedded dictionary {}", filename))?;
    Dictionary::from_json(locale, &file.data)
}
