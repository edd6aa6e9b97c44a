use slug::slugify;

pub const MAX_SLUG_LENGTH: usize = 200;

/// URL slug for a title. Cyrillic (including Kazakh letters) is
/// transliterated to ASCII.
pub fn generate_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.len() > MAX_SLUG_LENGTH {
        slug[..MAX_SLUG_LENGTH].trim_end_matches('-').to_string()
    } else {
        slug
    }
}

pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
