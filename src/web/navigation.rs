use crate::i18n::{Dictionaries, Locale};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: &'static str,
    pub label_key: &'static str,
    pub label: String,
    pub active: bool,
}

const PUBLIC_LINKS: &[(&str, &str)] = &[
    ("/", "nav.home"),
    ("/blog", "nav.blog"),
    ("/press", "nav.press"),
    ("/contact", "nav.contact"),
];

const SIGNED_IN_LINKS: &[(&str, &str)] = &[
    ("/notifications", "nav.notifications"),
    ("/sign-out", "nav.sign_out"),
];

const SIGNED_OUT_LINKS: &[(&str, &str)] = &[("/sign-in", "nav.sign_in")];

fn is_active(href: &str, current_path: &str) -> bool {
    if href == "/" {
        return current_path == "/";
    }
    current_path == href
        || current_path
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Header links for the current visitor, labels resolved for `locale`.
pub fn nav_links(
    authenticated: bool,
    current_path: &str,
    locale: Locale,
    default_locale: Locale,
) -> Vec<NavLink> {
    let dicts = Dictionaries::get();
    let account_links = if authenticated {
        SIGNED_IN_LINKS
    } else {
        SIGNED_OUT_LINKS
    };

    PUBLIC_LINKS
        .iter()
        .chain(account_links.iter())
        .map(|&(href, label_key)| NavLink {
            href,
            label_key,
            label: dicts.translate(locale, default_locale, label_key),
            active: is_active(href, current_path),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(links: &[NavLink]) -> Vec<&str> {
        links.iter().map(|l| l.href).collect()
    }

    #[test]
    fn test_anonymous_links() {
        let links = nav_links(false, "/", Locale::Ru, Locale::Ru);
        assert_eq!(hrefs(&links), vec!["/", "/blog", "/press", "/contact", "/sign-in"]);
    }

    #[test]
    fn test_authenticated_links() {
        let links = nav_links(true, "/", Locale::Ru, Locale::Ru);
        assert_eq!(
            hrefs(&links),
            vec!["/", "/blog", "/press", "/contact", "/notifications", "/sign-out"]
        );
    }

    #[test]
    fn test_single_active_link() {
        let links = nav_links(true, "/blog/some-post", Locale::Kk, Locale::Ru);
        let active: Vec<_> = links.iter().filter(|l| l.active).map(|l| l.href).collect();
        assert_eq!(active, vec!["/blog"]);
    }

    #[test]
    fn test_home_active_only_on_root() {
        let links = nav_links(false, "/press", Locale::Ru, Locale::Ru);
        assert!(!links[0].active);
        assert!(links.iter().any(|l| l.href == "/press" && l.active));
    }

    #[test]
    fn test_no_active_for_unknown_path() {
        let links = nav_links(false, "/blogger", Locale::Ru, Locale::Ru);
        assert!(links.iter().all(|l| !l.active));
    }

    #[test]
    fn test_labels_are_localized() {
        let kk = nav_links(false, "/", Locale::Kk, Locale::Ru);
        let ru = nav_links(false, "/", Locale::Ru, Locale::Ru);
        assert_eq!(kk[0].label, "Басты бет");
        assert_eq!(ru[0].label, "Главная");
    }
}
