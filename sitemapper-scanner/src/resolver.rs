//! Joins hrefs found on a page onto the page's own URL.
//!
//! Resolution is purely textual: no percent-decoding, no query or fragment
//! stripping and no trailing-slash canonicalization. `http://a.test/x` and
//! `http://a.test/x/` are two different URLs as far as the crawl is concerned.

/// Returns true when `href` already carries an `http://` or `https://` scheme.
pub fn is_absolute(href: &str) -> bool {
    has_prefix_ignore_case(href, "http://") || has_prefix_ignore_case(href, "https://")
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Resolve `href` against `base`.
///
/// Absolute hrefs come back unchanged. Otherwise exactly one `/` ends up
/// between the two halves, whichever side supplied it.
pub fn resolve(base: &str, href: &str) -> String {
    if is_absolute(href) {
        return href.to_string();
    }

    match (base.ends_with('/'), href.starts_with('/')) {
        (true, true) => format!("{}{}", base, &href[1..]),
        (false, false) => format!("{}/{}", base, href),
        _ => format!("{}{}", base, href),
    }
}
