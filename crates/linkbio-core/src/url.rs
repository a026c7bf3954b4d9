//! Link destination normalization.

use ::url::Url;

use crate::model::LinkIcon;

/// Schemes a rendered link may point at.
const SAFE_SCHEMES: &[&str] = &["https://", "http://", "mailto:", "tel:"];

/// Normalize a stored link destination into something clickable.
///
/// - empty stays empty
/// - values that start with a scheme are left as is
/// - protocol-relative `//host` becomes `https://host`
/// - a bare e-mail address on a [`LinkIcon::Mail`] link gets `mailto:`
/// - everything else gets `https://`
pub fn normalize_href(raw: &str, icon: LinkIcon) -> String {
    let href = raw.trim();

    if href.is_empty() {
        return String::new();
    }
    if leading_scheme(href).is_some() {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if icon == LinkIcon::Mail && href.contains('@') && !href.contains('/') {
        return format!("mailto:{href}");
    }

    format!("https://{href}")
}

/// Check if a normalized destination is safe to use in an `href` attribute.
pub fn is_safe_href(href: &str) -> bool {
    SAFE_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Host (or address) portion of a destination, for use as a fallback label.
///
/// Bare destinations are read as `https://` URLs. Returns an empty string
/// when nothing host-like can be extracted.
pub fn display_host(href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    let parsed = match leading_scheme(href) {
        Some(_) => Url::parse(href),
        None => Url::parse(&format!("https://{}", href.trim_start_matches('/'))),
    };
    let Ok(url) = parsed else {
        return String::new();
    };

    match url.host_str() {
        Some(host) => host.to_string(),
        None if url.cannot_be_a_base() => url.path().to_string(),
        None => String::new(),
    }
}

/// The scheme `href` starts with, if any.
///
/// A scheme is a leading `[A-Za-z][A-Za-z0-9+.-]*` token ending in `:`,
/// with the colon before any `/`, `?` or `#`. `host:port` is not a scheme:
/// a colon followed only by digits up to the path is read as a port.
fn leading_scheme(href: &str) -> Option<&str> {
    let colon = href.find(':')?;
    if href[..colon].contains(['/', '?', '#']) {
        return None;
    }

    let scheme = &href[..colon];
    let mut chars = scheme.chars();
    let first_is_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if !first_is_alpha || !rest_valid {
        return None;
    }

    if is_safe_href(href) {
        return Some(scheme);
    }

    let after = &href[colon + 1..];
    let port_end = after.find(['/', '?', '#']).unwrap_or(after.len());
    let port = &after[..port_end];
    if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(scheme)
}
