//! Shared HTML components used across pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

use linkbio_core::url::{is_safe_href, normalize_href};
use linkbio_core::{LinkIcon, LinkItem};

use super::theme::Palette;

/// Inline CSS for profile and home pages.
///
/// Colors come from the theme's custom properties (see `Palette::css_vars`).
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;overflow-x:hidden}
.orbs{position:fixed;inset:0;z-index:-1;overflow:hidden;pointer-events:none}
.orb{position:absolute;border-radius:50%;filter:blur(64px)}
.orb-top{top:25%;left:-5rem;width:18rem;height:18rem;background:var(--orb-top)}
.orb-bottom{bottom:25%;right:-5rem;width:20rem;height:20rem;background:var(--orb-bottom)}
main{flex:1;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:3rem 1rem}
.profile{width:100%;max-width:28rem}
.profile-header{display:flex;flex-direction:column;align-items:center;text-align:center;gap:1rem;margin-bottom:2rem}
.avatar{position:relative;width:96px;height:96px;border-radius:50%;overflow:hidden;background:var(--primary);box-shadow:0 0 0 4px var(--border),0 10px 15px -3px rgba(0,0,0,.3);display:flex;align-items:center;justify-content:center;color:#fff;font-weight:700;font-size:2.2rem}
.avatar img{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}
.profile-name{font-size:1.5rem;font-weight:700;color:var(--fg);word-break:break-word}
.profile-bio{font-size:.875rem;color:var(--muted);max-width:24rem;white-space:pre-wrap;word-break:break-word}
.links{display:flex;flex-direction:column;gap:.75rem}
.link-card{display:flex;align-items:center;gap:.75rem;width:100%;padding:1rem;background:var(--card);border:1px solid var(--card-border);border-radius:.5rem;color:var(--fg);text-decoration:none;backdrop-filter:blur(4px);transition:all .2s;box-shadow:0 1px 2px rgba(0,0,0,.2)}
a.link-card:hover{background:var(--card-hover);border-color:var(--card-border-hover);box-shadow:0 4px 6px -1px rgba(0,0,0,.3)}
.link-card.disabled{opacity:.6;cursor:default}
.link-title{font-weight:500;flex:1;min-width:0;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
svg.icon{width:20px;height:20px;flex-shrink:0;fill:none;stroke:currentColor;stroke-width:2;stroke-linecap:round;stroke-linejoin:round}
svg.icon-external{width:16px;height:16px;color:var(--muted)}
.empty-links{text-align:center;color:var(--muted);font-size:.875rem}
.footer{padding:1.5rem 1rem;text-align:center;border-top:1px solid var(--border);font-size:.75rem;color:var(--muted)}
.footer a{color:var(--muted);text-decoration:underline}
.home{max-width:40rem;width:100%}
.home h1{font-size:2rem;font-weight:700;margin-bottom:.5rem}
.home p{color:var(--muted);margin:.75rem 0}
.home pre{background:var(--card);border:1px solid var(--card-border);border-radius:.5rem;padding:.75rem 1rem;overflow-x:auto;font-size:.8rem;margin:.75rem 0;color:var(--fg)}
.home code{font-family:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#18181b;color:#fafafa;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#a1a1aa;margin-bottom:1rem;line-height:1.5;word-break:break-word}
.error-page a{color:#60a5fa}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles only. No scripts, no frames; avatars may load over
/// HTTP(S) or data URIs.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src https: http: data:; form-action 'none'; frame-ancestors 'none'; base-uri 'none'";

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "profile", "website").
    pub og_type: &'a str,
    /// OG image URL (must be HTTPS).
    pub image: Option<&'a str>,
}

/// Render the full HTML page shell with `<head>`, OG tags, theme variables
/// and body content.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    palette: &Palette,
    body_content: Markup,
    site_name: &str,
) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                meta name="theme-color" content=(palette.theme_color);
                link rel="canonical" href=(canonical_url);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                @if let Some(image) = og.image {
                    meta property="og:image" content=(image);
                }

                // Twitter Card
                meta name="twitter:card" content="summary";
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);
                @if let Some(image) = og.image {
                    meta name="twitter:image" content=(image);
                }

                style { (PreEscaped(PAGE_CSS)) }
                style { (PreEscaped(palette.css_vars())) }
            }
            body {
                div class="orbs" aria-hidden="true" {
                    div class="orb orb-top" {}
                    div class="orb orb-bottom" {}
                }
                (body_content)
            }
        }
    }
}

// -- Link icon SVGs (stroke style, 24x24) --

const ICON_GITHUB: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22"/></svg>"#;

const ICON_TWITTER: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M23 3a10.9 10.9 0 0 1-3.14 1.53 4.48 4.48 0 0 0-7.86 3v1A10.66 10.66 0 0 1 3 4s-4 9 5 13a11.64 11.64 0 0 1-7 2c9 5 20 0 20-11.5a4.5 4.5 0 0 0-.08-.83A7.72 7.72 0 0 0 23 3z"/></svg>"#;

const ICON_LINKEDIN: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"/><rect x="2" y="9" width="4" height="12"/><circle cx="4" cy="4" r="2"/></svg>"#;

const ICON_GLOBE: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><circle cx="12" cy="12" r="10"/><line x1="2" y1="12" x2="22" y2="12"/><path d="M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z"/></svg>"#;

const ICON_MAIL: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z"/><polyline points="22,6 12,13 2,6"/></svg>"#;

const ICON_YOUTUBE: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M22.54 6.42a2.78 2.78 0 0 0-1.94-2C18.88 4 12 4 12 4s-6.88 0-8.6.46a2.78 2.78 0 0 0-1.94 2A29 29 0 0 0 1 11.75a29 29 0 0 0 .46 5.33A2.78 2.78 0 0 0 3.4 19c1.72.46 8.6.46 8.6.46s6.88 0 8.6-.46a2.78 2.78 0 0 0 1.94-2 29 29 0 0 0 .46-5.25 29 29 0 0 0-.46-5.33z"/><polygon points="9.75 15.02 15.5 11.75 9.75 8.48 9.75 15.02"/></svg>"#;

const ICON_INSTAGRAM: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><rect x="2" y="2" width="20" height="20" rx="5" ry="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" y1="6.5" x2="17.51" y2="6.5"/></svg>"#;

/// Arrow pointing out of the page, shown on clickable links.
const ICON_EXTERNAL: &str = r#"<svg class="icon icon-external" viewBox="0 0 24 24" aria-hidden="true"><line x1="7" y1="17" x2="17" y2="7"/><polyline points="7 7 17 7 17 17"/></svg>"#;

/// SVG markup for a link icon.
pub fn icon_svg(icon: LinkIcon) -> &'static str {
    match icon {
        LinkIcon::Github => ICON_GITHUB,
        LinkIcon::Twitter => ICON_TWITTER,
        LinkIcon::Linkedin => ICON_LINKEDIN,
        LinkIcon::Globe => ICON_GLOBE,
        LinkIcon::Mail => ICON_MAIL,
        LinkIcon::Youtube => ICON_YOUTUBE,
        LinkIcon::Instagram => ICON_INSTAGRAM,
    }
}

/// Render one link as a button-like card.
///
/// The destination is normalized first; anything that is still not an
/// http(s), mailto or tel URL renders as an inert card.
pub fn link_card(link: &LinkItem) -> Markup {
    let href = normalize_href(&link.href, link.icon);

    html! {
        @if is_safe_href(&href) {
            a class="link-card" href=(href) target="_blank" rel="noopener noreferrer nofollow" data-link-id=(link.id) {
                (PreEscaped(icon_svg(link.icon)))
                span class="link-title" { (link.title) }
                (PreEscaped(ICON_EXTERNAL))
            }
        } @else {
            div class="link-card disabled" data-link-id=(link.id) title="This link has no valid destination" {
                (PreEscaped(icon_svg(link.icon)))
                span class="link-title" { (link.title) }
            }
        }
    }
}

/// Check if a URL is safe to use in `src` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::theme::palette;
    use linkbio_core::Theme;

    fn link(href: &str, icon: LinkIcon) -> LinkItem {
        LinkItem {
            id: "l1".to_string(),
            href: href.to_string(),
            icon,
            title: "My <Site>".to_string(),
        }
    }

    // -- truncate() tests --

    #[test]
    fn truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn truncate_unicode_multibyte() {
        // "é" is 2 bytes; cutting at byte 1 must back off to 0
        assert_eq!(truncate("éé", 1), "...");
    }

    // -- is_safe_url() tests --

    #[test]
    fn is_safe_url_https() {
        assert!(is_safe_url("https://example.com/a.png"));
        assert!(is_safe_url("http://example.com/a.png"));
    }

    #[test]
    fn is_safe_url_rejects_other_schemes() {
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url(""));
        assert!(!is_safe_url("/avatar.png"));
    }

    // -- link_card() tests --

    #[test]
    fn link_card_prefixes_scheme() {
        let html = link_card(&link("example.com", LinkIcon::Globe)).into_string();
        assert!(html.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn link_card_keeps_existing_scheme() {
        let html = link_card(&link("https://example.com", LinkIcon::Globe)).into_string();
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(!html.contains("https://https://"));
    }

    #[test]
    fn link_card_escapes_title() {
        let html = link_card(&link("example.com", LinkIcon::Globe)).into_string();
        assert!(html.contains("My &lt;Site&gt;"));
        assert!(!html.contains("<Site>"));
    }

    #[test]
    fn link_card_without_destination_is_inert() {
        let html = link_card(&link("", LinkIcon::Globe)).into_string();
        assert!(html.contains("link-card disabled"));
        assert!(!html.contains("href="));
    }

    #[test]
    fn link_card_unsafe_scheme_is_inert() {
        let html = link_card(&link("ftp://example.com", LinkIcon::Globe)).into_string();
        assert!(html.contains("link-card disabled"));
    }

    #[test]
    fn link_card_uses_icon() {
        let html = link_card(&link("a.b", LinkIcon::Youtube)).into_string();
        assert!(html.contains(ICON_YOUTUBE));
    }

    #[test]
    fn every_icon_has_svg() {
        for icon in LinkIcon::ALL {
            assert!(icon_svg(icon).starts_with("<svg"));
        }
    }

    // -- page_shell() tests --

    #[test]
    fn page_shell_includes_og_and_palette() {
        let og = OpenGraphData {
            title: "Ada",
            description: "Engineer",
            og_type: "profile",
            image: Some("https://example.com/a.png"),
        };
        let html = page_shell(
            "Ada | linkbio",
            "Engineer",
            "https://bio.example/u/aB3xYz",
            og,
            palette(Theme::Aurora),
            html! { main { "body" } },
            "linkbio",
        )
        .into_string();

        assert!(html.contains(r#"property="og:image" content="https://example.com/a.png""#));
        assert!(html.contains(r#"rel="canonical" href="https://bio.example/u/aB3xYz""#));
        assert!(html.contains("--bg:linear-gradient"));
        assert!(html.contains("<main>body</main>"));
    }
}
