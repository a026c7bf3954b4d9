//! Profile page renderer.
//!
//! Avatar (or initial), name, bio, then one card per link in saved order.

use maud::{Markup, html};

use linkbio_core::ProfileRecord;

use super::components::{self, OpenGraphData, is_safe_url, link_card, truncate};
use super::theme;

/// Render a complete profile page.
pub fn render(
    identifier: &str,
    profile: &ProfileRecord,
    base_url: &str,
    site_name: &str,
    year: i32,
) -> Markup {
    let name = profile.name.trim();
    let display_name = if name.is_empty() { "Anonymous" } else { name };

    let title = format!("{display_name} | {site_name}");
    let description = if profile.bio.trim().is_empty() {
        format!("Links from {display_name}")
    } else {
        truncate(profile.bio.trim(), 200)
    };
    let canonical = format!("{base_url}/u/{identifier}");

    let avatar = profile.avatar_url.trim();
    let avatar = is_safe_url(avatar).then_some(avatar);
    let og_image = avatar.filter(|url| url.starts_with("https://"));

    let og = OpenGraphData {
        title: &title,
        description: &description,
        og_type: "profile",
        image: og_image,
    };

    let body = html! {
        main {
            div class="profile" {
                header class="profile-header" {
                    div class="avatar" {
                        (profile.initial())
                        @if let Some(url) = avatar {
                            img src=(url) alt=(display_name) loading="eager";
                        }
                    }
                    h1 class="profile-name" { (display_name) }
                    @if !profile.bio.trim().is_empty() {
                        p class="profile-bio" { (profile.bio.trim()) }
                    }
                }

                @if profile.links.is_empty() {
                    p class="empty-links" { "No links yet." }
                } @else {
                    nav class="links" aria-label="Links" {
                        @for link in &profile.links {
                            (link_card(link))
                        }
                    }
                }
            }
        }
        footer class="footer" {
            "\u{a9} " (year) " " (display_name)
            " \u{b7} "
            a href="/" { "Made with " (site_name) }
        }
    };

    components::page_shell(
        &title,
        &description,
        &canonical,
        og,
        theme::palette(profile.theme),
        body,
        site_name,
    )
}
