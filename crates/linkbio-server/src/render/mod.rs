//! HTML rendering for profile pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).

pub mod components;
pub mod profile;
pub mod theme;

use chrono::Datelike;
use maud::Markup;

use linkbio_core::Normalized;

use crate::config::Config;

/// Render a normalized profile into a complete HTML page.
pub fn render_page(config: &Config, identifier: &str, normalized: &Normalized) -> Markup {
    profile::render(
        identifier,
        &normalized.record,
        &config.base_url,
        &config.site_name,
        chrono::Utc::now().year(),
    )
}
