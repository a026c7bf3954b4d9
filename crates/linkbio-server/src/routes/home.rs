//! Home page: short landing page explaining how to publish a profile.

use axum::extract::State;
use axum::response::IntoResponse;
use maud::html;

use linkbio_core::{LinkIcon, Theme};

use crate::render::components::{self, OpenGraphData};
use crate::render::theme;
use crate::state::AppState;

const EXAMPLE_PAYLOAD: &str = r#"{
  "profileData": {
    "avatarUrl": "https://example.com/me.png",
    "name": "Ada",
    "bio": "Engineer",
    "links": [
      { "id": "1", "href": "github.com/ada", "icon": "Github", "title": "GitHub" }
    ]
  },
  "theme": "aurora"
}"#;

/// Render the home page.
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.config;
    let description = "Publish a single page of links and share it with one short URL.";
    let icons = LinkIcon::ALL
        .iter()
        .map(|icon| icon.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let themes = Theme::ALL
        .iter()
        .map(|theme| theme.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let body = html! {
        main {
            div class="home" {
                h1 { (config.site_name) }
                p { (description) }

                p { "Save a profile:" }
                pre { code { "curl -X POST " (config.base_url) "/api/save -H 'content-type: application/json' -d @profile.json" } }
                pre { code { (EXAMPLE_PAYLOAD) } }

                p { "The response carries the new identifier:" }
                pre { code { "{\"uniqueId\":\"aB3xYz\"}" } }

                p { "Then share " code { (config.base_url) "/u/aB3xYz" } ". Append " code { ".json" } " for the normalized data." }

                p { "Icons: " (icons) ". Themes: " (themes) "." }
            }
        }
        footer class="footer" {
            (config.site_name) " \u{b7} "
            a href="/health" { "status" }
        }
    };

    components::page_shell(
        &config.site_name,
        description,
        &config.base_url,
        OpenGraphData {
            title: &config.site_name,
            description,
            og_type: "website",
            image: None,
        },
        theme::palette(Theme::Dark),
        body,
        &config.site_name,
    )
}
