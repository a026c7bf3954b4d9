//! Tolerant normalization of stored profile payloads.
//!
//! Saved payloads are arbitrary JSON. Two shapes are understood:
//!
//! ```text
//! { "profileData": { avatarUrl, name, bio, links }, "theme": "aurora" }
//! { avatarUrl, name, bio, links, theme? }
//! ```
//!
//! The top-level fields must be present with the right types or the
//! payload is rejected. Individual links are repaired instead: a broken
//! link entry should not hide an otherwise valid profile. Every repair
//! is reported as an [`AppliedDefault`].

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{LinkIcon, LinkItem, ProfileRecord, Theme};
use crate::url::display_host;

/// Label used when a link has neither a title nor a destination.
pub const DEFAULT_LINK_TITLE: &str = "Link";

/// A successfully normalized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    /// The profile, with every default already applied.
    pub record: ProfileRecord,
    /// Repairs made while building `record`, in the order they happened.
    pub defaults: Vec<AppliedDefault>,
}

/// A repair made during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedDefault {
    /// Theme tag was present but unrecognized.
    Theme { found: String },
    /// Link entry was not an object and was dropped.
    LinkDropped { index: usize },
    /// A link field was missing, wrong-typed or unknown and got a default.
    LinkField { index: usize, field: LinkField },
    /// Link id repeated an earlier one and was made unique.
    DuplicateLinkId { index: usize, original: String },
}

/// Link fields that may be defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkField {
    Id,
    Href,
    Icon,
    Title,
}

/// Normalize a stored payload.
///
/// Returns `None` when the payload is not an object, or when `avatarUrl`,
/// `name`, `bio` or `links` is missing or has the wrong type.
pub fn normalize(value: &Value) -> Option<Normalized> {
    let outer = value.as_object()?;
    let mut defaults = Vec::new();

    let (profile, theme_tag) = match outer.get("profileData") {
        Some(inner) => (inner.as_object()?, outer.get("theme")),
        None => (outer, outer.get("theme")),
    };

    let avatar_url = profile.get("avatarUrl")?.as_str()?.to_string();
    let name = profile.get("name")?.as_str()?.to_string();
    let bio = profile.get("bio")?.as_str()?.to_string();
    let raw_links = profile.get("links")?.as_array()?;

    let theme = normalize_theme(theme_tag, &mut defaults);
    let links = normalize_links(raw_links, &mut defaults);

    if !defaults.is_empty() {
        tracing::debug!(count = defaults.len(), "applied normalization defaults");
    }

    Some(Normalized {
        record: ProfileRecord {
            avatar_url,
            name,
            bio,
            links,
            theme,
        },
        defaults,
    })
}

fn normalize_theme(tag: Option<&Value>, defaults: &mut Vec<AppliedDefault>) -> Theme {
    match tag {
        None | Some(Value::Null) => Theme::default(),
        Some(Value::String(s)) if s.trim().is_empty() => Theme::default(),
        Some(Value::String(s)) => Theme::from_tag(s).unwrap_or_else(|| {
            defaults.push(AppliedDefault::Theme { found: s.clone() });
            Theme::default()
        }),
        Some(other) => {
            defaults.push(AppliedDefault::Theme {
                found: other.to_string(),
            });
            Theme::default()
        }
    }
}

fn normalize_links(raw: &[Value], defaults: &mut Vec<AppliedDefault>) -> Vec<LinkItem> {
    let mut seen_ids = HashSet::new();
    let mut links = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            defaults.push(AppliedDefault::LinkDropped { index });
            continue;
        };

        let mut link = normalize_link(index, obj, defaults);

        if !seen_ids.insert(link.id.clone()) {
            let original = link.id.clone();
            while seen_ids.contains(&link.id) {
                link.id = format!("{}-{index}", link.id);
            }
            seen_ids.insert(link.id.clone());
            defaults.push(AppliedDefault::DuplicateLinkId { index, original });
        }

        links.push(link);
    }

    links
}

fn normalize_link(
    index: usize,
    obj: &Map<String, Value>,
    defaults: &mut Vec<AppliedDefault>,
) -> LinkItem {
    let mut field_default = |field| defaults.push(AppliedDefault::LinkField { index, field });

    let id = match non_empty_str(obj.get("id")) {
        Some(id) => id.to_string(),
        None => {
            field_default(LinkField::Id);
            format!("link-{index}")
        }
    };

    let href = match obj
        .get("href")
        .filter(|v| v.is_string())
        .or_else(|| obj.get("url"))
        .and_then(Value::as_str)
    {
        Some(href) => href.trim().to_string(),
        None => {
            field_default(LinkField::Href);
            String::new()
        }
    };

    let icon = match obj
        .get("icon")
        .and_then(Value::as_str)
        .and_then(LinkIcon::from_name)
    {
        Some(icon) => icon,
        None => {
            field_default(LinkField::Icon);
            LinkIcon::default()
        }
    };

    let title = match non_empty_str(obj.get("title")) {
        Some(title) => title.to_string(),
        None => {
            field_default(LinkField::Title);
            let host = display_host(&href);
            if host.is_empty() {
                DEFAULT_LINK_TITLE.to_string()
            } else {
                host
            }
        }
    };

    LinkItem {
        id,
        href,
        icon,
        title,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_profile() -> Value {
        json!({
            "avatarUrl": "https://example.com/ada.png",
            "name": "Ada",
            "bio": "Engineer",
            "links": [
                { "id": "1", "href": "https://github.com/ada", "icon": "Github", "title": "GitHub" },
                { "id": "2", "href": "ada.dev", "icon": "Globe", "title": "Site" }
            ]
        })
    }

    #[test]
    fn flat_payload_normalizes() {
        let n = normalize(&flat_profile()).unwrap();
        assert_eq!(n.record.name, "Ada");
        assert_eq!(n.record.bio, "Engineer");
        assert_eq!(n.record.theme, Theme::Dark);
        assert_eq!(n.record.links.len(), 2);
        assert_eq!(n.record.links[0].icon, LinkIcon::Github);
        assert!(n.defaults.is_empty());
    }

    #[test]
    fn wrapped_payload_uses_wrapper_theme() {
        let value = json!({ "profileData": flat_profile(), "theme": "aurora" });
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.theme, Theme::Aurora);
        assert_eq!(n.record.links.len(), 2);
    }

    #[test]
    fn flat_payload_theme_inside_profile() {
        let mut value = flat_profile();
        value["theme"] = json!("aurora");
        assert_eq!(normalize(&value).unwrap().record.theme, Theme::Aurora);
    }

    #[test]
    fn unknown_theme_defaults_and_is_recorded() {
        let value = json!({ "profileData": flat_profile(), "theme": "neon" });
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.theme, Theme::Dark);
        assert_eq!(
            n.defaults,
            vec![AppliedDefault::Theme {
                found: "neon".to_string()
            }]
        );
    }

    #[test]
    fn non_string_theme_is_recorded() {
        let value = json!({ "profileData": flat_profile(), "theme": 3 });
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.theme, Theme::Dark);
        assert_eq!(n.defaults.len(), 1);
    }

    #[test]
    fn non_object_payload_rejected() {
        assert!(normalize(&json!("hello")).is_none());
        assert!(normalize(&json!([1, 2])).is_none());
        assert!(normalize(&Value::Null).is_none());
    }

    #[test]
    fn wrapped_non_object_profile_rejected() {
        assert!(normalize(&json!({ "profileData": "nope", "theme": "dark" })).is_none());
    }

    #[test]
    fn missing_required_fields_rejected() {
        for field in ["avatarUrl", "name", "bio", "links"] {
            let mut value = flat_profile();
            value.as_object_mut().unwrap().remove(field);
            assert!(normalize(&value).is_none(), "missing {field} accepted");
        }
    }

    #[test]
    fn wrong_typed_required_fields_rejected() {
        let mut value = flat_profile();
        value["name"] = json!(42);
        assert!(normalize(&value).is_none());

        let mut value = flat_profile();
        value["links"] = json!({ "id": "1" });
        assert!(normalize(&value).is_none());
    }

    #[test]
    fn empty_bio_and_avatar_accepted() {
        let mut value = flat_profile();
        value["bio"] = json!("");
        value["avatarUrl"] = json!("");
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.bio, "");
        assert_eq!(n.record.avatar_url, "");
    }

    #[test]
    fn link_missing_title_and_icon_is_defaulted() {
        let mut value = flat_profile();
        value["links"] = json!([
            { "id": "a", "href": "https://github.com/ada", "icon": "Github", "title": "GitHub" },
            { "id": "b", "href": "https://ada.dev/about" },
            { "id": "c", "href": "https://x.com/ada", "icon": "Twitter", "title": "X" }
        ]);

        let n = normalize(&value).unwrap();
        assert_eq!(n.record.links.len(), 3);

        let partial = &n.record.links[1];
        assert_eq!(partial.icon, LinkIcon::Globe);
        assert_eq!(partial.title, "ada.dev");
        assert_eq!(n.record.links[0].title, "GitHub");
        assert_eq!(n.record.links[2].title, "X");

        assert_eq!(
            n.defaults,
            vec![
                AppliedDefault::LinkField {
                    index: 1,
                    field: LinkField::Icon
                },
                AppliedDefault::LinkField {
                    index: 1,
                    field: LinkField::Title
                },
            ]
        );
    }

    #[test]
    fn link_without_anything_gets_all_defaults() {
        let mut value = flat_profile();
        value["links"] = json!([{}]);
        let n = normalize(&value).unwrap();
        let link = &n.record.links[0];
        assert_eq!(link.id, "link-0");
        assert_eq!(link.href, "");
        assert_eq!(link.icon, LinkIcon::Globe);
        assert_eq!(link.title, DEFAULT_LINK_TITLE);
        assert_eq!(n.defaults.len(), 4);
    }

    #[test]
    fn null_href_falls_back_to_url() {
        let mut value = flat_profile();
        value["links"] = json!([{ "id": "1", "href": null, "url": "example.com", "icon": "Globe" }]);
        let n = normalize(&value).unwrap();
        let link = &n.record.links[0];
        assert_eq!(link.href, "example.com");
        assert_eq!(link.title, "example.com");
        assert_eq!(
            n.defaults,
            vec![AppliedDefault::LinkField {
                index: 0,
                field: LinkField::Title
            }]
        );
    }

    #[test]
    fn default_title_ignores_embedded_url() {
        let mut value = flat_profile();
        value["links"] = json!([{ "id": "1", "href": "example.com/out?to=https://other.com" }]);
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.links[0].title, "example.com");
    }

    #[test]
    fn url_field_accepted_as_destination() {
        let mut value = flat_profile();
        value["links"] = json!([{ "id": "1", "url": "example.com", "icon": "Globe", "title": "Ex" }]);
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.links[0].href, "example.com");
        assert!(n.defaults.is_empty());
    }

    #[test]
    fn unknown_icon_falls_back_to_globe() {
        let mut value = flat_profile();
        value["links"] = json!([{ "id": "1", "href": "a.b", "icon": "Mastodon", "title": "M" }]);
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.links[0].icon, LinkIcon::Globe);
        assert_eq!(
            n.defaults,
            vec![AppliedDefault::LinkField {
                index: 0,
                field: LinkField::Icon
            }]
        );
    }

    #[test]
    fn non_object_links_dropped_others_kept() {
        let mut value = flat_profile();
        value["links"] = json!([
            "garbage",
            { "id": "1", "href": "a.b", "icon": "Globe", "title": "A" },
            null
        ]);
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.links.len(), 1);
        assert_eq!(n.record.links[0].id, "1");
        assert_eq!(
            n.defaults,
            vec![
                AppliedDefault::LinkDropped { index: 0 },
                AppliedDefault::LinkDropped { index: 2 },
            ]
        );
    }

    #[test]
    fn duplicate_link_ids_made_unique() {
        let mut value = flat_profile();
        value["links"] = json!([
            { "id": "x", "href": "a.b", "icon": "Globe", "title": "A" },
            { "id": "x", "href": "c.d", "icon": "Globe", "title": "C" }
        ]);
        let n = normalize(&value).unwrap();
        assert_eq!(n.record.links[0].id, "x");
        assert_eq!(n.record.links[1].id, "x-1");
        assert_eq!(
            n.defaults,
            vec![AppliedDefault::DuplicateLinkId {
                index: 1,
                original: "x".to_string()
            }]
        );
    }

    #[test]
    fn link_order_preserved() {
        let n = normalize(&flat_profile()).unwrap();
        let ids: Vec<_> = n.record.links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn applied_default_serializes_tagged() {
        let json = serde_json::to_value(AppliedDefault::LinkField {
            index: 2,
            field: LinkField::Title,
        })
        .unwrap();
        assert_eq!(json, json!({ "kind": "link_field", "index": 2, "field": "title" }));
    }
}
