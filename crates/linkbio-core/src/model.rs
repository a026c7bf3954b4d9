//! Profile data model.

use serde::{Deserialize, Serialize};

/// A normalized profile, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Avatar image URL. Only checked for type, may be empty.
    pub avatar_url: String,
    /// Display name.
    pub name: String,
    /// Free-text biography.
    pub bio: String,
    /// Links in display order.
    pub links: Vec<LinkItem>,
    /// Presentation theme.
    #[serde(default)]
    pub theme: Theme,
}

impl ProfileRecord {
    /// First character of the name, uppercased, for the avatar placeholder.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

/// One labeled outbound link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    /// Identifier, unique within the owning record.
    pub id: String,
    /// Destination as stored. May lack a scheme.
    pub href: String,
    /// Icon shown beside the title.
    pub icon: LinkIcon,
    /// Display label.
    pub title: String,
}

/// Presentation theme for a profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Zinc background with a blue accent.
    #[default]
    Dark,
    /// Indigo-to-pink gradient background.
    Aurora,
}

impl Theme {
    /// All themes, in the order the editor offers them.
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Aurora];

    /// Parse a stored theme tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(tag.trim()))
    }

    /// The tag used in stored payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Aurora => "aurora",
        }
    }
}

/// Icon symbols a link may carry. Unknown names fall back to [`LinkIcon::Globe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkIcon {
    Github,
    Twitter,
    Linkedin,
    #[default]
    Globe,
    Mail,
    Youtube,
    Instagram,
}

impl LinkIcon {
    pub const ALL: [LinkIcon; 7] = [
        LinkIcon::Github,
        LinkIcon::Twitter,
        LinkIcon::Linkedin,
        LinkIcon::Globe,
        LinkIcon::Mail,
        LinkIcon::Youtube,
        LinkIcon::Instagram,
    ];

    /// Parse an icon name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// The icon's stored name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "Github",
            Self::Twitter => "Twitter",
            Self::Linkedin => "Linkedin",
            Self::Globe => "Globe",
            Self::Mail => "Mail",
            Self::Youtube => "Youtube",
            Self::Instagram => "Instagram",
        }
    }
}
