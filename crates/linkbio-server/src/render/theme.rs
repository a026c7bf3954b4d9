//! Theme palettes.
//!
//! Each [`Theme`] maps to a set of CSS custom properties consumed by
//! `PAGE_CSS`.

use linkbio_core::Theme;

/// Visual parameters of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Human-readable theme name.
    pub label: &'static str,
    /// Page background (color or gradient).
    pub background: &'static str,
    /// Primary text color.
    pub foreground: &'static str,
    /// Secondary text color.
    pub muted: &'static str,
    /// Divider and avatar ring color.
    pub border: &'static str,
    /// Accent (avatar placeholder).
    pub primary: &'static str,
    /// Link card fill.
    pub card: &'static str,
    /// Link card fill on hover.
    pub card_hover: &'static str,
    /// Link card border.
    pub card_border: &'static str,
    /// Link card border on hover.
    pub card_border_hover: &'static str,
    /// Upper-left background glow.
    pub orb_top: &'static str,
    /// Lower-right background glow.
    pub orb_bottom: &'static str,
    /// Solid color for `<meta name="theme-color">`.
    pub theme_color: &'static str,
}

const DARK: Palette = Palette {
    label: "Dark",
    background: "#18181b",
    foreground: "#fafafa",
    muted: "#a1a1aa",
    border: "#3f3f46",
    primary: "#3b82f6",
    card: "rgba(39,39,42,.8)",
    card_hover: "#27272a",
    card_border: "#3f3f46",
    card_border_hover: "#52525b",
    orb_top: "rgba(59,130,246,.2)",
    orb_bottom: "rgba(168,85,247,.1)",
    theme_color: "#18181b",
};

const AURORA: Palette = Palette {
    label: "Aurora",
    background: "linear-gradient(135deg,#1e1b4b,#3b0764,#500724)",
    foreground: "#ffffff",
    muted: "#e9d5ff",
    border: "rgba(168,85,247,.3)",
    primary: "linear-gradient(90deg,#ec4899,#8b5cf6)",
    card: "rgba(255,255,255,.1)",
    card_hover: "rgba(255,255,255,.15)",
    card_border: "rgba(192,132,252,.3)",
    card_border_hover: "rgba(192,132,252,.5)",
    orb_top: "rgba(236,72,153,.3)",
    orb_bottom: "rgba(6,182,212,.2)",
    theme_color: "#1e1b4b",
};

/// Palette for a theme.
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Aurora => &AURORA,
    }
}

impl Palette {
    /// The palette as a `:root` rule of CSS custom properties.
    pub fn css_vars(&self) -> String {
        format!(
            ":root{{--bg:{};--fg:{};--muted:{};--border:{};--primary:{};--card:{};--card-hover:{};--card-border:{};--card-border-hover:{};--orb-top:{};--orb-bottom:{}}}",
            self.background,
            self.foreground,
            self.muted,
            self.border,
            self.primary,
            self.card,
            self.card_hover,
            self.card_border,
            self.card_border_hover,
            self.orb_top,
            self.orb_bottom,
        )
    }
}
