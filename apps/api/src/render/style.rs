//! Style registry — named accent colors and font families.
//!
//! Both lookups are total: any unrecognized name resolves to a documented
//! default (`blue`, `helvetica`) rather than failing. This is a design
//! contract of the renderer, not an omission — the request layer passes
//! user-supplied strings straight through.

use serde::{Deserialize, Serialize};

/// An RGB color with components in 0.0..=1.0, as used by PDF `rg` operators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex color. Returns black on malformed input; the
    /// registry only ever feeds it well-formed constants.
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Rgb::new(0.0, 0.0, 0.0);
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).unwrap_or(0) as f32 / 255.0
        };
        Rgb::new(channel(0..2), channel(2..4), channel(4..6))
    }
}

// Neutral text/panel colors shared by the templates.
pub const INK: Rgb = Rgb::new(0.102, 0.102, 0.102); // #1a1a1a
pub const BODY: Rgb = Rgb::new(0.2, 0.2, 0.2); // #333333
pub const META: Rgb = Rgb::new(0.4, 0.4, 0.4); // #666666
pub const SLATE: Rgb = Rgb::new(0.176, 0.216, 0.282); // #2d3748
pub const SLATE_MUTED: Rgb = Rgb::new(0.29, 0.333, 0.408); // #4a5568
pub const PANEL: Rgb = Rgb::new(0.973, 0.976, 0.98); // #f8f9fa
pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// The 16 named accent hues offered by the templates.
const ACCENT_COLORS: &[(&str, &str)] = &[
    ("blue", "#4A90E2"),
    ("indigo", "#6366f1"),
    ("purple", "#9333ea"),
    ("violet", "#8b5cf6"),
    ("teal", "#14b8a6"),
    ("emerald", "#10b981"),
    ("green", "#22c55e"),
    ("lime", "#84cc16"),
    ("rose", "#f43f5e"),
    ("pink", "#ec4899"),
    ("red", "#ef4444"),
    ("orange", "#f97316"),
    ("amber", "#f59e0b"),
    ("yellow", "#eab308"),
    ("cyan", "#06b6d4"),
    ("sky", "#0ea5e9"),
];

const DEFAULT_COLOR: &str = "#4A90E2"; // blue

/// Resolves a named hue to its accent color. Unknown names fall back to blue.
pub fn resolve_color(name: &str) -> Rgb {
    let hex = ACCENT_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_COLOR);
    Rgb::from_hex(hex)
}

/// The three supported font families, backed by PDF base-14 fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// PostScript name of the regular face.
    pub fn regular(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }

    /// PostScript name of the bold face.
    pub fn bold(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica-Bold",
            FontFamily::Times => "Times-Bold",
            FontFamily::Courier => "Courier-Bold",
        }
    }
}

/// Resolves a font family name. Unknown names fall back to Helvetica.
pub fn resolve_font(name: &str) -> FontFamily {
    match name {
        "times" => FontFamily::Times,
        "courier" => FontFamily::Courier,
        _ => FontFamily::Helvetica,
    }
}

/// The resolved style for one render: accent color plus font pair.
/// Derived once per render from (color name, font name); applied uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    pub accent: Rgb,
    pub font: FontFamily,
}

impl StyleSpec {
    pub fn resolve(color: &str, font: &str) -> Self {
        Self {
            accent: resolve_color(color),
            font: resolve_font(font),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
