//! Default theme colors and separator glyph presets.

use std::collections::HashMap;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ParseError;
use crate::highlight::Highlight;
use crate::highlight::parse_color;

pub const FG: &str = "#D0D0D0";
pub const BG: &str = "#1F1F23";
pub const BLACK: &str = "#1B1B1B";
pub const SKYBLUE: &str = "#50B0F0";
pub const CYAN: &str = "#009090";
pub const GREEN: &str = "#60A040";
pub const OCEANBLUE: &str = "#0066CC";
pub const MAGENTA: &str = "#C26BDB";
pub const ORANGE: &str = "#FF9000";
pub const RED: &str = "#D10000";
pub const VIOLET: &str = "#9E93E8";
pub const WHITE: &str = "#FFFFFF";
pub const YELLOW: &str = "#E1E120";

const DEFAULT_THEME: &[(&str, &str)] = &[
    ("fg", FG),
    ("bg", BG),
    ("black", BLACK),
    ("skyblue", SKYBLUE),
    ("cyan", CYAN),
    ("green", GREEN),
    ("oceanblue", OCEANBLUE),
    ("magenta", MAGENTA),
    ("orange", ORANGE),
    ("red", RED),
    ("violet", VIOLET),
    ("white", WHITE),
    ("yellow", YELLOW),
];

const DEFAULT_SEPARATORS: &[(&str, &str)] = &[
    ("vertical_bar", "┃"),
    ("vertical_bar_thin", "│"),
    ("left", "\u{e0b3}"),
    ("right", "\u{e0b1}"),
    ("block", "█"),
    ("left_filled", "\u{e0b2}"),
    ("right_filled", "\u{e0b0}"),
    ("slant_left", "\u{e0ba}"),
    ("slant_left_thin", "\u{e0bb}"),
    ("slant_right", "\u{e0b8}"),
    ("slant_right_thin", "\u{e0b9}"),
    ("slant_left_2", "\u{e0be}"),
    ("slant_left_2_thin", "\u{e0bf}"),
    ("slant_right_2", "\u{e0bc}"),
    ("slant_right_2_thin", "\u{e0bd}"),
    ("left_rounded", "\u{e0b6}"),
    ("left_rounded_thin", "\u{e0b7}"),
    ("right_rounded", "\u{e0b4}"),
    ("right_rounded_thin", "\u{e0b5}"),
    ("circle", "●"),
];

/// Named colors highlights may refer to. `fg` and `bg` double as the global
/// defaults for any highlight field left unset.
///
/// A theme loaded from config is layered over the default theme, so a user
/// only lists the names they change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct Palette {
    colors: HashMap<String, String>,
}

impl Palette {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    /// Look `value` up as a palette name, falling back to the value itself.
    pub fn resolve<'a>(&'a self, value: &'a str) -> &'a str {
        self.get(value).unwrap_or(value)
    }

    pub fn color(&self, value: &str) -> Result<Color, ParseError> {
        parse_color(self.resolve(value))
    }

    /// The global default triple: palette `fg`, palette `bg`, no style.
    pub fn default_highlight(&self) -> Result<Highlight, ParseError> {
        Ok(Highlight {
            fg: self.color("fg")?,
            bg: self.color("bg")?,
            style: Default::default(),
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_THEME
                .iter()
                .map(|(name, color)| ((*name).to_string(), (*color).to_string()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for Palette {
    fn from(overrides: HashMap<String, String>) -> Self {
        let mut palette = Palette::default();
        palette.colors.extend(overrides);
        palette
    }
}

/// Named separator glyphs. Separator strings that name no preset are used
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct SeparatorPresets {
    glyphs: HashMap<String, String>,
}

impl SeparatorPresets {
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.glyphs.get(name).map_or(name, String::as_str)
    }
}

impl Default for SeparatorPresets {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_SEPARATORS
                .iter()
                .map(|(name, glyph)| ((*name).to_string(), (*glyph).to_string()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for SeparatorPresets {
    fn from(overrides: HashMap<String, String>) -> Self {
        let mut presets = SeparatorPresets::default();
        presets.glyphs.extend(overrides);
        presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_names_resolve_before_parsing() {
        let palette = Palette::default();
        assert_eq!(palette.color("skyblue"), Ok(Color::Rgb(0x50, 0xB0, 0xF0)));
        assert_eq!(palette.color("#010203"), Ok(Color::Rgb(1, 2, 3)));
        // ANSI names not shadowed by the theme still parse.
        assert_eq!(palette.color("lightred"), Ok(Color::LightRed));
    }

    #[test]
    fn overrides_layer_over_default_theme() {
        let palette: Palette = toml::from_str("fg = \"#000000\"\naccent = \"red\"").expect("parse");
        assert_eq!(palette.get("fg"), Some("#000000"));
        assert_eq!(palette.get("bg"), Some(BG));
        assert_eq!(palette.color("accent"), Ok(Color::Red));
    }

    #[test]
    fn default_highlight_uses_fg_and_bg() {
        let highlight = Palette::default().default_highlight().expect("defaults parse");
        assert_eq!(highlight.fg, Color::Rgb(0xD0, 0xD0, 0xD0));
        assert_eq!(highlight.bg, Color::Rgb(0x1F, 0x1F, 0x23));
        assert!(highlight.style.is_empty());
    }

    #[test]
    fn separator_presets_fall_back_to_literal() {
        let presets = SeparatorPresets::default();
        assert_eq!(presets.resolve("vertical_bar"), "┃");
        assert_eq!(presets.resolve(" | "), " | ");
    }
}
