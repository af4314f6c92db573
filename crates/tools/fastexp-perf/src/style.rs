//! Immutable chart styling: color palette, cell size and fonts.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::results::Category;

/// Default palette: five hue families with a dark and light shade for the
/// IEEE and Product bands and a shared grey for the baseline band.
const DEFAULT_PALETTE: [&str; 15] = [
    "#6d0410", "#b5636d", "#757575", // red
    "#001377", "#6f7dc6", "#757575", // blue
    "#007a35", "#69ce95", "#757575", // green
    "#6d7500", "#acb259", "#757575", // olive
    "#74007c", "#c260c9", "#757575", // purple
];

/// An opaque RGB color, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self(255, 255, 255);

    /// Scales every channel by `factor` (0.0 = black, 1.0 = unchanged).
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let scale = |c: u8| (f64::from(c) * factor.clamp(0.0, 1.0)).round() as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// Error parsing a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?} (expected #rrggbb)")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Styling shared by every panel of a render.
///
/// Deserialized from the `[style]` table of the configuration file; missing
/// keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotStyle {
    /// Bar colors, indexed by `3 × panel + band` modulo the palette length.
    pub palette: Vec<Rgb>,
    /// Side length in pixels of one square grid cell.
    pub cell_size: u32,
    /// Font family for titles and labels.
    pub font_family: String,
    /// Panel title font size in pixels.
    pub title_font_size: u32,
    /// Tick label font size in pixels.
    pub tick_font_size: u32,
    /// Image background.
    pub background: Rgb,
    /// Whisker shade relative to the bar color.
    pub whisker_shade: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| hex.parse().ok())
                .collect(),
            cell_size: 400,
            font_family: "sans-serif".to_string(),
            title_font_size: 16,
            tick_font_size: 11,
            background: Rgb::WHITE,
            whisker_shade: 0.45,
        }
    }
}

impl PlotStyle {
    /// Checks that the style can be rendered.
    pub fn validate(&self) -> Result<(), String> {
        if self.palette.is_empty() {
            return Err("style.palette must contain at least one color".into());
        }
        if self.cell_size < 100 {
            return Err(format!(
                "style.cell_size must be at least 100 pixels, got {}",
                self.cell_size
            ));
        }
        if self.title_font_size == 0 || self.tick_font_size == 0 {
            return Err("style font sizes must be non-zero".into());
        }
        if !(0.0..=1.0).contains(&self.whisker_shade) {
            return Err(format!(
                "style.whisker_shade must be within 0.0..=1.0, got {}",
                self.whisker_shade
            ));
        }
        Ok(())
    }

    /// Bar color of `category` in the panel at `panel_index`.
    pub fn bar_color(&self, panel_index: usize, category: Category) -> Rgb {
        if self.palette.is_empty() {
            return Rgb::BLACK;
        }
        let idx = (3 * panel_index + category.band_index()) % self.palette.len();
        self.palette[idx]
    }

    /// Error whisker color of `category` in the panel at `panel_index`.
    pub fn whisker_color(&self, panel_index: usize, category: Category) -> Rgb {
        self.bar_color(panel_index, category)
            .darken(self.whisker_shade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colors() {
        assert_eq!("#6d0410".parse::<Rgb>().unwrap(), Rgb(0x6d, 0x04, 0x10));
        assert_eq!("#FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!("6d0410".parse::<Rgb>().is_err());
        assert!("#6d04".parse::<Rgb>().is_err());
        assert!("#6d0410#757575".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let color = Rgb(0x00, 0x7a, 0x35);
        assert_eq!(color.to_string(), "#007a35");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn default_palette_is_complete() {
        let style = PlotStyle::default();
        assert_eq!(style.palette.len(), DEFAULT_PALETTE.len());
        assert!(style.validate().is_ok());
    }

    #[test]
    fn colors_follow_panel_and_band() {
        let style = PlotStyle::default();
        assert_eq!(style.bar_color(0, Category::Ieee), Rgb(0x6d, 0x04, 0x10));
        assert_eq!(style.bar_color(1, Category::Product), Rgb(0x6f, 0x7d, 0xc6));
        assert_eq!(style.bar_color(2, Category::Standard), Rgb(0x75, 0x75, 0x75));
        // Wraps around after five panels.
        assert_eq!(
            style.bar_color(5, Category::Ieee),
            style.bar_color(0, Category::Ieee)
        );
    }

    #[test]
    fn colors_are_stable() {
        let a = PlotStyle::default();
        let b = PlotStyle::default();
        for panel in 0..8 {
            for category in Category::ALL {
                assert_eq!(a.bar_color(panel, category), b.bar_color(panel, category));
            }
        }
    }

    #[test]
    fn whiskers_are_darker() {
        let style = PlotStyle::default();
        let bar = style.bar_color(0, Category::Product);
        let whisker = style.whisker_color(0, Category::Product);
        assert!(whisker.0 <= bar.0 && whisker.1 <= bar.1 && whisker.2 <= bar.2);
        assert_ne!(whisker, bar);
    }

    #[test]
    fn empty_palette_is_invalid() {
        let style = PlotStyle {
            palette: Vec::new(),
            ..PlotStyle::default()
        };
        assert!(style.validate().is_err());
        assert_eq!(style.bar_color(3, Category::Ieee), Rgb::BLACK);
    }
}
