use crate::error::{SelectorError, SwatchError};
use crate::geometry::FULL_TURN;
use derive_more::{Deref, From, Into};
use palette::{Srgb, Srgba, WithAlpha};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// One opaque palette color.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deref,
    From,
    Into,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Swatch(Srgb<u8>);

impl Swatch {
    pub const RED: Self = Self::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Self = Self::rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xFF);
    pub const YELLOW: Self = Self::rgb(0xFF, 0xFF, 0x00);
    pub const CYAN: Self = Self::rgb(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Self = Self::rgb(0xFF, 0x00, 0xFF);
    pub const LIGHT_GRAY: Self = Self::rgb(0xCC, 0xCC, 0xCC);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(1.0)
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and CSS color names (`red`, `lightgray`, ...).
impl FromStr for Swatch {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(named) = palette::named::from_str(&trimmed.to_ascii_lowercase()) {
            return Ok(Self(named));
        }
        trimmed
            .parse::<Srgb<u8>>()
            .map(Self)
            .map_err(|_| SwatchError::Invalid(s.to_string()))
    }
}

/// Ordered, non-empty list of swatches. Position `i` owns the wedge
/// `[i * 360/N, (i + 1) * 360/N)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(Vec<Swatch>);

impl Palette {
    pub fn new(colors: Vec<Swatch>) -> Result<Self, SelectorError> {
        if colors.is_empty() {
            return Err(SelectorError::EmptyPalette);
        }
        Ok(Self(colors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Swatch> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swatch> {
        self.0.iter()
    }

    pub fn contains(&self, swatch: &Swatch) -> bool {
        self.0.contains(swatch)
    }

    /// Angular width of one wedge in degrees.
    pub fn sweep(&self) -> f64 {
        FULL_TURN / self.0.len() as f64
    }

    /// Wedge index for an angle in `[0, 360)`. Clamped so that angles that
    /// round up to a full turn (or fall below zero) still land on a wedge.
    pub fn index_at(&self, angle: f64) -> usize {
        let n = self.0.len();
        // float-to-int casts saturate; NaN and negatives become 0
        let raw = (angle / FULL_TURN * n as f64).floor() as usize;
        raw.min(n - 1)
    }

    pub fn color_at(&self, angle: f64) -> Swatch {
        self.0[self.index_at(angle)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> Palette {
        Palette::new(vec![
            Swatch::RED,
            Swatch::GREEN,
            Swatch::BLUE,
            Swatch::YELLOW,
            Swatch::CYAN,
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(SelectorError::EmptyPalette));
    }

    #[test]
    fn test_boundaries_map_to_first_and_last() {
        let palette = five();
        assert_eq!(palette.color_at(0.0), Swatch::RED);
        assert_eq!(palette.color_at(359.999_999), Swatch::CYAN);
        assert_eq!(palette.color_at(360.0_f64.next_down()), Swatch::CYAN);
        assert_eq!(palette.color_at(360.0), Swatch::CYAN);
        assert_eq!(palette.color_at(-5.0), Swatch::RED);
        assert_eq!(palette.color_at(f64::NAN), Swatch::RED);
    }

    #[test]
    fn test_wedge_edges() {
        let palette = five();
        assert_eq!(palette.sweep(), 72.0);
        assert_eq!(palette.index_at(71.9), 0);
        assert_eq!(palette.index_at(72.0), 1);
        assert_eq!(palette.index_at(90.0), 1);
        assert_eq!(palette.index_at(288.0), 4);
    }

    #[test]
    fn test_single_color_covers_full_turn() {
        let palette = Palette::new(vec![Swatch::BLACK]).unwrap();
        assert_eq!(palette.sweep(), 360.0);
        assert_eq!(palette.color_at(0.0), Swatch::BLACK);
        assert_eq!(palette.color_at(359.0), Swatch::BLACK);
    }

    #[test]
    fn test_swatch_parsing() {
        let cases = vec![
            ("#FF0000", Swatch::RED),
            ("ff0000", Swatch::RED),
            ("#0f0", Swatch::GREEN),
            ("red", Swatch::RED),
            ("Cyan", Swatch::CYAN),
            ("  magenta ", Swatch::MAGENTA),
            ("#cccccc", Swatch::LIGHT_GRAY),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Swatch>().unwrap(), expected, "{input}");
        }
        assert!("not-a-color".parse::<Swatch>().is_err());
        assert!("#12345".parse::<Swatch>().is_err());
    }

    #[test]
    fn test_swatch_display_and_serde() {
        assert_eq!(Swatch::rgb(0x12, 0xAB, 0x05).to_string(), "#12AB05");

        let json = serde_json::to_string(&Swatch::YELLOW).unwrap();
        assert_eq!(json, "\"#FFFF00\"");
        let parsed: Vec<Swatch> = serde_json::from_str(r##"["blue", "#00ffff"]"##).unwrap();
        assert_eq!(parsed, vec![Swatch::BLUE, Swatch::CYAN]);
    }
}
