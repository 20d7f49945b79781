use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use clap::ValueEnum;
use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An RGB color as the Vixen element endpoints expect it: `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    /// Parses `#RRGGBB` (the leading `#` and the short `#RGB` form are accepted too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb: Srgb<u8> = s
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid color '{}', expected #RRGGBB", s))?;
        Ok(rgb.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(rgb: Srgb<u8>) -> Self {
        Color::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Color::new(red, green, blue)
    }
}

/// Named colors accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliColors {
    Red,
    Green,
    Blue,
    White,
    WarmWhite,
    Yellow,
    Orange,
    Purple,
    Cyan,
    Magenta,
    Pink,
    Teal,
}

impl From<CliColors> for Color {
    fn from(color: CliColors) -> Self {
        let rgb = match color {
            CliColors::Red => (255, 0, 0),
            CliColors::Green => (0, 255, 0),
            CliColors::Blue => (0, 0, 255),
            CliColors::White => (255, 255, 255),
            CliColors::WarmWhite => (255, 197, 143),
            CliColors::Yellow => (255, 255, 0),
            CliColors::Orange => (255, 165, 0),
            CliColors::Purple => (128, 0, 128),
            CliColors::Cyan => (0, 255, 255),
            CliColors::Magenta => (255, 0, 255),
            CliColors::Pink => (255, 192, 203),
            CliColors::Teal => (0, 128, 128),
        };
        rgb.into()
    }
}

/// Accepts either a color name (`red`, `warm-white`) or a hex value (`#0000FF`).
pub fn parse_color(s: &str) -> anyhow::Result<Color> {
    match <CliColors as ValueEnum>::from_str(s, true) {
        Ok(named) => Ok(named.into()),
        Err(_) => Color::from_str(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let color: Color = "#0000FF".parse().unwrap();
        assert_eq!(color, Color::new(0, 0, 255));

        let color: Color = "ff8000".parse().unwrap();
        assert_eq!(color, Color::new(255, 128, 0));
    }

    #[test]
    fn test_from_palette_srgb() {
        assert_eq!(Color::from(Srgb::new(0u8, 0, 255)), Color::new(0, 0, 255));

        let rgb: Srgb<u8> = "#123456".parse().unwrap();
        assert_eq!(Color::from(rgb), "#123456".parse::<Color>().unwrap());
    }

    #[test]
    fn test_display_is_upper_hex() {
        assert_eq!(Color::new(0, 0, 255).to_string(), "#0000FF");
        assert_eq!(Color::new(171, 205, 239).to_string(), "#ABCDEF");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Color::new(18, 52, 86);
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }

    #[test]
    fn test_invalid_hex() {
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_named_or_hex() {
        assert_eq!(parse_color("Blue").unwrap(), Color::new(0, 0, 255));
        assert_eq!(parse_color("warm-white").unwrap(), Color::new(255, 197, 143));
        assert_eq!(parse_color("#00FF00").unwrap(), Color::new(0, 255, 0));
        assert!(parse_color("chartreuse").is_err());
    }
}
