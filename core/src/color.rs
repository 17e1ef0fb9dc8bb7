//! Hex color parsing and the percentage shade used for the status-bar tint.

use crate::error::ColorError;
use std::fmt;

/// An sRGB triplet parsed from a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const CHANNELS: [&str; 3] = ["red", "green", "blue"];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color. Surrounding whitespace is ignored, since
    /// computed style values usually carry a leading space.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| ColorError::InvalidLength {
                input: input.to_string(),
            })?;

        // from_str_radix alone would let a sign such as `+f` through.
        if let Some(pos) = hex.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidChannel {
                input: input.to_string(),
                channel: CHANNELS[pos / 2],
            });
        }

        let channel = |range: std::ops::Range<usize>, channel: &'static str| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidChannel {
                input: input.to_string(),
                channel,
            })
        };

        Ok(Self {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Scale every channel by `(100 + percent) / 100`, rounding to the nearest
    /// integer and clamping to `0..=255`.
    pub fn shade(self, percent: i32) -> Self {
        let factor = (100.0 + f64::from(percent)) / 100.0;
        let scale = |channel: u8| (f64::from(channel) * factor).round().clamp(0.0, 255.0) as u8;

        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Darken (negative `percent`) or lighten (positive `percent`) a `#rrggbb`
/// color. The result is always lowercase.
///
/// # Errors
///
/// Returns [`ColorError`] when `color` is not a six digit hex triplet.
pub fn shade(color: &str, percent: i32) -> Result<String, ColorError> {
    Ok(Rgb::parse(color)?.shade(percent).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    #[test]
    fn test_shade_darkens_toolbar_color() {
        // 247 * 0.88 = 217.36
        assert_eq!(shade("#f7f7f7", -12).unwrap(), "#d9d9d9");
    }

    #[test]
    fn test_shade_lightens_and_clamps() {
        assert_eq!(shade("#ffffff", 50).unwrap(), "#ffffff");
        assert_eq!(shade("#804020", 100).unwrap(), "#ff8040");
    }

    #[test]
    fn test_shade_full_darken_is_black() {
        assert_eq!(shade("#5ecdef", -100).unwrap(), "#000000");
        assert_eq!(shade("#5ecdef", -250).unwrap(), "#000000");
    }

    #[test]
    fn test_shade_pads_single_digit_channels() {
        assert_eq!(shade("#0a0b0c", 0).unwrap(), "#0a0b0c");
        assert_eq!(shade("#101010", -50).unwrap(), "#080808");
    }

    #[test]
    fn test_shade_rounds_half_up() {
        // 5 * 0.5 = 2.5
        assert_eq!(shade("#050505", -50).unwrap(), "#030303");
    }

    #[test]
    fn test_parse_trims_whitespace_and_accepts_uppercase() {
        assert_eq!(Rgb::parse("  #3880FF ").unwrap(), Rgb::new(0x38, 0x80, 0xff));
        assert_eq!(shade(" #3880FF", 0).unwrap(), "#3880ff");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_matches!(Rgb::parse("#fff"), Err(ColorError::InvalidLength { .. }));
        assert_matches!(Rgb::parse("3880ff"), Err(ColorError::InvalidLength { .. }));
        assert_matches!(Rgb::parse("#3880ff00"), Err(ColorError::InvalidLength { .. }));
        assert_matches!(
            Rgb::parse("#38g0ff"),
            Err(ColorError::InvalidChannel { channel: "green", .. })
        );
        assert_matches!(Rgb::parse("#ééé"), Err(ColorError::InvalidLength { .. }));
        assert_err!(shade("", -12));
    }

    #[test]
    fn test_parse_rejects_signed_channels() {
        assert_matches!(
            Rgb::parse("#+f+f+f"),
            Err(ColorError::InvalidChannel { channel: "red", .. })
        );
        assert_matches!(
            Rgb::parse("#00-100"),
            Err(ColorError::InvalidChannel { channel: "green", .. })
        );
        assert_err!(shade("#+f+f+f", 0));
    }
}
