//! Background color used to flatten transparency and fill adaptive canvases.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;

use crate::error::PreconditionError;

/// A validated `#RGB` or `#RRGGBB` color.
///
/// The original spelling is kept so it can be written back verbatim into
/// `colors.xml`.
///
/// ```
/// use appicon_renderer::BackgroundColor;
///
/// let white: BackgroundColor = "#fff".parse().unwrap();
/// assert_eq!(white.rgba(), [255, 255, 255, 255]);
/// assert!("red".parse::<BackgroundColor>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundColor {
    hex: String,
    rgb: Srgb<u8>,
}

impl BackgroundColor {
    /// Parses a hex color, rejecting anything but `#RGB` / `#RRGGBB`.
    pub fn parse(value: &str) -> Result<Self, PreconditionError> {
        let invalid = || PreconditionError::InvalidBackground(value.to_string());

        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        // palette expands the short form (`#abc` -> `#aabbcc`).
        let rgb = Srgb::<u8>::from_str(digits).map_err(|_| invalid())?;
        Ok(Self {
            hex: value.to_string(),
            rgb,
        })
    }

    /// The color as written by the user.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Opaque RGBA components.
    pub fn rgba(&self) -> [u8; 4] {
        [self.rgb.red, self.rgb.green, self.rgb.blue, 255]
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self {
            hex: "#ffffff".to_string(),
            rgb: Srgb::new(255, 255, 255),
        }
    }
}

impl FromStr for BackgroundColor {
    type Err = PreconditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}
