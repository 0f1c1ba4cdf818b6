//! Validated, immutable generation settings.

use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_PADDING_RATIO, RoundIconStyle};
use crate::color::BackgroundColor;
use crate::error::PreconditionError;
use crate::report::Platform;

/// Which platforms a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PlatformSelection {
    Android,
    Ios,
    #[default]
    All,
}

impl PlatformSelection {
    /// The selected platforms, Android first.
    pub fn platforms(self) -> &'static [Platform] {
        match self {
            Self::Android => &[Platform::Android],
            Self::Ios => &[Platform::Ios],
            Self::All => &[Platform::Android, Platform::Ios],
        }
    }

    pub fn includes(self, platform: Platform) -> bool {
        self.platforms().contains(&platform)
    }
}

/// Settings shared by every pipeline.
///
/// Built once by the caller and passed by reference; pipelines never consult
/// arguments or environment themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    background: BackgroundColor,
    padding_ratio: f32,
    round_style: RoundIconStyle,
}

impl GenerationConfig {
    pub fn new(background: BackgroundColor) -> Self {
        Self {
            background,
            padding_ratio: DEFAULT_PADDING_RATIO,
            round_style: RoundIconStyle::default(),
        }
    }

    /// Sets the adaptive foreground padding ratio, which must lie in `(0, 1]`.
    pub fn with_padding_ratio(mut self, ratio: f32) -> Result<Self, PreconditionError> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(PreconditionError::InvalidPaddingRatio(ratio));
        }
        self.padding_ratio = ratio;
        Ok(self)
    }

    pub fn with_round_style(mut self, style: RoundIconStyle) -> Self {
        self.round_style = style;
        self
    }

    pub fn background(&self) -> &BackgroundColor {
        &self.background
    }

    pub fn padding_ratio(&self) -> f32 {
        self.padding_ratio
    }

    pub fn round_style(&self) -> RoundIconStyle {
        self.round_style
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(BackgroundColor::default())
    }
}
