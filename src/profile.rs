//! Serializable generation profile.
//!
//! A [`GenerationProfile`] captures every input of a run in a form that can
//! be stored as JSON next to a project and merged with command-line flags.
//!
//! # Example
//!
//! ```
//! use appicon_renderer::{GenerationProfile, PlatformSelection};
//!
//! let profile = GenerationProfile::new()
//!     .with_source("assets/app_icon.png")
//!     .with_background("#0a84ff")
//!     .with_platform(PlatformSelection::Android);
//!
//! let json = profile.to_json().unwrap();
//! let restored = GenerationProfile::from_json(&json).unwrap();
//! assert_eq!(restored.background, "#0a84ff");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_PADDING_RATIO, RoundIconStyle};
use crate::config::{GenerationConfig, PlatformSelection};
use crate::color::BackgroundColor;
use crate::error::PreconditionError;

/// Every input of a generation run.
///
/// # JSON Format
///
/// ```json
/// {
///   "source": "assets/app_icon.png",
///   "background": "#ffffff",
///   "platform": "all",
///   "mask": "assets/mask.svg",
///   "iosProject": "MyApp",
///   "paddingRatio": 0.55,
///   "roundIcons": "circle"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct GenerationProfile {
    /// Source icon. Discovered in the project when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default)]
    pub platform: PlatformSelection,

    /// Optional Android adaptive foreground mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<PathBuf>,

    /// Output directory overriding the platform default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Xcode project name. Discovered under `ios/` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_project: Option<String>,

    #[serde(default = "default_padding_ratio")]
    pub padding_ratio: f32,

    #[serde(default)]
    pub round_icons: RoundIconStyle,
}

fn default_background() -> String {
    BackgroundColor::default().as_str().to_string()
}

fn default_padding_ratio() -> f32 {
    DEFAULT_PADDING_RATIO
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self {
            source: None,
            background: default_background(),
            platform: PlatformSelection::default(),
            mask: None,
            output: None,
            ios_project: None,
            padding_ratio: DEFAULT_PADDING_RATIO,
            round_icons: RoundIconStyle::default(),
        }
    }
}

impl GenerationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_platform(mut self, platform: PlatformSelection) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_mask(mut self, mask: impl Into<PathBuf>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_ios_project(mut self, project: impl Into<String>) -> Self {
        self.ios_project = Some(project.into());
        self
    }

    pub fn with_padding_ratio(mut self, ratio: f32) -> Self {
        self.padding_ratio = ratio;
        self
    }

    pub fn with_round_icons(mut self, style: RoundIconStyle) -> Self {
        self.round_icons = style;
        self
    }

    /// Validates the rendering settings into a [`GenerationConfig`].
    pub fn config(&self) -> Result<GenerationConfig, PreconditionError> {
        let background = BackgroundColor::parse(&self.background)?;
        Ok(GenerationConfig::new(background)
            .with_padding_ratio(self.padding_ratio)?
            .with_round_style(self.round_icons))
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_deserializes_to_defaults() {
        let profile = GenerationProfile::from_json("{}").unwrap();
        assert_eq!(profile, GenerationProfile::default());
        assert_eq!(profile.background, "#ffffff");
        assert_eq!(profile.platform, PlatformSelection::All);
        assert_eq!(profile.padding_ratio, 0.55);
        assert_eq!(profile.round_icons, RoundIconStyle::Circle);
    }

    #[test]
    fn json_uses_camel_and_kebab_case() {
        let profile = GenerationProfile::new()
            .with_ios_project("Demo")
            .with_platform(PlatformSelection::Ios)
            .with_round_icons(RoundIconStyle::Square);

        let json = profile.to_json_pretty().unwrap();
        assert!(json.contains("\"iosProject\": \"Demo\""));
        assert!(json.contains("\"platform\": \"ios\""));
        assert!(json.contains("\"roundIcons\": \"square\""));
        assert!(json.contains("\"paddingRatio\""));
        assert!(!json.contains("\"mask\""));
    }

    #[test]
    fn serialization_roundtrip() {
        let profile = GenerationProfile::new()
            .with_source("icon.png")
            .with_mask("mask.svg")
            .with_output("out")
            .with_padding_ratio(0.8);
        let restored = GenerationProfile::from_json(&profile.to_json().unwrap()).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn config_validates_settings() {
        let config = GenerationProfile::new()
            .with_background("#000")
            .with_padding_ratio(0.8)
            .config()
            .unwrap();
        assert_eq!(config.background().rgba(), [0, 0, 0, 255]);
        assert_eq!(config.padding_ratio(), 0.8);

        assert!(matches!(
            GenerationProfile::new().with_background("red").config(),
            Err(PreconditionError::InvalidBackground(_))
        ));
        assert!(matches!(
            GenerationProfile::new().with_padding_ratio(1.5).config(),
            Err(PreconditionError::InvalidPaddingRatio(_))
        ));
    }
}
