//! Size tables for every platform output.
//!
//! The pipelines iterate these tables and never name a bucket in their own
//! control flow, so adding a density or an iOS size is a one-line change here.

use serde::{Deserialize, Serialize};

// ============================================================================
// Android
// ============================================================================

/// A named Android density bucket and the linear pixel size it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidBucket {
    /// Resource folder name, e.g. `mipmap-xxhdpi`.
    pub folder: &'static str,
    /// Width and height of the square output in pixels.
    pub pixel_size: u32,
}

impl AndroidBucket {
    const fn new(folder: &'static str, pixel_size: u32) -> Self {
        Self { folder, pixel_size }
    }
}

/// Legacy launcher icon sizes (`ic_launcher.png`, `ic_launcher_round.png`).
pub const ANDROID_LEGACY: [AndroidBucket; 5] = [
    AndroidBucket::new("mipmap-mdpi", 48),
    AndroidBucket::new("mipmap-hdpi", 72),
    AndroidBucket::new("mipmap-xhdpi", 96),
    AndroidBucket::new("mipmap-xxhdpi", 144),
    AndroidBucket::new("mipmap-xxxhdpi", 192),
];

/// Adaptive icon foreground sizes. Each is 2.25x its legacy counterpart.
pub const ANDROID_ADAPTIVE: [AndroidBucket; 5] = [
    AndroidBucket::new("mipmap-mdpi", 108),
    AndroidBucket::new("mipmap-hdpi", 162),
    AndroidBucket::new("mipmap-xhdpi", 216),
    AndroidBucket::new("mipmap-xxhdpi", 324),
    AndroidBucket::new("mipmap-xxxhdpi", 432),
];

/// Ratio between an adaptive bucket and the legacy bucket of the same density.
pub const ADAPTIVE_TO_LEGACY_RATIO: f32 = 2.25;

/// Default fraction of the adaptive canvas covered by the foreground content.
///
/// Android only guarantees the centre of an adaptive icon survives the
/// launcher's shape mask, so the artwork is shrunk into that safe zone.
pub const DEFAULT_PADDING_RATIO: f32 = 0.55;

/// Folder holding the adaptive icon XML descriptor.
pub const ANDROID_ANYDPI_FOLDER: &str = "mipmap-anydpi-v26";

/// Reference edge length of a normalized mask: the largest adaptive bucket.
pub const MASK_REFERENCE_SIZE: u32 = 432;

/// How `ic_launcher_round.png` is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum RoundIconStyle {
    /// Stencil the icon with a circle inscribed in the square.
    #[default]
    Circle,
    /// Write the plain square icon under the round file name.
    Square,
}

// ============================================================================
// iOS
// ============================================================================

/// An Apple icon slot: a point size rendered at an integer scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IosSize {
    pub point_size: f32,
    pub scale: u32,
}

impl IosSize {
    const fn new(point_size: f32, scale: u32) -> Self {
        Self { point_size, scale }
    }

    /// Edge length of the rendered PNG in pixels.
    pub fn pixel_size(&self) -> u32 {
        (self.point_size * self.scale as f32).round() as u32
    }

    /// `20x20`, `83.5x83.5`, ...
    pub fn size_string(&self) -> String {
        format!("{0}x{0}", self.point_size)
    }

    /// `1x`, `2x` or `3x`.
    pub fn scale_string(&self) -> String {
        format!("{}x", self.scale)
    }

    /// Output file name, e.g. `icon-60x60@3x.png`.
    pub fn filename(&self) -> String {
        format!("icon-{0}x{0}@{1}x.png", self.point_size, self.scale)
    }
}

/// Every icon slot an `AppIcon.appiconset` needs.
pub const IOS_SIZES: [IosSize; 15] = [
    // Notification
    IosSize::new(20.0, 1),
    IosSize::new(20.0, 2),
    IosSize::new(20.0, 3),
    // Settings
    IosSize::new(29.0, 1),
    IosSize::new(29.0, 2),
    IosSize::new(29.0, 3),
    // Spotlight
    IosSize::new(40.0, 1),
    IosSize::new(40.0, 2),
    IosSize::new(40.0, 3),
    // iPhone app
    IosSize::new(60.0, 2),
    IosSize::new(60.0, 3),
    // iPad app
    IosSize::new(76.0, 1),
    IosSize::new(76.0, 2),
    // iPad Pro app
    IosSize::new(83.5, 2),
    // App Store
    IosSize::new(1024.0, 1),
];
