//! appicon-renderer: Android and iOS app icon generation
//!
//! This crate derives every launcher icon a mobile app needs from a single
//! square source image: legacy, round and adaptive Android icons with the
//! adaptive-icon XML, and the full iOS `AppIcon.appiconset` with its
//! `Contents.json`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use appicon_renderer::{GenerationProfile, IconGenerator, PixelRasterizer, PlatformSelection};
//!
//! let profile = GenerationProfile::new()
//!     .with_source("assets/app_icon.png")
//!     .with_background("#0a84ff")
//!     .with_platform(PlatformSelection::Android)
//!     .with_mask("assets/squircle.svg");
//!
//! let (generator, job) =
//!     IconGenerator::from_profile(PixelRasterizer::new(), &profile, Path::new(".")).unwrap();
//! for outcome in generator.run(&job) {
//!     let report = outcome.result.unwrap();
//!     println!("{} files written", report.written.len());
//! }
//! ```
//!
//! # Custom rasterizers
//!
//! The pipelines only use the [`Rasterizer`] trait, so they can run against
//! any image backend:
//!
//! ```no_run
//! use std::path::Path;
//! use appicon_renderer::{GenerationConfig, PixelRasterizer, SourceIcon, ios};
//!
//! let rasterizer = PixelRasterizer::new();
//! let source = SourceIcon::open(&rasterizer, Path::new("app_icon.png")).unwrap();
//! let report = ios::generate(
//!     &rasterizer,
//!     &GenerationConfig::default(),
//!     &source,
//!     Path::new("AppIcon.appiconset"),
//! )
//! .unwrap();
//! assert!(report.is_complete());
//! ```

pub mod android;
pub mod catalog;
mod color;
mod config;
pub mod discovery;
mod error;
mod generator;
mod icon;
pub mod ios;
pub mod mask;
mod profile;
pub mod raster;
mod report;

pub use catalog::{AndroidBucket, IosSize, RoundIconStyle};
pub use color::BackgroundColor;
pub use config::{GenerationConfig, PlatformSelection};
pub use error::{PipelineError, PreconditionError, RasterError, RasterOp};
pub use generator::{GenerationJob, IconGenerator, PlatformOutcome, Target};
pub use icon::{ImageInfo, ImageKind, MIN_SOURCE_SIZE, SizePx, SourceIcon};
pub use ios::{Contents, Idiom, ManifestEntry, classify};
pub use mask::Mask;
pub use profile::GenerationProfile;
pub use raster::{BlendMode, Overlay, Padding, PixelRasterizer, Rasterizer};
pub use report::{FileFailure, FileFailureCause, GenerationReport, Platform};
