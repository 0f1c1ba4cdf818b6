//! iOS `AppIcon.appiconset` generation.
//!
//! Every slot in [`IOS_SIZES`] is rendered opaque and described in
//! `Contents.json`, with one manifest entry per idiom the slot belongs to.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::{IOS_SIZES, IosSize};
use crate::config::GenerationConfig;
use crate::error::{PipelineError, RasterError};
use crate::icon::{SizePx, SourceIcon};
use crate::raster::Rasterizer;
use crate::report::{GenerationReport, Platform};

pub const CONTENTS_FILE: &str = "Contents.json";

/// Asset catalog location for an Xcode project named `project`.
pub fn default_root(project_root: &Path, project: &str) -> PathBuf {
    project_root
        .join("ios")
        .join(project)
        .join("Images.xcassets")
        .join("AppIcon.appiconset")
}

// ============================================================================
// Idioms
// ============================================================================

/// Apple device family an icon slot targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Idiom {
    #[serde(rename = "iphone")]
    Iphone,
    #[serde(rename = "ipad")]
    Ipad,
    #[serde(rename = "ios-marketing")]
    IosMarketing,
}

const IPHONE_POINTS: [f32; 4] = [20.0, 29.0, 40.0, 60.0];
const IPAD_POINTS: [f32; 4] = [20.0, 29.0, 40.0, 76.0];
const IPAD_PRO_POINTS: f32 = 83.5;
const MARKETING_POINTS: f32 = 1024.0;

/// Idioms an icon slot belongs to.
///
/// ```
/// use appicon_renderer::{Idiom, classify};
///
/// assert_eq!(classify(1024.0, 1), vec![Idiom::IosMarketing]);
/// assert_eq!(classify(29.0, 2), vec![Idiom::Iphone, Idiom::Ipad]);
/// ```
pub fn classify(point_size: f32, scale: u32) -> Vec<Idiom> {
    if point_size == MARKETING_POINTS && scale == 1 {
        return vec![Idiom::IosMarketing];
    }

    let mut idioms = Vec::with_capacity(2);
    if IPHONE_POINTS.contains(&point_size) && matches!(scale, 2 | 3) {
        idioms.push(Idiom::Iphone);
    }
    let ipad = (IPAD_POINTS.contains(&point_size) && matches!(scale, 1 | 2))
        || (point_size == IPAD_PRO_POINTS && scale == 2);
    if ipad {
        idioms.push(Idiom::Ipad);
    }
    idioms
}

// ============================================================================
// Contents.json
// ============================================================================

/// One `images[]` entry of `Contents.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ManifestEntry {
    pub size: String,
    pub idiom: Idiom,
    pub filename: String,
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ManifestInfo {
    pub version: u32,
    pub author: String,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            version: 1,
            author: "xcode".to_string(),
        }
    }
}

/// The asset catalog descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Contents {
    pub images: Vec<ManifestEntry>,
    pub info: ManifestInfo,
}

impl Contents {
    /// Builds the manifest for a list of icon slots.
    pub fn for_sizes(sizes: &[IosSize]) -> Self {
        let images = sizes
            .iter()
            .flat_map(|slot| {
                classify(slot.point_size, slot.scale)
                    .into_iter()
                    .map(move |idiom| ManifestEntry {
                        size: slot.size_string(),
                        idiom,
                        filename: slot.filename(),
                        scale: slot.scale_string(),
                    })
            })
            .collect();
        Self {
            images,
            info: ManifestInfo::default(),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

fn render_slot<R: Rasterizer>(
    rasterizer: &R,
    source: &R::Image,
    slot: &IosSize,
    config: &GenerationConfig,
) -> Result<Vec<u8>, RasterError> {
    let resized = rasterizer.resize(source, SizePx::square(slot.pixel_size()))?;
    let flat = rasterizer.flatten(&resized, config.background())?;
    rasterizer.encode_png(&flat)
}

/// Writes every iOS icon and `Contents.json` into `root`.
///
/// Image failures are collected in the report; failing to write
/// `Contents.json` is fatal.
pub fn generate<R: Rasterizer>(
    rasterizer: &R,
    config: &GenerationConfig,
    source: &SourceIcon,
    root: &Path,
) -> Result<GenerationReport, PipelineError> {
    fs::create_dir_all(root).map_err(|e| PipelineError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;
    let image = rasterizer
        .open(source.path())
        .map_err(|e| PipelineError::Source {
            path: source.path().to_path_buf(),
            source: e,
        })?;

    let mut report = GenerationReport::new(Platform::Ios, root);
    for slot in &IOS_SIZES {
        report.write_output(slot.filename(), render_slot(rasterizer, &image, slot, config));
    }

    let contents_path = root.join(CONTENTS_FILE);
    let json = Contents::for_sizes(&IOS_SIZES)
        .to_json_pretty()
        .map_err(std::io::Error::other)
        .and_then(|json| fs::write(&contents_path, json));
    json.map_err(|e| PipelineError::Manifest {
        path: contents_path.clone(),
        source: e,
    })?;
    info!("wrote {}", contents_path.display());
    report.written.push(contents_path);

    info!(
        "ios icons generated at {} ({} files, {} failed)",
        root.display(),
        report.written.len(),
        report.failures.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BackgroundColor;
    use crate::icon::ImageKind;
    use crate::raster::fake::FakeRasterizer;

    const SOURCE: &str = "/icons/app_icon.png";

    fn fake() -> FakeRasterizer {
        FakeRasterizer::new().with_file(SOURCE, ImageKind::Raster { has_alpha: false }, 1024)
    }

    fn run(fake: &FakeRasterizer, root: &Path) -> GenerationReport {
        let source = SourceIcon::open(fake, Path::new(SOURCE)).unwrap();
        let config = GenerationConfig::new(BackgroundColor::parse("#000").unwrap());
        generate(fake, &config, &source, root).unwrap()
    }

    #[test]
    fn classification_rules() {
        assert_eq!(classify(1024.0, 1), vec![Idiom::IosMarketing]);
        assert_eq!(classify(60.0, 2), vec![Idiom::Iphone]);
        assert_eq!(classify(76.0, 1), vec![Idiom::Ipad]);
        assert_eq!(classify(29.0, 2), vec![Idiom::Iphone, Idiom::Ipad]);
        assert_eq!(classify(83.5, 2), vec![Idiom::Ipad]);
        assert_eq!(classify(20.0, 3), vec![Idiom::Iphone]);
        assert_eq!(classify(20.0, 1), vec![Idiom::Ipad]);
        assert!(classify(60.0, 1).is_empty());
        assert!(classify(1024.0, 2).is_empty());
    }

    #[test]
    fn manifest_lists_shared_slots_once_per_idiom() {
        // 15 slots, three of which belong to both iPhone and iPad.
        let contents = Contents::for_sizes(&IOS_SIZES);
        assert_eq!(contents.images.len(), 18);

        let shared: Vec<_> = contents
            .images
            .iter()
            .filter(|e| e.idiom == Idiom::Ipad)
            .filter(|e| {
                contents
                    .images
                    .iter()
                    .any(|o| o.idiom == Idiom::Iphone && o.filename == e.filename)
            })
            .map(|e| e.filename.as_str())
            .collect();
        assert_eq!(
            shared,
            vec!["icon-20x20@2x.png", "icon-29x29@2x.png", "icon-40x40@2x.png"]
        );
    }

    #[test]
    fn manifest_json_format() {
        let json = Contents::for_sizes(&IOS_SIZES[13..]).to_json_pretty().unwrap();
        let expected = r#"{
  "images": [
    {
      "size": "83.5x83.5",
      "idiom": "ipad",
      "filename": "icon-83.5x83.5@2x.png",
      "scale": "2x"
    },
    {
      "size": "1024x1024",
      "idiom": "ios-marketing",
      "filename": "icon-1024x1024@1x.png",
      "scale": "1x"
    }
  ],
  "info": {
    "version": 1,
    "author": "xcode"
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn writes_all_slots_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(&fake(), dir.path());

        assert!(report.is_complete());
        assert_eq!(report.written.len(), 16);
        for slot in &IOS_SIZES {
            assert!(dir.path().join(slot.filename()).is_file());
        }

        let json = fs::read_to_string(dir.path().join(CONTENTS_FILE)).unwrap();
        let contents: Contents = serde_json::from_str(&json).unwrap();
        assert_eq!(contents, Contents::for_sizes(&IOS_SIZES));
        assert_eq!(contents.info, ManifestInfo::default());
    }

    #[test]
    fn slots_are_resized_and_flattened() {
        let dir = tempfile::tempdir().unwrap();
        run(&fake(), dir.path());

        let ops = fs::read_to_string(dir.path().join("icon-83.5x83.5@2x.png")).unwrap();
        assert_eq!(
            ops,
            "167x167\nopen /icons/app_icon.png\nresize 167x167\nflatten #000"
        );
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let fake = fake();
        run(&fake, dir.path());
        let first = fs::read(dir.path().join(CONTENTS_FILE)).unwrap();
        run(&fake, dir.path());
        assert_eq!(fs::read(dir.path().join(CONTENTS_FILE)).unwrap(), first);
    }

    #[test]
    fn failed_slot_is_reported_and_manifest_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(&fake().failing_at(1024), dir.path());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, "icon-1024x1024@1x.png");
        assert!(dir.path().join(CONTENTS_FILE).is_file());
    }

    #[test]
    fn default_root_layout() {
        assert_eq!(
            default_root(Path::new("/app"), "Demo"),
            Path::new("/app/ios/Demo/Images.xcassets/AppIcon.appiconset")
        );
    }
}
