//! Android launcher icons.
//!
//! Produces, under a `res/` directory:
//!
//! ```text
//! mipmap-<density>/ic_launcher.png             legacy square icon
//! mipmap-<density>/ic_launcher_round.png       legacy round icon
//! mipmap-<density>/ic_launcher_foreground.png  adaptive foreground layer
//! mipmap-anydpi-v26/ic_launcher.xml            adaptive icon descriptor
//! values/colors.xml                            patched with the background color
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::catalog::{
    ANDROID_ADAPTIVE, ANDROID_ANYDPI_FOLDER, ANDROID_LEGACY, AndroidBucket, RoundIconStyle,
};
use crate::config::GenerationConfig;
use crate::error::{PipelineError, RasterError};
use crate::icon::{SizePx, SourceIcon};
use crate::mask::Mask;
use crate::raster::{BlendMode, Overlay, Padding, Rasterizer};
use crate::report::{GenerationReport, Platform};

/// Resource directory of a conventional Android project, relative to its root.
pub const DEFAULT_RES_DIR: &str = "android/app/src/main/res";

pub const LAUNCHER_ICON: &str = "ic_launcher.png";
pub const ROUND_ICON: &str = "ic_launcher_round.png";
pub const FOREGROUND_ICON: &str = "ic_launcher_foreground.png";

/// Name of the color resource the adaptive icon uses as its background.
pub const BACKGROUND_COLOR_RESOURCE: &str = "ic_launcher_background";

/// The `mipmap-anydpi-v26/ic_launcher.xml` document.
pub const ADAPTIVE_ICON_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<adaptive-icon xmlns:android="http://schemas.android.com/apk/res/android">
  <background android:drawable="@color/ic_launcher_background" />
  <foreground android:drawable="@mipmap/ic_launcher_foreground" />
</adaptive-icon>"#;

/// Default output root for a project directory.
pub fn default_root(project_root: &Path) -> PathBuf {
    project_root.join(DEFAULT_RES_DIR)
}

// ============================================================================
// Geometry
// ============================================================================

/// Placement of the shrunken artwork inside an adaptive canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForegroundLayout {
    /// Edge length of the resized artwork.
    pub content: u32,
    /// Borders that center the artwork on the canvas.
    pub padding: Padding,
}

impl ForegroundLayout {
    /// `content = floor(canvas * ratio)`, centered with floor/ceil borders.
    pub fn new(canvas: u32, padding_ratio: f32) -> Self {
        let content = ((canvas as f32 * padding_ratio).floor() as u32).clamp(1, canvas.max(1));
        Self {
            content,
            padding: Padding::centering(content, canvas),
        }
    }
}

// ============================================================================
// Renderers
// ============================================================================

fn render_legacy<R: Rasterizer>(
    rasterizer: &R,
    source: &R::Image,
    size: u32,
    config: &GenerationConfig,
) -> Result<Vec<u8>, RasterError> {
    let resized = rasterizer.resize(source, SizePx::square(size))?;
    let flat = rasterizer.flatten(&resized, config.background())?;
    rasterizer.encode_png(&flat)
}

fn render_round<R: Rasterizer>(
    rasterizer: &R,
    source: &R::Image,
    size: u32,
    config: &GenerationConfig,
) -> Result<Vec<u8>, RasterError> {
    match config.round_style() {
        RoundIconStyle::Square => render_legacy(rasterizer, source, size, config),
        RoundIconStyle::Circle => {
            let resized = rasterizer.resize(source, SizePx::square(size))?;
            let circle = rasterizer.circle_mask(size)?;
            let masked =
                rasterizer.composite(&resized, &[Overlay::new(&circle, BlendMode::DestIn)])?;
            let flat = rasterizer.flatten(&masked, config.background())?;
            rasterizer.encode_png(&flat)
        }
    }
}

fn render_foreground<R: Rasterizer>(
    rasterizer: &R,
    source: &R::Image,
    size: u32,
    config: &GenerationConfig,
    mask: Option<&Mask<R::Image>>,
) -> Result<Vec<u8>, RasterError> {
    let layout = ForegroundLayout::new(size, config.padding_ratio());
    let background = config.background();

    let resized = rasterizer.resize(source, SizePx::square(layout.content))?;
    let canvas = rasterizer.extend(&resized, layout.padding, background)?;
    let mut foreground = rasterizer.flatten(&canvas, background)?;

    if let Some(mask) = mask {
        let stencil = rasterizer.resize(mask.image(), SizePx::square(size))?;
        foreground =
            rasterizer.composite(&foreground, &[Overlay::new(&stencil, BlendMode::DestIn)])?;
    }

    rasterizer.encode_png(&foreground)
}

fn target(bucket: &AndroidBucket, file: &str) -> String {
    format!("{}/{file}", bucket.folder)
}

// ============================================================================
// colors.xml
// ============================================================================

/// Outcome of [`patch_colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorsPatch {
    /// No `colors.xml` exists; nothing was written.
    Missing,
    /// An `ic_launcher_background` entry already exists.
    AlreadyPresent,
    /// The file has no `</resources>` tag to insert before.
    NoResourcesTag,
    /// The entry was inserted.
    Inserted,
}

/// Adds an `ic_launcher_background` color before `</resources>`.
///
/// The file is only rewritten when it exists and has no such entry yet, so
/// repeated runs never duplicate it.
pub fn patch_colors(path: &Path, background: &str) -> io::Result<ColorsPatch> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ColorsPatch::Missing),
        Err(e) => return Err(e),
    };

    if content.contains(BACKGROUND_COLOR_RESOURCE) {
        return Ok(ColorsPatch::AlreadyPresent);
    }
    if !content.contains("</resources>") {
        return Ok(ColorsPatch::NoResourcesTag);
    }

    let entry = format!(
        "  <color name=\"{BACKGROUND_COLOR_RESOURCE}\">{background}</color>\n</resources>"
    );
    fs::write(path, content.replacen("</resources>", &entry, 1))?;
    Ok(ColorsPatch::Inserted)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Writes every Android icon under `root`.
///
/// Individual image failures are collected in the report and do not stop
/// the remaining outputs. Failing to write the adaptive XML or the
/// `colors.xml` patch is fatal.
pub fn generate<R: Rasterizer>(
    rasterizer: &R,
    config: &GenerationConfig,
    source: &SourceIcon,
    mask: Option<&Mask<R::Image>>,
    root: &Path,
) -> Result<GenerationReport, PipelineError> {
    fs::create_dir_all(root).map_err(|source| PipelineError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    let image = rasterizer
        .open(source.path())
        .map_err(|e| PipelineError::Source {
            path: source.path().to_path_buf(),
            source: e,
        })?;

    let mut report = GenerationReport::new(Platform::Android, root);

    for bucket in &ANDROID_LEGACY {
        let size = bucket.pixel_size;
        report.write_output(
            target(bucket, LAUNCHER_ICON),
            render_legacy(rasterizer, &image, size, config),
        );
        report.write_output(
            target(bucket, ROUND_ICON),
            render_round(rasterizer, &image, size, config),
        );
    }

    for bucket in &ANDROID_ADAPTIVE {
        report.write_output(
            target(bucket, FOREGROUND_ICON),
            render_foreground(rasterizer, &image, bucket.pixel_size, config, mask),
        );
    }

    let xml_path = root.join(ANDROID_ANYDPI_FOLDER).join("ic_launcher.xml");
    write_manifest(&xml_path, ADAPTIVE_ICON_XML)?;
    report.written.push(xml_path);

    let colors_path = root.join("values").join("colors.xml");
    let patch = patch_colors(&colors_path, config.background().as_str()).map_err(|source| {
        PipelineError::Manifest {
            path: colors_path.clone(),
            source,
        }
    })?;
    match patch {
        ColorsPatch::Inserted => {
            info!("added {BACKGROUND_COLOR_RESOURCE} to {}", colors_path.display());
            report.written.push(colors_path);
        }
        ColorsPatch::NoResourcesTag => {
            warn!("{} has no </resources> tag, not patched", colors_path.display());
        }
        ColorsPatch::Missing | ColorsPatch::AlreadyPresent => {}
    }

    info!(
        "android icons generated at {} ({} files, {} failed)",
        root.display(),
        report.written.len(),
        report.failures.len()
    );
    Ok(report)
}

fn write_manifest(path: &Path, contents: &str) -> Result<(), PipelineError> {
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| PipelineError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
