//! In-memory rasterizer for pipeline tests.
//!
//! Images are just a size plus the list of transforms that produced them, so
//! tests can assert on compositing order without touching a codec.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::{BlendMode, Overlay, Padding, Rasterizer};
use crate::color::BackgroundColor;
use crate::error::{RasterError, RasterOp};
use crate::icon::{ImageInfo, ImageKind, SizePx};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeImage {
    pub size: SizePx,
    pub ops: Vec<String>,
}

impl FakeImage {
    fn derive(&self, size: SizePx, op: String) -> Self {
        let mut ops = self.ops.clone();
        ops.push(op);
        Self { size, ops }
    }
}

#[derive(Debug, Default)]
pub struct FakeRasterizer {
    files: HashMap<PathBuf, ImageInfo>,
    /// Resize targets (edge length) that fail.
    failing_sizes: HashSet<u32>,
    pub decoded: RefCell<Vec<PathBuf>>,
}

impl FakeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, kind: ImageKind, edge: u32) -> Self {
        self.files.insert(
            path.into(),
            ImageInfo {
                kind,
                size: SizePx::square(edge),
            },
        );
        self
    }

    pub fn failing_at(mut self, edge: u32) -> Self {
        self.failing_sizes.insert(edge);
        self
    }

    fn lookup(&self, path: &Path, op: RasterOp) -> Result<ImageInfo, RasterError> {
        self.files
            .get(path)
            .copied()
            .ok_or_else(|| RasterError::new(op, "not found").with_path(path))
    }
}

fn blend_name(blend: BlendMode) -> &'static str {
    match blend {
        BlendMode::Over => "over",
        BlendMode::DestIn => "dest-in",
    }
}

impl Rasterizer for FakeRasterizer {
    type Image = FakeImage;

    fn probe(&self, path: &Path) -> Result<ImageInfo, RasterError> {
        self.lookup(path, RasterOp::Probe)
    }

    fn open(&self, path: &Path) -> Result<FakeImage, RasterError> {
        let info = self.lookup(path, RasterOp::Decode)?;
        self.decoded.borrow_mut().push(path.to_path_buf());
        Ok(FakeImage {
            size: info.size,
            ops: vec![format!("open {}", path.display())],
        })
    }

    fn rasterize_vector(&self, path: &Path, size: u32) -> Result<FakeImage, RasterError> {
        self.lookup(path, RasterOp::RasterizeVector)?;
        self.decoded.borrow_mut().push(path.to_path_buf());
        Ok(FakeImage {
            size: SizePx::square(size),
            ops: vec![format!("vector {} {size}", path.display())],
        })
    }

    fn circle_mask(&self, diameter: u32) -> Result<FakeImage, RasterError> {
        Ok(FakeImage {
            size: SizePx::square(diameter),
            ops: vec![format!("circle {diameter}")],
        })
    }

    fn resize(&self, image: &FakeImage, size: SizePx) -> Result<FakeImage, RasterError> {
        if self.failing_sizes.contains(&size.width) {
            return Err(RasterError::new(RasterOp::Resize, "injected failure"));
        }
        Ok(image.derive(size, format!("resize {}x{}", size.width, size.height)))
    }

    fn extend(
        &self,
        image: &FakeImage,
        padding: Padding,
        fill: &BackgroundColor,
    ) -> Result<FakeImage, RasterError> {
        let size = SizePx::new(
            image.size.width + padding.left + padding.right,
            image.size.height + padding.top + padding.bottom,
        );
        let op = format!(
            "extend {} {} {} {} {fill}",
            padding.top, padding.bottom, padding.left, padding.right
        );
        Ok(image.derive(size, op))
    }

    fn flatten(
        &self,
        image: &FakeImage,
        background: &BackgroundColor,
    ) -> Result<FakeImage, RasterError> {
        Ok(image.derive(image.size, format!("flatten {background}")))
    }

    fn composite(
        &self,
        base: &FakeImage,
        overlays: &[Overlay<'_, FakeImage>],
    ) -> Result<FakeImage, RasterError> {
        let layers: Vec<String> = overlays
            .iter()
            .map(|o| {
                format!(
                    "{}[{}]@{},{}",
                    blend_name(o.blend),
                    o.image.ops.join(" > "),
                    o.top,
                    o.left
                )
            })
            .collect();
        Ok(base.derive(base.size, format!("composite {}", layers.join(" + "))))
    }

    fn encode_png(&self, image: &FakeImage) -> Result<Vec<u8>, RasterError> {
        Ok(format!(
            "{}x{}\n{}",
            image.size.width,
            image.size.height,
            image.ops.join("\n")
        )
        .into_bytes())
    }
}
