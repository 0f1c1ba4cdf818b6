//! Source image types.
//!
//! A [`SourceIcon`] is the single validated input every platform output is
//! derived from.

use std::path::{Path, PathBuf};

use crate::error::PreconditionError;
use crate::raster::Rasterizer;

/// Minimum edge length of a source icon: the App Store marketing icon.
pub const MIN_SOURCE_SIZE: u32 = 1024;

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square of the given edge length.
    pub fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// What kind of file an image path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// A decodable bitmap. `has_alpha` reflects the stored color type.
    Raster { has_alpha: bool },
    /// An SVG document.
    Vector,
}

/// Header-level facts about an image file, read without decoding pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub kind: ImageKind,
    pub size: SizePx,
}

/// The validated source icon.
///
/// Construction enforces a square of at least [`MIN_SOURCE_SIZE`] pixels, so
/// holding a `SourceIcon` means the precondition already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIcon {
    path: PathBuf,
    size: SizePx,
}

impl SourceIcon {
    /// Probes `path` and checks it is usable as a source icon.
    pub fn open<R: Rasterizer>(rasterizer: &R, path: &Path) -> Result<Self, PreconditionError> {
        let info = rasterizer
            .probe(path)
            .map_err(|source| PreconditionError::UnreadableSource {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_info(path, info.size)
    }

    fn from_info(path: &Path, size: SizePx) -> Result<Self, PreconditionError> {
        if !size.is_square() {
            return Err(PreconditionError::SourceNotSquare {
                width: size.width,
                height: size.height,
            });
        }
        if size.width < MIN_SOURCE_SIZE {
            return Err(PreconditionError::SourceTooSmall {
                width: size.width,
                height: size.height,
                minimum: MIN_SOURCE_SIZE,
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> SizePx {
        self.size
    }
}
