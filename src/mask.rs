//! Validation and normalization of the optional adaptive-icon mask.
//!
//! An unusable mask never aborts generation: it is reported with a warning
//! and the run continues as if no mask had been given.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::catalog::MASK_REFERENCE_SIZE;
use crate::error::RasterError;
use crate::icon::{ImageKind, SizePx};
use crate::raster::Rasterizer;

/// A mask decoded once at [`MASK_REFERENCE_SIZE`] and reused for every
/// adaptive bucket.
#[derive(Debug, Clone)]
pub struct Mask<I> {
    origin: PathBuf,
    image: I,
}

impl<I> Mask<I> {
    /// Path the mask was loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// The normalized `432x432` buffer.
    pub fn image(&self) -> &I {
        &self.image
    }
}

/// Why a mask was discarded.
#[derive(Debug, thiserror::Error)]
pub enum MaskRejection {
    #[error("mask must be an image with an alpha channel or an SVG")]
    NoAlpha,
    #[error(transparent)]
    Unreadable(#[from] RasterError),
}

/// Checks a mask file and normalizes it to the reference size.
pub fn validate<R: Rasterizer>(rasterizer: &R, path: &Path) -> Result<Mask<R::Image>, MaskRejection> {
    let info = rasterizer.probe(path)?;
    let reference = SizePx::square(MASK_REFERENCE_SIZE);

    let image = match info.kind {
        ImageKind::Vector => rasterizer.rasterize_vector(path, MASK_REFERENCE_SIZE)?,
        ImageKind::Raster { has_alpha: true } => {
            let decoded = rasterizer.open(path)?;
            rasterizer.resize(&decoded, reference)?
        }
        ImageKind::Raster { has_alpha: false } => return Err(MaskRejection::NoAlpha),
    };

    Ok(Mask {
        origin: path.to_path_buf(),
        image,
    })
}

/// Loads an optional mask, degrading to `None` with a warning on rejection.
pub fn load<R: Rasterizer>(rasterizer: &R, path: Option<&Path>) -> Option<Mask<R::Image>> {
    let path = path?;
    match validate(rasterizer, path) {
        Ok(mask) => {
            info!("using mask {}", path.display());
            Some(mask)
        }
        Err(rejection) => {
            warn!("ignoring mask {}: {rejection}", path.display());
            None
        }
    }
}
