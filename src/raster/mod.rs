//! Image transform interface used by the platform pipelines.
//!
//! The pipelines only speak to a [`Rasterizer`], never to a codec directly.
//! [`PixelRasterizer`] is the production implementation on top of the
//! `image` and `resvg` crates; tests substitute an in-memory fake that only
//! records which transforms ran.
//!
//! # Transform chains
//!
//! ```text
//! ic_launcher.png              resize ─► flatten
//! ic_launcher_round.png        resize ─► composite(dest-in circle) ─► flatten
//! ic_launcher_foreground.png   resize ─► extend ─► flatten ─► [composite(dest-in mask)]
//! icon-*.png (iOS)             resize ─► flatten
//! ```

pub mod pixels;
pub mod svg;

#[cfg(test)]
pub(crate) mod fake;

pub use pixels::PixelRasterizer;

use std::path::Path;

use crate::color::BackgroundColor;
use crate::error::RasterError;
use crate::icon::{ImageInfo, SizePx};

// ============================================================================
// Compositing primitives
// ============================================================================

/// How a layer is combined with the canvas below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Source over destination.
    Over,
    /// Keep the base pixels, scaling their alpha by the layer's alpha.
    ///
    /// Base pixels not covered by the layer become fully transparent.
    DestIn,
}

/// One layer passed to [`Rasterizer::composite`].
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a, I> {
    pub image: &'a I,
    pub top: u32,
    pub left: u32,
    pub blend: BlendMode,
}

impl<'a, I> Overlay<'a, I> {
    /// A layer anchored at the top-left corner.
    pub fn new(image: &'a I, blend: BlendMode) -> Self {
        Self {
            image,
            top: 0,
            left: 0,
            blend,
        }
    }

    pub fn at(mut self, top: u32, left: u32) -> Self {
        self.top = top;
        self.left = left;
        self
    }
}

/// Border widths added around an image by [`Rasterizer::extend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    /// Borders that center `content` inside a square `canvas`.
    ///
    /// Odd remainders put the extra pixel on the bottom and right edges.
    pub fn centering(content: u32, canvas: u32) -> Self {
        let spare = canvas.saturating_sub(content);
        let lead = spare / 2;
        let trail = spare - lead;
        Self {
            top: lead,
            bottom: trail,
            left: lead,
            right: trail,
        }
    }
}

// ============================================================================
// Rasterizer
// ============================================================================

/// The narrow set of image operations the pipelines need.
///
/// Every operation returns a new image; inputs are never mutated, so one
/// decoded source can feed every output size.
pub trait Rasterizer {
    /// In-memory image representation.
    type Image: Clone;

    /// Reads format and dimensions without decoding pixel data.
    fn probe(&self, path: &Path) -> Result<ImageInfo, RasterError>;

    /// Decodes a raster file, or renders a vector file at its intrinsic size.
    fn open(&self, path: &Path) -> Result<Self::Image, RasterError>;

    /// Renders a vector file into a `size`x`size` image.
    fn rasterize_vector(&self, path: &Path, size: u32) -> Result<Self::Image, RasterError>;

    /// A white disc of radius `diameter / 2` centered on a transparent
    /// `diameter`x`diameter` canvas.
    fn circle_mask(&self, diameter: u32) -> Result<Self::Image, RasterError>;

    /// Exact-dimension resample; aspect ratio is not preserved.
    fn resize(&self, image: &Self::Image, size: SizePx) -> Result<Self::Image, RasterError>;

    /// Grows the canvas by uniform borders painted with `fill`.
    fn extend(
        &self,
        image: &Self::Image,
        padding: Padding,
        fill: &BackgroundColor,
    ) -> Result<Self::Image, RasterError>;

    /// Composites the image onto an opaque `background`.
    fn flatten(
        &self,
        image: &Self::Image,
        background: &BackgroundColor,
    ) -> Result<Self::Image, RasterError>;

    /// Layers `overlays` onto `base` in order.
    fn composite(
        &self,
        base: &Self::Image,
        overlays: &[Overlay<'_, Self::Image>],
    ) -> Result<Self::Image, RasterError>;

    fn encode_png(&self, image: &Self::Image) -> Result<Vec<u8>, RasterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_padding_on_largest_adaptive_bucket() {
        let padded = (432.0_f32 * 0.55).floor() as u32;
        assert_eq!(padded, 237);

        let padding = Padding::centering(padded, 432);
        assert_eq!(padding.top, 97);
        assert_eq!(padding.left, 97);
        assert_eq!(padding.bottom, 98);
        assert_eq!(padding.right, 98);
        assert_eq!(padding.top + padded + padding.bottom, 432);
    }

    #[test]
    fn centering_padding_even_split() {
        let padding = Padding::centering(100, 200);
        assert_eq!(padding, Padding { top: 50, bottom: 50, left: 50, right: 50 });
    }

    #[test]
    fn overlay_builder_positions() {
        let image = ();
        let overlay = Overlay::new(&image, BlendMode::Over).at(3, 4);
        assert_eq!((overlay.top, overlay.left), (3, 4));
        assert_eq!(overlay.blend, BlendMode::Over);
    }
}
