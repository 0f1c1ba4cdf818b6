//! SVG rendering using resvg/usvg.
//!
//! Used for user-supplied vector masks and for the circle stencil applied to
//! round launcher icons.

use std::borrow::Cow;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{RasterError, RasterOp};
use crate::icon::SizePx;

/// Returns true if the bytes look like an SVG document.
pub fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    String::from_utf8_lossy(head).contains("<svg")
}

/// Parses an SVG document and returns its intrinsic size, rounded up.
pub fn svg_size(svg_data: &[u8]) -> Result<SizePx, RasterError> {
    let tree = parse(svg_data, RasterOp::Probe)?;
    let size = tree.size();
    Ok(SizePx::new(
        size.width().ceil() as u32,
        size.height().ceil() as u32,
    ))
}

/// Renders SVG data stretched to exactly `size`.
pub fn render_svg(svg_data: &[u8], size: SizePx) -> Result<RgbaImage, RasterError> {
    let tree = parse(svg_data, RasterOp::RasterizeVector)?;

    let svg_size = tree.size();
    let sx = size.width as f32 / svg_size.width();
    let sy = size.height as f32 / svg_size.height();

    let mut pixmap = Pixmap::new(size.width, size.height).ok_or_else(|| {
        RasterError::new(
            RasterOp::RasterizeVector,
            format!("cannot allocate {}x{} pixmap", size.width, size.height),
        )
    })?;
    resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Markup for a white disc inscribed in a `diameter`x`diameter` square.
pub fn circle_svg(diameter: u32) -> String {
    let r = diameter as f32 / 2.0;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{diameter}" height="{diameter}"><circle cx="{r}" cy="{r}" r="{r}" fill="white"/></svg>"#
    )
}

/// Renders the circle stencil for a round icon.
pub fn render_circle(diameter: u32) -> Result<RgbaImage, RasterError> {
    render_svg(circle_svg(diameter).as_bytes(), SizePx::square(diameter))
        .map_err(|e| RasterError::new(RasterOp::CircleMask, e.reason))
}

fn parse(svg_data: &[u8], op: RasterOp) -> Result<Tree, RasterError> {
    let svg_data = with_svg_namespace(svg_data);
    Tree::from_data(&svg_data, &Options::default()).map_err(|e| RasterError::new(op, e))
}

const SVG_NAMESPACE_ATTR: &[u8] = br#" xmlns="http://www.w3.org/2000/svg""#;

/// Declares the SVG namespace on the root `<svg>` tag when it is missing.
///
/// usvg only recognizes a root element in the SVG namespace, while browsers
/// and most other renderers accept bare `<svg width=.. height=..>` markup.
fn with_svg_namespace(svg_data: &[u8]) -> Cow<'_, [u8]> {
    let Some(start) = find(svg_data, b"<svg") else {
        return Cow::Borrowed(svg_data);
    };
    let tag_end = find(&svg_data[start..], b">").map_or(svg_data.len(), |end| start + end);
    if find(&svg_data[start..tag_end], b"xmlns=").is_some() {
        return Cow::Borrowed(svg_data);
    }

    let insert_at = start + b"<svg".len();
    let mut patched = Vec::with_capacity(svg_data.len() + SVG_NAMESPACE_ATTR.len());
    patched.extend_from_slice(&svg_data[..insert_at]);
    patched.extend_from_slice(SVG_NAMESPACE_ATTR);
    patched.extend_from_slice(&svg_data[insert_at..]);
    Cow::Owned(patched)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (pixel, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        // tiny_skia stores premultiplied alpha
        let color = pixel.demultiply();
        *out = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    img
}
