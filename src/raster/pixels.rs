//! [`Rasterizer`] implementation backed by the `image` crate.

use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageEncoder, ImageReader, Rgba, RgbaImage};

use super::svg::{looks_like_svg, render_circle, render_svg, svg_size};
use super::{BlendMode, Overlay, Padding, Rasterizer};
use crate::color::BackgroundColor;
use crate::error::{RasterError, RasterOp};
use crate::icon::{ImageInfo, ImageKind, SizePx};

/// Production rasterizer: RGBA8 buffers, Lanczos3 resampling, PNG output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelRasterizer;

impl PixelRasterizer {
    pub fn new() -> Self {
        Self
    }
}

/// Bytes inspected when looking for SVG markup in a file without an `.svg`
/// extension.
const SNIFF_LEN: u64 = 1024;

fn is_vector(path: &Path) -> Result<bool, RasterError> {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if by_extension {
        return Ok(true);
    }

    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)
        .and_then(|file| file.take(SNIFF_LEN).read_to_end(&mut head))
        .map_err(|e| RasterError::new(RasterOp::Probe, e))?;
    Ok(looks_like_svg(&head))
}

fn read(path: &Path, op: RasterOp) -> Result<Vec<u8>, RasterError> {
    fs::read(path).map_err(|e| RasterError::new(op, e))
}

fn probe_file(path: &Path) -> Result<ImageInfo, RasterError> {
    if is_vector(path)? {
        let size = svg_size(&read(path, RasterOp::Probe)?)?;
        return Ok(ImageInfo {
            kind: ImageKind::Vector,
            size,
        });
    }

    let decoder = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| RasterError::new(RasterOp::Probe, e))?
        .into_decoder()
        .map_err(|e| RasterError::new(RasterOp::Probe, e))?;
    let (width, height) = decoder.dimensions();
    Ok(ImageInfo {
        kind: ImageKind::Raster {
            has_alpha: decoder.color_type().has_alpha(),
        },
        size: SizePx::new(width, height),
    })
}

fn open_file(path: &Path) -> Result<RgbaImage, RasterError> {
    if is_vector(path)? {
        let data = read(path, RasterOp::RasterizeVector)?;
        let size = svg_size(&data)?;
        return render_svg(&data, size);
    }

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| RasterError::new(RasterOp::Decode, e))?
        .decode()
        .map_err(|e| RasterError::new(RasterOp::Decode, e))?;
    Ok(img.to_rgba8())
}

impl Rasterizer for PixelRasterizer {
    type Image = RgbaImage;

    fn probe(&self, path: &Path) -> Result<ImageInfo, RasterError> {
        probe_file(path).map_err(|e| e.with_path(path))
    }

    fn open(&self, path: &Path) -> Result<RgbaImage, RasterError> {
        open_file(path).map_err(|e| e.with_path(path))
    }

    fn rasterize_vector(&self, path: &Path, size: u32) -> Result<RgbaImage, RasterError> {
        read(path, RasterOp::RasterizeVector)
            .and_then(|data| render_svg(&data, SizePx::square(size)))
            .map_err(|e| e.with_path(path))
    }

    fn circle_mask(&self, diameter: u32) -> Result<RgbaImage, RasterError> {
        render_circle(diameter)
    }

    fn resize(&self, image: &RgbaImage, size: SizePx) -> Result<RgbaImage, RasterError> {
        if size.width == 0 || size.height == 0 {
            return Err(RasterError::new(
                RasterOp::Resize,
                format!("target size {}x{} is empty", size.width, size.height),
            ));
        }
        Ok(imageops::resize(image, size.width, size.height, FilterType::Lanczos3))
    }

    fn extend(
        &self,
        image: &RgbaImage,
        padding: Padding,
        fill: &BackgroundColor,
    ) -> Result<RgbaImage, RasterError> {
        let width = image.width() + padding.left + padding.right;
        let height = image.height() + padding.top + padding.bottom;
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba(fill.rgba()));
        imageops::replace(&mut canvas, image, padding.left.into(), padding.top.into());
        Ok(canvas)
    }

    fn flatten(
        &self,
        image: &RgbaImage,
        background: &BackgroundColor,
    ) -> Result<RgbaImage, RasterError> {
        let [back_r, back_g, back_b, _] = background.rgba();
        let mut out = image.clone();
        for pixel in out.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            if a == u8::MAX {
                continue;
            }
            // The background is opaque, so the result is a plain lerp.
            let mix = |front: u8, back: u8| {
                ((front as u32 * a as u32 + back as u32 * (255 - a as u32) + 127) / 255) as u8
            };
            *pixel = Rgba([mix(r, back_r), mix(g, back_g), mix(b, back_b), u8::MAX]);
        }
        Ok(out)
    }

    fn composite(
        &self,
        base: &RgbaImage,
        overlays: &[Overlay<'_, RgbaImage>],
    ) -> Result<RgbaImage, RasterError> {
        let mut out = base.clone();
        for overlay in overlays {
            match overlay.blend {
                BlendMode::Over => composite_over(&mut out, overlay.image, overlay.left, overlay.top),
                BlendMode::DestIn => {
                    composite_dest_in(&mut out, overlay.image, overlay.left, overlay.top)
                }
            }
        }
        Ok(out)
    }

    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, RasterError> {
        let mut buf = Vec::new();
        let encoder = PngEncoder::new(Cursor::new(&mut buf));

        // Opaque outputs drop the alpha channel; App Store Connect rejects
        // marketing icons that carry one.
        let result = if image.pixels().all(|p| p[3] == u8::MAX) {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            encoder.write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
        } else {
            encoder.write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgba8,
            )
        };
        result.map_err(|e| RasterError::new(RasterOp::EncodePng, e))?;
        Ok(buf)
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Alpha blends `src` over `dst`.
pub(crate) fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx, y + sy);
        if dx >= dest.width() || dy >= dest.height() {
            continue;
        }
        let dst_pixel = dest.get_pixel(dx, dy);
        let blended = blend_over(*src_pixel, *dst_pixel);
        dest.put_pixel(dx, dy, blended);
    }
}

/// Multiplies `dest` alpha by `mask` alpha; pixels outside the mask vanish.
pub(crate) fn composite_dest_in(dest: &mut RgbaImage, mask: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in dest.enumerate_pixels_mut() {
        let coverage = if dx >= x && dy >= y {
            mask.get_pixel_checked(dx - x, dy - y).map_or(0, |m| m[3])
        } else {
            0
        };
        pixel[3] = ((pixel[3] as u16 * coverage as u16 + 127) / 255) as u8;
        if pixel[3] == 0 {
            pixel.0 = [0, 0, 0, 0];
        }
    }
}

/// Source-over for straight (non-premultiplied) RGBA8 pixels.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let [sr, sg, sb, sa] = src.0.map(unit);
    let [dr, dg, db, da] = dst.0.map(unit);

    let coverage = sa + da * (1.0 - sa);
    if coverage <= 0.0 {
        return Rgba([0; 4]);
    }
    let channel = |s: f32, d: f32| to_byte((s * sa + d * da * (1.0 - sa)) / coverage);
    Rgba([channel(sr, dr), channel(sg, dg), channel(sb, db), to_byte(coverage)])
}

fn unit(channel: u8) -> f32 {
    channel as f32 / 255.0
}

fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
