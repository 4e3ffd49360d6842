//! Background color reconstruction from a rasterized sampling strip.
//!
//! Each pixel column of the strip yields one color, taken from the strip's
//! vertical midpoint. The watermark rectangle is split into the same number
//! of equal-width columns so that horizontal gradients carry over one to one.

use image::RgbImage;

use crate::geometry::Rect;

/// An RGB color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledColor {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl SampledColor {
    /// Build from 8-bit channel values.
    #[must_use]
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: f32::from(rgb[0]) / 255.0,
            g: f32::from(rgb[1]) / 255.0,
            b: f32::from(rgb[2]) / 255.0,
        }
    }

    /// Convert back to 8-bit channel values, rounding to nearest.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

/// Sample the representative color for column `x` of a rasterized strip.
///
/// Reads the pixel at row `height / 2`. Returns `None` if `x` is out of range
/// or the strip is empty.
#[must_use]
pub fn sample_column(strip: &RgbImage, x: u32) -> Option<SampledColor> {
    if x >= strip.width() || strip.height() == 0 {
        return None;
    }
    let px = strip.get_pixel(x, strip.height() / 2);
    Some(SampledColor::from_rgb8(px.0))
}

/// The `index`-th of `columns` equal-width vertical slices of `region`.
///
/// Slices span the full height of `region` and run left to right.
#[must_use]
pub fn column_rect(region: &Rect, index: u32, columns: u32) -> Rect {
    #[allow(clippy::cast_precision_loss)]
    let (i, n) = (index as f32, columns.max(1) as f32);
    let col_width = region.width() / n;
    Rect::new(
        region.x1 + i * col_width,
        region.y1,
        region.x1 + (i + 1.0) * col_width,
        region.y2,
    )
}
