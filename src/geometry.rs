//! Page-space geometry for the watermark region and its sampling strip.
//!
//! Coordinates use the page's top-left corner as origin with `y` growing
//! downwards, in page units (points). Backends with a bottom-left origin
//! convert at the drawing boundary.

/// Distance between the watermark's right edge and the page's right edge.
pub const RIGHT_INSET: f32 = 5.0;
/// Distance between the watermark's bottom edge and the page's bottom edge.
pub const BOTTOM_INSET: f32 = 5.0;
/// Width of the NotebookLM watermark region.
pub const WATERMARK_WIDTH: f32 = 110.0;
/// Height of the NotebookLM watermark region.
pub const WATERMARK_HEIGHT: f32 = 25.0;
/// Height of the background sampling strip above the watermark.
pub const STRIP_HEIGHT: f32 = 8.0;
/// Gap between the sampling strip's bottom edge and the watermark's top edge.
pub const STRIP_GAP: f32 = 2.0;
/// Rasterization upscaling factor applied to the sampling strip.
pub const SAMPLE_SCALE: f32 = 2.0;
/// Outline width of each cover rectangle, drawn in the fill color.
pub const OUTLINE_WIDTH: f32 = 1.0;

/// An axis-aligned rectangle `(x1, y1)`-`(x2, y2)` in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal extent (may be negative for malformed rectangles).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Vertical extent (may be negative for malformed rectangles).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Whether the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.x2 > self.x1 && self.y2 > self.y1)
    }

    /// Whether the rectangle lies entirely within a `width` x `height` page.
    #[must_use]
    pub fn fits_within(&self, width: f32, height: f32) -> bool {
        self.x1 >= 0.0 && self.y1 >= 0.0 && self.x2 <= width && self.y2 <= height
    }

    /// Map this rectangle onto the pixel grid of a page rendered at `scale`.
    ///
    /// Edges are rounded outwards and clamped to a `max_width` x `max_height`
    /// bitmap. Returns `(x, y, width, height)` in pixels, or `None` if the
    /// clamped region is empty.
    #[must_use]
    pub fn pixel_bounds(
        &self,
        scale: f32,
        max_width: u32,
        max_height: u32,
    ) -> Option<(u32, u32, u32, u32)> {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let clamp = |v: f32, max: u32| -> u32 { v.clamp(0.0, max as f32) as u32 };

        let px1 = clamp((self.x1 * scale).floor(), max_width);
        let py1 = clamp((self.y1 * scale).floor(), max_height);
        let px2 = clamp((self.x2 * scale).ceil(), max_width);
        let py2 = clamp((self.y2 * scale).ceil(), max_height);

        if px2 <= px1 || py2 <= py1 {
            return None;
        }
        Some((px1, py1, px2 - px1, py2 - py1))
    }
}

/// Placement of the watermark relative to the page's bottom-right corner.
///
/// The defaults describe where NotebookLM stamps its mark on exported
/// decks. Nothing is auto-detected: every page is treated with the same
/// offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkGeometry {
    /// Inset of the watermark's right edge from the page's right edge.
    pub right_inset: f32,
    /// Inset of the watermark's bottom edge from the page's bottom edge.
    pub bottom_inset: f32,
    /// Watermark width.
    pub width: f32,
    /// Watermark height.
    pub height: f32,
    /// Sampling strip height.
    pub strip_height: f32,
    /// Gap between sampling strip and watermark.
    pub strip_gap: f32,
    /// Rasterization scale for the sampling strip.
    pub scale: f32,
    /// Outline width of the cover rectangles.
    pub outline_width: f32,
}

impl Default for WatermarkGeometry {
    fn default() -> Self {
        Self {
            right_inset: RIGHT_INSET,
            bottom_inset: BOTTOM_INSET,
            width: WATERMARK_WIDTH,
            height: WATERMARK_HEIGHT,
            strip_height: STRIP_HEIGHT,
            strip_gap: STRIP_GAP,
            scale: SAMPLE_SCALE,
            outline_width: OUTLINE_WIDTH,
        }
    }
}

impl WatermarkGeometry {
    /// Watermark rectangle for a page of the given size, without bounds checks.
    #[must_use]
    pub fn watermark_rect(&self, page_width: f32, page_height: f32) -> Rect {
        let x2 = page_width - self.right_inset;
        let y2 = page_height - self.bottom_inset;
        Rect::new(x2 - self.width, y2 - self.height, x2, y2)
    }

    /// Sampling strip directly above `watermark`, spanning the same columns.
    #[must_use]
    pub fn sampling_strip(&self, watermark: &Rect) -> Rect {
        let y2 = watermark.y1 - self.strip_gap;
        Rect::new(watermark.x1, y2 - self.strip_height, watermark.x2, y2)
    }
}

/// The regions used to clean one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Region to cover.
    pub watermark: Rect,
    /// Background-only region sampled for cover colors.
    pub strip: Rect,
}

impl PageLayout {
    /// Compute the layout for a `width` x `height` page.
    ///
    /// Returns `None` when either region would be empty or would extend past
    /// the page edges (e.g. pages narrower than the watermark plus its inset).
    /// Such pages are left untouched.
    #[must_use]
    pub fn for_page(geometry: &WatermarkGeometry, width: f32, height: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) {
            return None;
        }

        let watermark = geometry.watermark_rect(width, height);
        let strip = geometry.sampling_strip(&watermark);

        if watermark.is_empty() || strip.is_empty() {
            return None;
        }
        if !watermark.fits_within(width, height) || !strip.fits_within(width, height) {
            return None;
        }

        Some(Self { watermark, strip })
    }
}

/// Clockwise rotation applied when a page is displayed (`/Rotate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRotation {
    /// Upright.
    #[default]
    None,
    /// Rotated a quarter turn clockwise.
    Clockwise90,
    /// Upside down.
    Clockwise180,
    /// Rotated three quarter turns clockwise.
    Clockwise270,
}

/// A rectangle in PDF user space: origin bottom-left, `y` growing upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserRect {
    /// Left edge.
    pub left: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Right edge.
    pub right: f32,
    /// Top edge.
    pub top: f32,
}

/// Relates the displayed page view to PDF user space.
///
/// The view is what renderers show and what [`PageLayout`] is computed in:
/// the crop box, rotated by `/Rotate`, with a top-left origin. Drawing
/// operators work in unrotated user space where the crop box may not start
/// at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    /// Crop box in user space.
    pub crop: UserRect,
    /// Display rotation.
    pub rotation: PageRotation,
}

impl PageFrame {
    /// Size of the displayed view; width and height swap for quarter turns.
    #[must_use]
    pub fn view_size(&self) -> (f32, f32) {
        let (w, h) = (
            self.crop.right - self.crop.left,
            self.crop.top - self.crop.bottom,
        );
        match self.rotation {
            PageRotation::None | PageRotation::Clockwise180 => (w, h),
            PageRotation::Clockwise90 | PageRotation::Clockwise270 => (h, w),
        }
    }

    /// Map a view-space point to user space.
    #[must_use]
    pub fn to_user_point(&self, x: f32, y: f32) -> (f32, f32) {
        let (w, h) = (
            self.crop.right - self.crop.left,
            self.crop.top - self.crop.bottom,
        );
        // Offsets from the crop box's bottom-left corner.
        let (dx, dy) = match self.rotation {
            PageRotation::None => (x, h - y),
            PageRotation::Clockwise90 => (y, x),
            PageRotation::Clockwise180 => (w - x, y),
            PageRotation::Clockwise270 => (w - y, h - x),
        };
        (self.crop.left + dx, self.crop.bottom + dy)
    }

    /// Map a view-space rectangle to user space.
    #[must_use]
    pub fn to_user_rect(&self, rect: &Rect) -> UserRect {
        let (ax, ay) = self.to_user_point(rect.x1, rect.y1);
        let (bx, by) = self.to_user_point(rect.x2, rect.y2);
        UserRect {
            left: ax.min(bx),
            bottom: ay.min(by),
            right: ax.max(bx),
            top: ay.max(by),
        }
    }
}
