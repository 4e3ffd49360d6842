//! Document capabilities required by the watermark remover.
//!
//! The remover only needs page enumeration, page dimensions, clipped
//! rasterization at a scale, and opaque rectangle drawing. Any rendering
//! library offering those can back it; see [`crate::pdfium`] for the default.

use std::path::Path;

use image::RgbImage;

use crate::error::Result;
use crate::geometry::Rect;
use crate::sampling::SampledColor;

/// Opens documents from disk.
pub trait DocumentLoader {
    /// Open document type, possibly borrowing from the loader.
    type Document<'a>: DocumentHandle
    where
        Self: 'a;

    /// Open and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Input`] if the file is missing, unreadable or
    /// not a valid document.
    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>>;
}

/// An open, mutable document.
///
/// Native resources are released when the handle is dropped.
pub trait DocumentHandle {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Run `f` against the page at zero-based `index`.
    ///
    /// Changes made through the canvas are committed to the document before
    /// this returns.
    ///
    /// # Errors
    ///
    /// Propagates errors from `f`, or a backend error if the page cannot be
    /// loaded.
    fn with_page(
        &mut self,
        index: usize,
        f: &mut dyn FnMut(&mut dyn PageCanvas) -> Result<()>,
    ) -> Result<()>;

    /// Serialize the whole document.
    ///
    /// # Errors
    ///
    /// Returns a backend error if serialization fails.
    fn save_to_bytes(&self) -> Result<Vec<u8>>;
}

/// One page of an open document.
pub trait PageCanvas {
    /// Page width in page units.
    fn width(&self) -> f32;

    /// Page height in page units.
    fn height(&self) -> f32;

    /// Rasterize the part of the page inside `clip` at `scale` pixels per unit.
    ///
    /// # Errors
    ///
    /// Returns a backend error if rendering fails or `clip` maps to no pixels.
    fn rasterize(&mut self, clip: &Rect, scale: f32) -> Result<RgbImage>;

    /// Draw `rect` filled and outlined in `color` on top of existing content.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the page object cannot be created.
    fn fill_rect(&mut self, rect: &Rect, color: SampledColor, outline_width: f32) -> Result<()>;
}
