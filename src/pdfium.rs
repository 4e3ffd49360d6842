//! Document backend over the PDFium rendering library.

use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};
use pdfium_render::prelude::*;

use crate::backend::{DocumentHandle, DocumentLoader, PageCanvas};
use crate::error::{Error, Result};
use crate::geometry::{PageFrame, PageRotation, Rect, UserRect};
use crate::sampling::SampledColor;

/// Loads PDF documents through a bound PDFium library.
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    /// Bind libpdfium, trying the current directory first, then system paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if no usable library is found.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Backend(format!("failed to bind libpdfium: {e}")))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Wrap an already bound PDFium instance.
    #[must_use]
    pub fn from_pdfium(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }
}

impl DocumentLoader for PdfiumBackend {
    type Document<'a> = PdfiumDocument<'a>;

    fn open<'a>(&'a self, path: &Path) -> Result<PdfiumDocument<'a>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Input {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(PdfiumDocument { document })
    }
}

/// A PDF document opened by [`PdfiumBackend`].
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl DocumentHandle for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        usize::try_from(self.document.pages().len()).unwrap_or_default()
    }

    fn with_page(
        &mut self,
        index: usize,
        f: &mut dyn FnMut(&mut dyn PageCanvas) -> Result<()>,
    ) -> Result<()> {
        let page_index = PdfPageIndex::try_from(index)
            .map_err(|_| Error::Backend(format!("page index {index} out of range")))?;
        let mut page = self
            .document
            .pages()
            .get(page_index)
            .map_err(|e| Error::Backend(format!("failed to load page {}: {e}", index + 1)))?;

        // One content stream rewrite per page instead of one per cover column.
        page.set_content_regeneration_strategy(PdfPageContentRegenerationStrategy::AutomaticOnDrop);

        let frame = page_frame(&page)
            .map_err(|e| Error::Backend(format!("failed to read page {} box: {e}", index + 1)))?;
        let mut canvas = PdfiumPage { page, frame };
        f(&mut canvas)
    }

    fn save_to_bytes(&self) -> Result<Vec<u8>> {
        self.document
            .save_to_bytes()
            .map_err(|e| Error::Backend(format!("failed to serialize PDF: {e}")))
    }
}

/// The page's crop box and display rotation.
///
/// Falls back to the media box, then to the unrotated page size, when the
/// page dictionary carries no explicit box.
fn page_frame(page: &PdfPage<'_>) -> std::result::Result<PageFrame, PdfiumError> {
    let rotation = match page.rotation()? {
        PdfPageRenderRotation::None => PageRotation::None,
        PdfPageRenderRotation::Degrees90 => PageRotation::Clockwise90,
        PdfPageRenderRotation::Degrees180 => PageRotation::Clockwise180,
        PdfPageRenderRotation::Degrees270 => PageRotation::Clockwise270,
    };

    let boundaries = page.boundaries();
    let crop = match boundaries.crop().or_else(|_| boundaries.media()) {
        Ok(boundary) => {
            let rect = boundary.bounds;
            UserRect {
                left: rect.left().value,
                bottom: rect.bottom().value,
                right: rect.right().value,
                top: rect.top().value,
            }
        }
        Err(_) => {
            let (w, h) = (page.width().value, page.height().value);
            let (w, h) = match rotation {
                PageRotation::Clockwise90 | PageRotation::Clockwise270 => (h, w),
                PageRotation::None | PageRotation::Clockwise180 => (w, h),
            };
            UserRect {
                left: 0.0,
                bottom: 0.0,
                right: w,
                top: h,
            }
        }
    };

    Ok(PageFrame { crop, rotation })
}

fn to_pdf_rect(rect: &UserRect) -> PdfRect {
    PdfRect::new_from_values(rect.bottom, rect.left, rect.top, rect.right)
}

struct PdfiumPage<'a> {
    page: PdfPage<'a>,
    frame: PageFrame,
}

impl PdfiumPage<'_> {
    fn set_crop_box(&mut self, rect: &UserRect) -> Result<()> {
        self.page
            .boundaries_mut()
            .set_crop(to_pdf_rect(rect))
            .map_err(|e| Error::Backend(format!("failed to set crop box: {e}")))
    }

    fn render_view(&self, scale: f32) -> Result<RgbImage> {
        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = self
            .page
            .render_with_config(&config)
            .map_err(|e| Error::Backend(format!("render failed: {e}")))?;

        let width = u32::try_from(bitmap.width())
            .map_err(|_| Error::Backend("negative bitmap width".to_string()))?;
        let height = u32::try_from(bitmap.height())
            .map_err(|_| Error::Backend("negative bitmap height".to_string()))?;
        if width == 0 || height == 0 {
            return Err(Error::Backend("clip rectangle maps to no pixels".to_string()));
        }

        let image = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
            .ok_or_else(|| Error::Backend("bitmap buffer size mismatch".to_string()))?;
        Ok(DynamicImage::ImageRgba8(image).to_rgb8())
    }
}

impl PageCanvas for PdfiumPage<'_> {
    fn width(&self) -> f32 {
        self.frame.view_size().0
    }

    fn height(&self) -> f32 {
        self.frame.view_size().1
    }

    /// Renders only `clip` by narrowing the crop box for the duration of the
    /// call, so the bitmap is the size of the clip rather than the page.
    fn rasterize(&mut self, clip: &Rect, scale: f32) -> Result<RgbImage> {
        let (w, h) = self.frame.view_size();
        let clip = Rect::new(
            clip.x1.max(0.0),
            clip.y1.max(0.0),
            clip.x2.min(w),
            clip.y2.min(h),
        );
        if clip.is_empty() {
            return Err(Error::Backend("clip rectangle lies outside the page".to_string()));
        }

        let original = self.frame.crop;
        let target = self.frame.to_user_rect(&clip);
        self.set_crop_box(&target)?;
        let rendered = self.render_view(scale);
        self.set_crop_box(&original)?;
        rendered
    }

    fn fill_rect(&mut self, rect: &Rect, color: SampledColor, outline_width: f32) -> Result<()> {
        let bounds = to_pdf_rect(&self.frame.to_user_rect(rect));

        let [r, g, b] = color.to_rgb8();
        let pdf_color = PdfColor::new(r, g, b, 255);
        let (stroke, stroke_width) = if outline_width > 0.0 {
            (Some(pdf_color), Some(PdfPoints::new(outline_width)))
        } else {
            (None, None)
        };

        self.page
            .objects_mut()
            .create_path_object_rect(bounds, stroke, stroke_width, Some(pdf_color))
            .map_err(|e| Error::Backend(format!("failed to create rectangle: {e}")))?;
        Ok(())
    }
}
