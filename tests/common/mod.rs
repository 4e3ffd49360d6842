//! In-memory document backend for integration tests.
//!
//! Documents are stored as a small line-based text format:
//!
//! ```text
//! page <width> <height> <r> <g> <b>
//! rect <x1> <y1> <x2> <y2> <r> <g> <b>
//! ```
//!
//! `rect` lines belong to the preceding `page` and are painted in order on
//! top of the page background. Rasterization point-samples pixel centers.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

use image::RgbImage;
use notebooklm_watermark_removal::backend::{DocumentHandle, DocumentLoader, PageCanvas};
use notebooklm_watermark_removal::{Error, Rect, Result, SampledColor};

/// Background used by generated decks.
pub const BACKGROUND: [f32; 3] = [0.9, 0.9, 0.95];
/// Watermark stand-in color.
pub const WATERMARK: [f32; 3] = [0.5, 0.5, 0.5];

#[derive(Debug, Clone, PartialEq)]
pub struct SketchPage {
    pub width: f32,
    pub height: f32,
    pub background: [f32; 3],
    pub rects: Vec<(Rect, [f32; 3])>,
}

impl SketchPage {
    pub fn new(width: f32, height: f32, background: [f32; 3]) -> Self {
        Self {
            width,
            height,
            background,
            rects: Vec::new(),
        }
    }

    pub fn with_rect(mut self, rect: Rect, color: [f32; 3]) -> Self {
        self.rects.push((rect, color));
        self
    }

    pub fn color_at(&self, x: f32, y: f32) -> [f32; 3] {
        self.rects
            .iter()
            .rev()
            .find(|(r, _)| x >= r.x1 && x < r.x2 && y >= r.y1 && y < r.y2)
            .map_or(self.background, |(_, c)| *c)
    }

    pub fn render(&self, clip: &Rect, scale: f32) -> Option<RgbImage> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (max_w, max_h) = (
            (self.width * scale).ceil() as u32,
            (self.height * scale).ceil() as u32,
        );
        let (x0, y0, w, h) = clip.pixel_bounds(scale, max_w, max_h)?;
        Some(RgbImage::from_fn(w, h, |dx, dy| {
            #[allow(clippy::cast_precision_loss)]
            let (px, py) = ((x0 + dx) as f32 + 0.5, (y0 + dy) as f32 + 0.5);
            let [r, g, b] = self.color_at(px / scale, py / scale);
            image::Rgb(SampledColor { r, g, b }.to_rgb8())
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SketchDocument {
    pub pages: Vec<SketchPage>,
    fail_raster_on: Option<usize>,
}

impl SketchDocument {
    pub fn new(pages: Vec<SketchPage>) -> Self {
        Self {
            pages,
            fail_raster_on: None,
        }
    }

    pub fn write(&self, path: &Path) {
        std::fs::write(path, self.serialize()).unwrap();
    }

    pub fn read(path: &Path) -> Self {
        let text = std::fs::read_to_string(path).unwrap();
        Self::parse(&text).unwrap()
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            let [r, g, b] = page.background;
            writeln!(out, "page {} {} {r} {g} {b}", page.width, page.height).unwrap();
            for (rect, [r, g, b]) in &page.rects {
                writeln!(
                    out,
                    "rect {} {} {} {} {r} {g} {b}",
                    rect.x1, rect.y1, rect.x2, rect.y2
                )
                .unwrap();
            }
        }
        out
    }

    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let mut pages: Vec<SketchPage> = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let kind = match fields.next() {
                Some(k) => k,
                None => continue,
            };
            let values: Vec<f32> = fields
                .map(str::parse)
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| format!("line {}: {e}", lineno + 1))?;

            match (kind, values.as_slice()) {
                ("page", &[w, h, r, g, b]) => pages.push(SketchPage::new(w, h, [r, g, b])),
                ("rect", &[x1, y1, x2, y2, r, g, b]) => pages
                    .last_mut()
                    .ok_or_else(|| format!("line {}: rect before page", lineno + 1))?
                    .rects
                    .push((Rect::new(x1, y1, x2, y2), [r, g, b])),
                _ => return Err(format!("line {}: malformed record", lineno + 1)),
            }
        }
        if pages.is_empty() {
            return Err("document has no pages".to_string());
        }
        Ok(Self::new(pages))
    }
}

/// Loader for sketch documents.
#[derive(Debug, Default)]
pub struct SketchLoader {
    /// Zero-based page whose rasterization fails, if any.
    pub fail_raster_on: Option<usize>,
}

impl DocumentLoader for SketchLoader {
    type Document<'a> = SketchDocument;

    fn open<'a>(&'a self, path: &Path) -> Result<SketchDocument> {
        let input_err = |reason: String| Error::Input {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| input_err(e.to_string()))?;
        let mut document = SketchDocument::parse(&text).map_err(input_err)?;
        document.fail_raster_on = self.fail_raster_on;
        Ok(document)
    }
}

impl DocumentHandle for SketchDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn with_page(
        &mut self,
        index: usize,
        f: &mut dyn FnMut(&mut dyn PageCanvas) -> Result<()>,
    ) -> Result<()> {
        let fail_raster = self.fail_raster_on == Some(index);
        let page = self
            .pages
            .get_mut(index)
            .ok_or_else(|| Error::Backend(format!("no page {index}")))?;
        f(&mut SketchCanvas { page, fail_raster })
    }

    fn save_to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.serialize().into_bytes())
    }
}

struct SketchCanvas<'p> {
    page: &'p mut SketchPage,
    fail_raster: bool,
}

impl PageCanvas for SketchCanvas<'_> {
    fn width(&self) -> f32 {
        self.page.width
    }

    fn height(&self) -> f32 {
        self.page.height
    }

    fn rasterize(&mut self, clip: &Rect, scale: f32) -> Result<RgbImage> {
        if self.fail_raster {
            return Err(Error::Backend("simulated render failure".to_string()));
        }
        self.page
            .render(clip, scale)
            .ok_or_else(|| Error::Backend("clip rectangle maps to no pixels".to_string()))
    }

    fn fill_rect(&mut self, rect: &Rect, color: SampledColor, _outline_width: f32) -> Result<()> {
        self.page.rects.push((*rect, [color.r, color.g, color.b]));
        Ok(())
    }
}

/// The NotebookLM watermark rectangle for a page.
pub fn watermark_rect(width: f32, height: f32) -> Rect {
    Rect::new(width - 115.0, height - 30.0, width - 5.0, height - 5.0)
}

/// A deck of identical pages with a uniform background and a gray mark.
pub fn watermarked_deck(pages: usize, width: f32, height: f32) -> SketchDocument {
    SketchDocument::new(
        (0..pages)
            .map(|_| {
                SketchPage::new(width, height, BACKGROUND)
                    .with_rect(Rect::new(50.0, 80.0, 250.0, 110.0), [0.1, 0.1, 0.1])
                    .with_rect(watermark_rect(width, height), WATERMARK)
            })
            .collect(),
    )
}

/// Assert every pixel of `img` is within `tol` of `expected` per channel.
pub fn assert_uniform(img: &RgbImage, expected: [u8; 3], tol: u8) {
    for (x, y, px) in img.enumerate_pixels() {
        for ch in 0..3 {
            let diff = px[ch].abs_diff(expected[ch]);
            assert!(
                diff <= tol,
                "pixel ({x},{y}) ch {ch}: got {}, expected {} (+/- {tol})",
                px[ch],
                expected[ch]
            );
        }
    }
}
