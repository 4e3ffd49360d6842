//! Core watermark removal engine.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::backend::{DocumentHandle, DocumentLoader, PageCanvas};
use crate::error::{Error, Result};
use crate::geometry::{PageLayout, WatermarkGeometry};
use crate::page_range::parse_page_range;
use crate::sampling::{column_rect, sample_column};

/// Outcome of a successful removal call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// Number of pages the removal pass ran on.
    pub pages_processed: usize,
}

/// Options controlling file and directory processing.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Page-range expression limiting which pages are cleaned (all if `None`).
    pub pages: Option<String>,
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Result of processing a single document file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Pages cleaned, zero on failure.
    pub pages_processed: usize,
    /// Human-readable status message.
    pub message: String,
}

/// Covers the watermark on every page of a document with sampled background.
///
/// Create once and reuse for multiple documents. Each call opens its own
/// document handle; nothing is shared between calls.
pub struct WatermarkRemover<L> {
    loader: L,
    geometry: WatermarkGeometry,
}

#[cfg(feature = "pdfium")]
impl WatermarkRemover<crate::pdfium::PdfiumBackend> {
    /// Create a remover backed by PDFium with the NotebookLM geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if libpdfium cannot be bound.
    pub fn with_pdfium() -> Result<Self> {
        Ok(Self::new(crate::pdfium::PdfiumBackend::new()?))
    }
}

impl<L: DocumentLoader> WatermarkRemover<L> {
    /// Create a remover using the default NotebookLM watermark geometry.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self::with_geometry(loader, WatermarkGeometry::default())
    }

    /// Create a remover with custom watermark placement.
    #[must_use]
    pub fn with_geometry(loader: L, geometry: WatermarkGeometry) -> Self {
        Self { loader, geometry }
    }

    /// The watermark placement in use.
    #[must_use]
    pub fn geometry(&self) -> &WatermarkGeometry {
        &self.geometry
    }

    /// The document loader in use.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Remove the watermark from every page of `input`, writing to `output`.
    ///
    /// Any existing file at `output` is replaced. The destination is only
    /// written once every page has been processed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] for unreadable sources,
    /// [`Error::Rasterization`] or [`Error::Draw`] if a page cannot be
    /// processed, and [`Error::Output`] if the result cannot be written.
    pub fn remove(&self, input: &Path, output: &Path) -> Result<RemovalReport> {
        self.remove_pages(input, output, None)
    }

    /// Like [`remove`](Self::remove), restricted to a page-range expression.
    ///
    /// Pages outside the selection are copied unchanged and not counted.
    ///
    /// # Errors
    ///
    /// Same as [`remove`](Self::remove), plus [`Error::InvalidPageRange`].
    pub fn remove_pages(
        &self,
        input: &Path,
        output: &Path,
        pages: Option<&str>,
    ) -> Result<RemovalReport> {
        let mut document = self.loader.open(input)?;
        let selected = parse_page_range(pages, document.page_count())?;

        let mut report = RemovalReport::default();
        for &page_number in &selected {
            document.with_page(page_number - 1, &mut |canvas: &mut dyn PageCanvas| {
                self.clean_page(canvas, page_number)
            })?;
            report.pages_processed += 1;
        }

        let bytes = document.save_to_bytes().map_err(|e| Error::Output {
            path: output.to_path_buf(),
            source: std::io::Error::other(e.to_string()),
        })?;
        drop(document);

        write_atomically(output, &bytes)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            pages = report.pages_processed,
            "watermark removed"
        );

        Ok(report)
    }

    /// Cover the watermark of a single page.
    ///
    /// Pages without room for the watermark region are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rasterization`] or [`Error::Draw`] for `page_number`.
    pub fn clean_page(&self, canvas: &mut dyn PageCanvas, page_number: usize) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let Some(layout) = PageLayout::for_page(&self.geometry, width, height) else {
            warn!(
                page = page_number,
                width, height, "page too small for watermark region, left unchanged"
            );
            return Ok(());
        };

        let raster_err = |reason: String| Error::Rasterization {
            page: page_number,
            reason,
        };

        let strip = canvas
            .rasterize(&layout.strip, self.geometry.scale)
            .map_err(|e| raster_err(e.to_string()))?;
        let columns = strip.width();
        if columns == 0 || strip.height() == 0 {
            return Err(raster_err(format!(
                "empty {}x{} pixel buffer",
                strip.width(),
                strip.height()
            )));
        }

        for x in 0..columns {
            let color = sample_column(&strip, x)
                .ok_or_else(|| raster_err(format!("column {x} outside strip")))?;
            let rect = column_rect(&layout.watermark, x, columns);
            canvas
                .fill_rect(&rect, color, self.geometry.outline_width)
                .map_err(|e| Error::Draw {
                    page: page_number,
                    reason: e.to_string(),
                })?;
        }

        debug!(page = page_number, width, height, columns, "covered watermark");
        Ok(())
    }

    /// Process a single document file: load, clean, save.
    ///
    /// Returns a [`ProcessResult`] indicating success or failure.
    #[must_use]
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        opts: &ProcessOptions,
    ) -> ProcessResult {
        let mut result = ProcessResult {
            path: input.to_path_buf(),
            success: false,
            pages_processed: 0,
            message: String::new(),
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match self.remove_pages(input, output, opts.pages.as_deref()) {
            Ok(report) => {
                result.success = true;
                result.pages_processed = report.pages_processed;
                result.message =
                    format!("Watermark removed from {} page(s)", report.pages_processed);
            }
            Err(e) => {
                result.message = e.to_string();
            }
        }

        result
    }

    /// Process all PDF documents in a directory, in file name order.
    ///
    /// Documents are handled one after another since a single loader may
    /// wrap a native library that is not safe to call from multiple threads.
    #[must_use]
    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        opts: &ProcessOptions,
    ) -> Vec<ProcessResult> {
        let inputs = match collect_documents(input_dir) {
            Ok(inputs) => inputs,
            Err(e) => {
                return vec![ProcessResult {
                    path: input_dir.to_path_buf(),
                    success: false,
                    pages_processed: 0,
                    message: format!("Failed to read directory: {e}"),
                }];
            }
        };

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                return vec![ProcessResult {
                    path: output_dir.to_path_buf(),
                    success: false,
                    pages_processed: 0,
                    message: format!("Failed to create output directory: {e}"),
                }];
            }
        }

        inputs
            .iter()
            .filter_map(|input| {
                let filename = input.file_name()?;
                Some(self.process_file(input, &output_dir.join(filename), opts))
            })
            .collect()
    }
}

/// List the PDF documents directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be read.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && is_supported_document(&entry.path()) {
            documents.push(entry.path());
        }
    }
    documents.sort();
    Ok(documents)
}

/// Write `bytes` to `path` through a sibling temporary file.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let output_err = |source: std::io::Error| Error::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(output_err)?;
    file.write_all(bytes).map_err(output_err)?;
    file.as_file().sync_all().map_err(output_err)?;
    file.persist(path).map_err(|e| output_err(e.error))?;
    Ok(())
}

/// Check if a file has a supported document extension.
#[must_use]
pub fn is_supported_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Generate a default output path from an input path.
///
/// Example: `"deck.pdf"` becomes `"deck_cleaned.pdf"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input.extension().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_cleaned.{ext}"))
}
