//! Remove the NotebookLM watermark from exported PDF slide decks.
//!
//! NotebookLM stamps a small mark into the bottom-right corner of every page
//! it exports. This crate covers that region with a stack of thin opaque
//! rectangles whose colors are sampled, column by column, from a background
//! strip just above the mark. Gradient backgrounds survive because every
//! column gets its own color.
//!
//! Page count and page dimensions are never changed.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use notebooklm_watermark_removal::WatermarkRemover;
//!
//! let remover = WatermarkRemover::with_pdfium().expect("libpdfium not found");
//! let report = remover
//!     .remove(Path::new("deck.pdf"), Path::new("deck_cleaned.pdf"))
//!     .unwrap();
//! println!("cleaned {} pages", report.pages_processed);
//! ```
//!
//! # Backends
//!
//! The algorithm only needs page sizes, clipped rasterization and rectangle
//! drawing, expressed by the traits in [`backend`]. The `pdfium` feature
//! (enabled by default) provides [`PdfiumBackend`], which requires the
//! PDFium shared library at runtime.

#![deny(missing_docs)]

pub mod backend;
mod engine;
pub mod error;
pub mod geometry;
pub mod page_range;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod sampling;

pub use engine::{
    collect_documents, default_output_path, is_supported_document, ProcessOptions, ProcessResult,
    RemovalReport, WatermarkRemover,
};
pub use error::{Error, Result};
pub use geometry::{PageFrame, PageLayout, PageRotation, Rect, UserRect, WatermarkGeometry};
pub use page_range::parse_page_range;
#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumBackend;
pub use sampling::SampledColor;
