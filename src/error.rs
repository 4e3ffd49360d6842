//! Error types for the notebooklm-watermark-removal crate.

use std::path::PathBuf;

/// Errors that can occur while removing the watermark from a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source document is missing, unreadable, or not a valid document.
    #[error("failed to open {}: {reason}", path.display())]
    Input {
        /// Path of the source document.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// The sampling strip of a page could not be rasterized.
    #[error("failed to rasterize sampling strip on page {page}: {reason}")]
    Rasterization {
        /// 1-based page number.
        page: usize,
        /// Backend-provided reason.
        reason: String,
    },

    /// A cover rectangle could not be drawn onto a page.
    #[error("failed to draw cover on page {page}: {reason}")]
    Draw {
        /// 1-based page number.
        page: usize,
        /// Backend-provided reason.
        reason: String,
    },

    /// The destination document could not be serialized or written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The native rendering backend is unavailable or rejected a call.
    #[error("PDF backend error: {0}")]
    Backend(String),

    /// A page-range expression could not be parsed.
    #[error("invalid page range: {0}")]
    InvalidPageRange(String),

    /// A directory or one of its entries could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let input = Error::Input {
            path: PathBuf::from("/tmp/missing.pdf"),
            reason: "not found".to_string(),
        };
        let msg = input.to_string();
        assert!(msg.contains("/tmp/missing.pdf"));
        assert!(msg.contains("not found"));

        let raster = Error::Rasterization {
            page: 3,
            reason: "empty clip".to_string(),
        };
        assert!(raster.to_string().contains("page 3"));

        let output = Error::Output {
            path: PathBuf::from("out.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = output.to_string();
        assert!(msg.contains("out.pdf"));
        assert!(msg.contains("denied"));

        let range = Error::InvalidPageRange("\"x-2\"".to_string());
        assert!(range.to_string().contains("x-2"));
    }
}
