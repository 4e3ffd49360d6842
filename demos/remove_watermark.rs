//! Remove the NotebookLM watermark from a single PDF.
//!
//! Usage:
//! ```sh
//! cargo run --example remove_watermark -- input.pdf output.pdf
//! ```

use std::env;
use std::path::Path;
use std::process;

use notebooklm_watermark_removal::WatermarkRemover;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output>", args[0]);
        process::exit(1);
    }

    let remover = WatermarkRemover::with_pdfium().expect("failed to load PDFium");
    match remover.remove(Path::new(&args[1]), Path::new(&args[2])) {
        Ok(report) => println!("Done: {} pages processed", report.pages_processed),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
