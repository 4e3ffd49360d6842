use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use notebooklm_watermark_removal::{
    default_output_path, ProcessOptions, ProcessResult, WatermarkRemover,
};

#[derive(Parser)]
#[command(
    name = "notebooklm-watermark",
    about = "Remove the NotebookLM watermark from exported PDF slide decks",
    version,
    after_help = "Simple usage: notebooklm-watermark <deck.pdf>  (writes deck_cleaned.pdf)\n\n\
                  NOTE: The watermark position is fixed to NotebookLM's export layout \
                  (bottom-right corner). Requires the PDFium shared library."
)]
struct Cli {
    /// Input PDF file or directory
    #[arg(required_unless_present = "check")]
    input: Option<String>,

    /// Output file or directory (default: {name}_cleaned.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// Pages to clean, e.g. "1-3,7" (default: all)
    #[arg(short, long)]
    pages: Option<String>,

    /// Check that the PDFium library can be loaded, then exit
    #[arg(long)]
    check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(opts: &ProcessOptions) {
    let default_level = if opts.quiet {
        "error"
    } else if opts.verbose {
        "debug"
    } else {
        "info"
    };
    let fallback = format!("notebooklm_watermark_removal={default_level}");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let opts = ProcessOptions {
        pages: cli.pages.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    init_logging(&opts);

    let remover = match WatermarkRemover::with_pdfium() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Fatal: Failed to initialize PDF backend: {e}");
            process::exit(1);
        }
    };

    if cli.check {
        if !opts.quiet {
            eprintln!("PDFium library loaded successfully");
        }
        return;
    }

    let Some(input) = cli.input.as_deref() else {
        eprintln!("Error: Input path is required");
        process::exit(1);
    };
    let input_path = Path::new(input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {input}");
        process::exit(1);
    }

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: notebooklm-watermark <input_dir> -o <output_dir>");
            process::exit(1);
        };
        remover.process_directory(input_path, &output_dir, &opts)
    } else {
        let output_path = match &cli.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![remover.process_file(input_path, &output_path, &opts)]
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;
    let mut page_count = 0usize;

    for r in &results {
        print_result(r, &opts);
        if r.success {
            success_count += 1;
            page_count += r.pages_processed;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count} ({page_count} pages)");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        eprintln!("[OK] {filename} ({} pages)", result.pages_processed);
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose && !result.message.is_empty() {
        eprintln!("  -> {}", result.message);
    }
}
