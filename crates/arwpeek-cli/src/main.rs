//! arwpeek - extract the embedded JPEG preview from Sony ARW files.
//!
//! This binary parses the container, reports where the preview lives and
//! what it decodes to, and optionally writes the JPEG stream out.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arwpeek_core::PreviewTask;

/// Extract the embedded JPEG preview from a Sony ARW file.
///
/// Parses the ARW container, locates the preview image and decodes it.
/// The raw JPEG stream can be written out with --output.
#[derive(Parser, Debug, Clone)]
#[command(name = "arwpeek")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the .ARW file to inspect.
    file: Option<PathBuf>,

    /// Write the extracted preview JPEG to this path.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // No input file is not an error: print the usage text and leave quietly.
    let Some(file) = args.file else {
        let mut cmd = Args::command();
        let _ = cmd.print_help();
        return ExitCode::SUCCESS;
    };

    init_logging(args.verbose);
    debug!("Loading preview from {}", file.display());

    let task = PreviewTask::spawn(file.clone());
    let loaded = match task.wait() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", file.display());
    println!(
        "  preview: {} bytes at offset {}",
        loaded.location.length, loaded.location.offset
    );
    println!(
        "  decoded: {}x{} px, orientation {:?}",
        loaded.image.width, loaded.image.height, loaded.orientation
    );

    if let Some(ref output) = args.output {
        if let Err(e) = fs::write(output, &loaded.jpeg) {
            eprintln!("error: failed to write {}: {}", output.display(), e);
            return ExitCode::FAILURE;
        }
        println!("  saved: {}", output.display());
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "arwpeek=debug,arwpeek_core=debug"
    } else {
        "arwpeek=info,arwpeek_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
