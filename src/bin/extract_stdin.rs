//! Read a product page from stdin and print the extracted record as JSON.
//!
//! ```text
//! curl -s https://shop.example.com/p/1 | extract_stdin --url https://shop.example.com/p/1
//! ```

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use product_extract::{extract_bytes_with_options, Options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "extract_stdin", about = "Extract product data from HTML on stdin")]
struct Args {
    /// URL the markup was fetched from; base for relative image URLs
    #[arg(long)]
    url: String,

    /// Maximum number of images to keep (clamped to 1-50)
    #[arg(long)]
    max_images: Option<i64>,

    /// JSON options file (taxonomy, image rules, thresholds)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every extraction step
    #[arg(long)]
    debug: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_logging(debug: bool) {
    let level = if debug { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn load_options(args: &Args) -> product_extract::Result<Options> {
    let mut options = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| product_extract::Error::Config(format!("{}: {e}", path.display())))?;
            Options::from_json(&json)?
        }
        None => Options::default(),
    };
    if let Some(max) = args.max_images {
        options = options.with_max_images(max);
    }
    options.debug |= args.debug;
    Ok(options)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    let mut markup = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut markup) {
        tracing::error!(error = %e, "failed to read stdin");
        return ExitCode::FAILURE;
    }

    let record = load_options(&args).and_then(|options| extract_bytes_with_options(&markup, &args.url, &options));
    let record = match record {
        Ok(record) => record,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&record)
    } else {
        serde_json::to_string(&record)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
