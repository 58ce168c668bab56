//! Fetch a product page and print the extracted record as JSON.
//!
//! With `--check-images` every ranked image is also downloaded and validated
//! the way an import would, and a summary is logged.

use std::process::ExitCode;

use clap::Parser;
use product_extract::fetch::{HttpFetcher, ImageDownloader};
use product_extract::import::{looks_like_image, validate_image, Importer};
use product_extract::{ImportSettings, Options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "import_url", about = "Fetch a product page and extract its data")]
struct Args {
    /// Product page URL
    url: String,

    /// Maximum number of images to keep (clamped to 1-50)
    #[arg(long, default_value_t = 20)]
    max_images: i64,

    /// Download and validate each ranked image
    #[arg(long)]
    check_images: bool,

    /// Log every extraction step
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = Options {
        debug: args.debug,
        ..Options::default()
    }
    .with_max_images(args.max_images);

    let fetcher = HttpFetcher::new()?;
    let importer = Importer::new(fetcher.clone(), fetcher.clone()).with_options(options);
    let record = importer.fetch_record(&args.url)?;

    if args.check_images {
        let min = ImportSettings::default().min_image_dimension;
        let usable = record
            .images
            .iter()
            .filter(|url| looks_like_image(url))
            .filter(|url| match fetcher.download(url) {
                Ok(bytes) => match validate_image(url, bytes, min) {
                    Ok(image) => {
                        tracing::info!(url = %url, width = image.width, height = image.height, "image ok");
                        true
                    }
                    Err(reason) => {
                        tracing::warn!(url = %url, %reason, "image rejected");
                        false
                    }
                },
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "download failed");
                    false
                }
            })
            .count();
        tracing::info!(found = record.images.len(), usable, "image check complete");
    }

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
