use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use img_inspect::{report, scan};

#[derive(Parser, Debug)]
#[command(
    name = "img-inspect",
    version,
    about = "Inspect image files and report file attributes, EXIF fields, and GPS position"
)]
struct Cli {
    /// Image files or directories to inspect
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    let images = scan::collect_images(&cli.paths);
    if images.is_empty() {
        anyhow::bail!("No image files found in the specified paths.");
    }

    log::info!("Found {} image(s) to inspect", images.len());

    let total = images.len();
    let mut reports = Vec::new();

    for (i, image_path) in images.iter().enumerate() {
        log::debug!("[{}/{}] Inspecting: {}", i + 1, total, image_path.display());
        reports.push(report::build_report(image_path));
    }

    if cli.json {
        let json_results: Vec<serde_json::Value> = reports
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "attributes": r.attrs.as_ref().ok(),
                    "attributes_error": r.attrs.as_ref().err().map(|e| format!("{e:#}")),
                    "exif": r.exif.as_ref().ok(),
                    "exif_error": r.exif.as_ref().err().map(|e| format!("{e:#}")),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else {
        for (i, r) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", r.render());
        }
    }

    let with_exif = reports.iter().filter(|r| r.exif.is_ok()).count();
    log::info!("Done: {with_exif} of {total} image(s) carried EXIF data");

    Ok(())
}
