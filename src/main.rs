//! screen-locate - find a word or phrase in an OCR result
//!
//! Reads an OCR result as JSON and prints where the target appears, nearest
//! to a reference point first.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use screen_locate::config::{self, LocatorConfig};
use screen_locate::{Anchor, OcrResult, Point, ScreenContents};

/// Locate a word or phrase in OCR output
#[derive(Parser, Debug)]
#[command(name = "screen-locate")]
#[command(about = "Find a word or phrase in an OCR result, tolerant of OCR errors")]
struct Args {
    /// Word or phrase to find
    target: String,

    /// OCR result as JSON ("-" reads standard input)
    #[arg(short, long, default_value = "-")]
    result: PathBuf,

    /// Reference point X; the nearest match wins
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    x: i32,

    /// Reference point Y
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    y: i32,

    /// Print a cursor point instead of word boxes: before, middle, or after
    #[arg(short, long)]
    anchor: Option<String>,

    /// Override the confidence threshold
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Configuration file (defaults to the per-user config if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the OCR text before searching
    #[arg(long)]
    print_text: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG takes precedence
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse the anchor before doing any work
    let anchor = args
        .anchor
        .as_deref()
        .map(str::parse::<Anchor>)
        .transpose()?;

    let mut config = load_or_default_config(args.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config.matching.confidence_threshold = threshold;
    }
    let matcher = config.matcher()?;

    let result = read_result(&args.result)?;
    info!(
        "Searching {} lines, {} words for {:?}",
        result.lines.len(),
        result.word_count(),
        args.target
    );

    let contents = ScreenContents::new(result, Point::new(args.x, args.y), matcher);
    if args.print_text {
        print!("{}", contents.as_string());
    }

    let found = match anchor {
        Some(anchor) => match contents.find_nearest_word_coordinates(&args.target, anchor)? {
            Some(point) => {
                println!("{}", serde_json::to_string(&point)?);
                true
            }
            None => false,
        },
        None => match contents.find_nearest_words(&args.target)? {
            Some(words) => {
                println!("{}", serde_json::to_string_pretty(&words)?);
                true
            }
            None => false,
        },
    };

    if found {
        Ok(ExitCode::SUCCESS)
    } else {
        info!("No match for {:?}", args.target);
        Ok(ExitCode::FAILURE)
    }
}

/// Load the given config, the per-user config if present, or defaults
fn load_or_default_config(path: Option<&Path>) -> Result<LocatorConfig> {
    if let Some(path) = path {
        return config::load_config(path);
    }
    if let Ok(config_path) = config::default_config_path() {
        if config_path.exists() {
            return config::load_config(&config_path);
        }
    }
    info!("Using default configuration");
    Ok(LocatorConfig::default())
}

/// Read an OCR result from a JSON file or standard input
fn read_result(path: &Path) -> Result<OcrResult> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read OCR result from stdin")?;
        content
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read OCR result {:?}", path))?
    };

    serde_json::from_str(&content).context("Failed to parse OCR result JSON")
}
