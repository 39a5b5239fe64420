//! concur - Derive training readiness from contributor annotations
//!
//! Reads image snapshots exported by the project service as JSON and prints
//! the status the consensus engine derives for each image, or compares two
//! annotation sets region by region.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use concur_core::{
    Annotation, ConsensusParams, Image, ImageRecord, ImageStatus, RegionParams, ValidationError,
    compare_regions, recompute_statuses,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Derive image statuses from independent taggers' annotations.
#[derive(Parser, Debug)]
#[command(name = "concur")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use debug logging level
    #[arg(short = 'd', long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    /// TOML file with [consensus] and [regions] tables
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Similarity threshold, overriding the configured one for the command
    #[arg(short = 't', long, global = true)]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the status of every image in a JSON file of image records
    Status {
        /// JSON file holding one image record or an array of them
        file: PathBuf,
    },
    /// Compare two annotation sets in both directions
    Compare {
        /// JSON file holding {"left": [...], "right": [...]}
        file: PathBuf,
    },
}

/// Thresholds loaded from `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    consensus: ConsensusParams,
    regions: RegionParams,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusInput {
    Many(Vec<ImageRecord>),
    One(ImageRecord),
}

#[derive(Deserialize)]
struct CompareInput {
    left: Vec<Annotation>,
    right: Vec<Annotation>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug {
        "concur=debug,concur_core=debug"
    } else {
        "concur=info,concur_core=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Returns false if any image was rejected.
fn run(args: Args) -> Result<bool> {
    let mut settings = load_settings(args.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let ok = match args.command {
        Command::Status { file } => {
            if let Some(t) = args.threshold {
                settings.consensus = ConsensusParams::new(t)?;
            }
            let input: StatusInput = read_json(&file)?;
            let records = match input {
                StatusInput::Many(records) => records,
                StatusInput::One(record) => vec![record],
            };
            let lines = derive_statuses(records, &settings.consensus);
            let ok = lines.iter().all(|l| l.get("error").is_none());
            for line in &lines {
                writeln!(out, "{line}")?;
            }
            ok
        }
        Command::Compare { file } => {
            if let Some(t) = args.threshold {
                settings.regions = RegionParams::new(t)?;
            }
            let input: CompareInput = read_json(&file)?;
            let report = compare_regions(&input.left, &input.right, &settings.regions)?;
            info!(
                unanimous = report.is_unanimous(),
                ratio = report.agreement_ratio(),
                "compared regions"
            );
            let value = json!({
                "unanimous": report.is_unanimous(),
                "agreementRatio": report.agreement_ratio(),
                "report": report,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            true
        }
    };

    out.flush()?;
    Ok(ok)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// One output line per record, in input order.
fn derive_statuses(records: Vec<ImageRecord>, params: &ConsensusParams) -> Vec<Value> {
    let mut lines: Vec<Option<Value>> = vec![None; records.len()];
    let mut images = Vec::with_capacity(records.len());
    let mut slots = Vec::with_capacity(records.len());

    for (i, record) in records.into_iter().enumerate() {
        let image_id = record.image_id.clone();
        match Image::try_from(record) {
            Ok(image) => {
                slots.push(i);
                images.push(image);
            }
            Err(e) => lines[i] = Some(error_line(&image_id, &e)),
        }
    }

    for (slot, result) in slots.into_iter().zip(recompute_statuses(&images, params)) {
        lines[slot] = Some(status_line(&result));
    }
    lines.into_iter().flatten().collect()
}

fn status_line(result: &ImageStatus) -> Value {
    match &result.status {
        Ok(status) => json!({ "imageId": result.image_id, "status": status }),
        Err(e) => error_line(&result.image_id, e),
    }
}

fn error_line(image_id: &str, err: &ValidationError) -> Value {
    error!(image_id, field = err.field(), "{err}");
    json!({ "imageId": image_id, "error": err.to_string(), "field": err.field() })
}
