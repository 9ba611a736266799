//! Plotmeter: turn annotated plot images into numbers.
//!
//! Plotmeter reads the points and lines drawn over a plot image with an
//! annotation tool. Some of those lines are calibrations, recognised by their
//! name:
//!
//! - `X: 0 100` or `Y: 1 1e4 L` defines an **axis** (linear, or log with `L`).
//!   `extract` projects every point onto every axis to recover data values.
//! - `mm: 25` defines a **scale** of known physical length. `measure`
//!   converts the pixel length of every line into physical units.
//!
//! Results are written as CSV, one column per calibration.
//!
//! # Modules
//!
//! - [`ir`]: Annotation types and the JSON reader
//! - [`calibration`]: Directive parsing, axes and scales
//! - [`extract`]: Point projection onto axes
//! - [`measure`]: Line measurement with scales
//! - [`export`]: Column sets and the CSV writer
//! - [`inspect`]: Human-readable summary of an annotation file
//! - [`error`]: Error types for plotmeter operations

pub mod calibration;
pub mod error;
pub mod export;
pub mod extract;
pub mod inspect;
pub mod ir;
pub mod measure;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use calibration::NameMatch;
pub use error::PlotmeterError;

/// The plotmeter CLI application.
#[derive(Parser)]
#[command(name = "plotmeter")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Project annotated points onto the calibrated axes.
    Extract(ExtractArgs),
    /// Measure annotated lines with the calibrated scales.
    Measure(MeasureArgs),
    /// Summarise an annotation file and the calibrations it defines.
    Inspect(InspectArgs),
}

/// Arguments shared by the extract and measure subcommands.
#[derive(clap::Args)]
struct PipelineArgs {
    /// Annotation JSON file exported by the annotation tool.
    input: PathBuf,

    /// Only use annotations with this tag (default: all).
    #[arg(long)]
    tag: Option<String>,

    /// Output CSV file ('-' for stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How calibration directives must match line names.
    #[arg(long, value_enum, default_value_t = NameMatch::Strict, env = "PLOTMETER_NAME_MATCH")]
    name_match: NameMatch,
}

/// Arguments for the extract subcommand.
#[derive(clap::Args)]
struct ExtractArgs {
    #[command(flatten)]
    common: PipelineArgs,
}

/// Arguments for the measure subcommand.
#[derive(clap::Args)]
struct MeasureArgs {
    #[command(flatten)]
    common: PipelineArgs,

    /// Do not measure the scale reference lines themselves.
    #[arg(long)]
    skip_scale_lines: bool,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Annotation JSON file to inspect.
    input: PathBuf,

    /// How calibration directives must match line names.
    #[arg(long, value_enum, default_value_t = NameMatch::Strict, env = "PLOTMETER_NAME_MATCH")]
    name_match: NameMatch,
}

/// Run the plotmeter CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PlotmeterError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extract(args)) => run_extract(args),
        Some(Commands::Measure(args)) => run_measure(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("plotmeter {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Turn annotated plot images into calibrated numeric data.");
            println!();
            println!("Run 'plotmeter --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the extract subcommand.
fn run_extract(args: ExtractArgs) -> Result<(), PlotmeterError> {
    let PipelineArgs {
        input,
        tag,
        output,
        name_match,
    } = args.common;

    let set = ir::io_json::read_annotations_json(&input)?;
    tracing::info!(path = %input.display(), annotations = set.len(), "loaded annotations");

    let opts = extract::ExtractOptions { tag, name_match };
    let columns = extract::extract(&set, &opts)?;

    let writer = open_output(output.as_deref())?;
    export::write_columns_csv(writer, &columns)
}

/// Execute the measure subcommand.
fn run_measure(args: MeasureArgs) -> Result<(), PlotmeterError> {
    let PipelineArgs {
        input,
        tag,
        output,
        name_match,
    } = args.common;

    let set = ir::io_json::read_annotations_json(&input)?;
    tracing::info!(path = %input.display(), annotations = set.len(), "loaded annotations");

    let opts = measure::MeasureOptions {
        tag,
        name_match,
        skip_scale_lines: args.skip_scale_lines,
    };
    let measurements = measure::measure(&set, &opts)?;

    let writer = open_output(output.as_deref())?;
    export::write_measurements_csv(writer, &measurements)
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), PlotmeterError> {
    let set = ir::io_json::read_annotations_json(&args.input)?;

    let opts = inspect::InspectOptions {
        name_match: args.name_match,
    };
    let report = inspect::inspect_annotations(&set, &opts);
    print!("{}", report);
    Ok(())
}

/// Opens the CSV destination. `None` and `-` both mean stdout.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, PlotmeterError> {
    match path {
        None => Ok(Box::new(io::stdout().lock())),
        Some(p) if p == Path::new("-") => Ok(Box::new(io::stdout().lock())),
        Some(p) => {
            let file = File::create(p).map_err(PlotmeterError::Io)?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}
