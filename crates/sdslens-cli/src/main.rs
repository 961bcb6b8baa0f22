//! sdslens CLI
//!
//! - `sdslens extract`: decode records, buckets and relations from RDF files
//!   and print one JSON report per file.
//! - `sdslens shapes`: compile a shape document and describe it.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use sdslens_extract::{shapes, Extractor};
use sdslens_ingest::RdfFormat;
use sdslens_model::Vocabulary;
use sdslens_shapes::ShapeRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

mod report;

use report::{FileReport, Section};

#[derive(Parser)]
#[command(name = "sdslens")]
#[command(
    author,
    version,
    about = "Decode SDS stream descriptions (records, buckets, relations) from RDF"
)]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract SDS descriptions from one or more RDF files.
    ///
    /// Prints a JSON report per file on stdout; subjects that do not fit
    /// their shape are listed under `skipped`.
    Extract {
        /// Input files (format inferred from the extension unless --format is given)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Input syntax: trig, nquads, turtle, ntriples, rdfxml
        #[arg(long)]
        format: Option<RdfFormat>,
        /// Turtle shape document replacing the built-in shapes
        #[arg(long)]
        shapes: Option<PathBuf>,
        /// JSON vocabulary overrides (graph markers, payload predicate, type markers)
        #[arg(long)]
        vocab: Option<PathBuf>,
        /// Only report one section
        #[arg(long, value_enum)]
        only: Option<Section>,
    },

    /// Compile a shape document and print its shapes.
    Shapes {
        /// Turtle shape document (default: built-in shapes)
        #[arg(long)]
        shapes: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Extract {
            files,
            format,
            shapes,
            vocab,
            only,
        } => cmd_extract(&files, format, shapes.as_deref(), vocab.as_deref(), only),
        Commands::Shapes { shapes } => cmd_shapes(shapes.as_deref()),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| anyhow!("failed to read {}: {e}", path.display()))
}

fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    let Some(path) = path else {
        return Ok(Vocabulary::default());
    };
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|e| anyhow!("invalid vocabulary file {}: {e}", path.display()))
}

fn load_shapes(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_text(path),
        None => Ok(shapes::SHAPES.to_string()),
    }
}

fn cmd_extract(
    files: &[PathBuf],
    format: Option<RdfFormat>,
    shapes_path: Option<&Path>,
    vocab_path: Option<&Path>,
    only: Option<Section>,
) -> Result<()> {
    let shapes_ttl = load_shapes(shapes_path)?;
    let vocab = load_vocabulary(vocab_path)?;
    let extractor = Extractor::with_config(&shapes_ttl, vocab)?;

    let reports = files
        .par_iter()
        .map(|path| extract_file(&extractor, path, format, only))
        .collect::<Result<Vec<_>>>()?;

    for report in &reports {
        println!("{}", serde_json::to_string_pretty(report)?);
        let status = if report.skipped.is_empty() {
            "ok".green().bold()
        } else {
            "partial".yellow().bold()
        };
        eprintln!(
            "{} {}: {} decoded, {} skipped, {} data quads",
            status,
            report.file.bold(),
            report.decoded(),
            report.skipped.len(),
            report.data_quads
        );
    }
    Ok(())
}

fn extract_file(
    extractor: &Extractor,
    path: &Path,
    format: Option<RdfFormat>,
    only: Option<Section>,
) -> Result<FileReport> {
    let format = match format {
        Some(format) => format,
        None => RdfFormat::from_path(path)?,
    };
    let quads = sdslens_ingest::parse_file(path, Some(format))?;
    tracing::debug!(file = %path.display(), quads = quads.len(), %format, "parsed input");

    let extract = extractor.extract_quads(quads);
    Ok(FileReport::build(path.display().to_string(), &extract, only))
}

fn cmd_shapes(shapes_path: Option<&Path>) -> Result<()> {
    let shapes_ttl = load_shapes(shapes_path)?;
    let registry = ShapeRegistry::from_turtle(&shapes_ttl)?;

    println!("{} {} shape(s)", "Compiled".green().bold(), registry.len());
    for shape in registry.iter() {
        println!();
        println!("{} ({})", shape.name.bold(), shape.target_class);
        for property in &shape.properties {
            println!(
                "  {:<16} {:<40} {:<16} [{}]",
                property.name,
                property.path.to_string(),
                property.kind.to_string(),
                property.cardinality
            );
        }
    }
    Ok(())
}
