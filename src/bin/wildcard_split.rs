//! wildcard-split: Flatten a nested key/list file into one text file per list
//!
//! Usage:
//!   # Write colors_warm.txt, colors_cold.txt, ... into ./out
//!   wildcard-split wildcards.yaml --output-dir ./out
//!
//!   # Show what would be written without touching the disk
//!   wildcard-split wildcards.yaml --dry-run
//!
//!   # Machine-readable summary
//!   wildcard-split wildcards.yaml -o ./out --json

// Use MiMalloc allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use wildcard_split::{flatten_reader, split_file, SplitConfig, SplitError, SplitReport, WriteOutcome};

#[derive(Parser, Debug)]
#[command(name = "wildcard-split")]
#[command(about = "Split nested key/list text into one file per list", long_about = None)]
struct Args {
    /// Source file (.yaml or .txt)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Folder where result files are created
    #[arg(long, short = 'o', required_unless_present = "dry_run")]
    output_dir: Option<PathBuf>,

    /// Create the output folder if it does not exist
    #[arg(long)]
    create_dir: bool,

    /// Print the lists that would be written instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Print the write report as JSON
    #[arg(long)]
    json: bool,

    /// Separator between nested key names (default: "_")
    #[arg(long)]
    separator: Option<String>,

    /// Extension of result files (default: ".txt")
    #[arg(long)]
    extension: Option<String>,

    /// Spaces per nesting level (default: 4)
    #[arg(long)]
    indent_width: Option<usize>,

    /// Number of writer threads (default: one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Log every list and file
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    // Build config
    let mut config = SplitConfig::default();
    if let Some(sep) = args.separator.clone() {
        config.separator = sep;
    }
    if let Some(ext) = args.extension.clone() {
        config.extension = if ext.is_empty() || ext.starts_with('.') {
            ext
        } else {
            format!(".{}", ext)
        };
    }
    if let Some(width) = args.indent_width {
        config.indent_width = width;
    }
    config.workers = args.workers;

    if args.dry_run {
        return print_dry_run(&args, &config);
    }

    let Some(output_dir) = args.output_dir.as_ref() else {
        bail!("--output-dir is required unless --dry-run is given");
    };
    if args.create_dir {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    }

    let report = match split_file(&args.input, output_dir, &config) {
        Ok(report) => report,
        Err(e @ SplitError::SourceUnreadable { .. }) => return Err(e.into()),
        Err(e) => return Err(e).context("Conversion aborted"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Print each list the way it would be written, without creating files
fn print_dry_run(args: &Args, config: &SplitConfig) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("Can't open file: {}", args.input.display()))?;
    let artifacts = flatten_reader(BufReader::new(file), config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        return Ok(());
    }

    for artifact in &artifacts {
        println!("File name will be: {}{}", artifact.name(), config.extension);
        for line in artifact.lines() {
            println!("\t{}", line);
        }
    }
    println!("{} list(s) found", artifacts.len());
    Ok(())
}

fn print_summary(report: &SplitReport) {
    for record in &report.records {
        match &record.outcome {
            WriteOutcome::Written { lines } => {
                log::info!("Created {} ({} line(s))", record.path.display(), lines)
            }
            WriteOutcome::Skipped => {
                eprintln!("⚠ {} already exists, skipped", record.path.display())
            }
            WriteOutcome::Failed { reason } => {
                eprintln!("✗ {}: {}", record.path.display(), reason)
            }
        }
    }
    println!(
        "Completed: {} written, {} skipped, {} failed",
        report.written(),
        report.skipped(),
        report.failed()
    );
}
