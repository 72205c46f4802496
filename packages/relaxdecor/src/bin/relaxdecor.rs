//! relaxdecor CLI
//!
//! # Usage
//!
//! ```bash
//! # Convert a source tree in place
//! relaxdecor src/
//!
//! # Print the converted form of one file (or stdin) without touching it
//! relaxdecor --simple app.py
//! cat app.py | relaxdecor -s
//!
//! # List what would be converted
//! relaxdecor --dry-run -C 4 src/ tools/
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use relaxdecor::config::{
    BatchOptions, ConvertOptions, Indentation, Linesep, ResolvedOptions, SourceVersion,
};
use relaxdecor::features::batch::split_bom;
use relaxdecor::{discover_files, BatchRunner};

/// Log filter override, e.g. `RELAXDECOR_LOG=relaxdecor=debug`
const LOG_ENV: &str = "RELAXDECOR_LOG";
const STDIN_MARKER: &str = "-";

#[derive(Parser)]
#[command(name = "relaxdecor", version)]
#[command(about = "Back-port Python 3.9 relaxed decorator expressions", long_about = None)]
struct Cli {
    /// Python files or directories to convert in place
    files: Vec<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Number of worker threads (default: CPU count)
    #[arg(short = 'C', long, value_name = "N")]
    concurrency: Option<usize>,

    /// List the files that would be converted without changing them
    #[arg(long)]
    dry_run: bool,

    /// Convert one file, or stdin when none is given, and print the result
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = STDIN_MARKER,
        conflicts_with = "files"
    )]
    simple: Option<PathBuf>,

    /// Python version the source is written for
    #[arg(long, visible_alias = "from-version", value_name = "VERSION")]
    source_version: Option<SourceVersion>,

    /// Line separator: LF, CRLF or CR (default: detected)
    #[arg(short, long)]
    linesep: Option<Linesep>,

    /// Indentation: number of spaces or `t` for tab (default: detected)
    #[arg(short = 't', long)]
    indentation: Option<Indentation>,

    /// Do not add PEP 8 blank lines around the helper
    #[arg(long)]
    no_pep8: bool,

    /// Name of the inserted helper function
    #[arg(short = 'd', long = "decorator-name", value_name = "NAME")]
    decorator_name: Option<String>,
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            source_version: self.source_version,
            linesep: self.linesep,
            indentation: self.indentation.clone(),
            pep8: self.no_pep8.then_some(false),
            decorator: self.decorator_name.clone(),
        }
    }

    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            quiet: self.quiet,
            concurrency: self.concurrency,
            dry_run: self.dry_run,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = cli.batch_options().resolve();
    let quiet = settings.as_ref().map_or(cli.quiet, |s| s.quiet);
    init_tracing(quiet);

    let result = settings
        .context("invalid batch options")
        .and_then(|settings| {
            let options = cli
                .convert_options()
                .resolve()
                .context("invalid conversion options")?;

            match &cli.simple {
                Some(path) => run_simple(path, &options),
                None => {
                    let runner = BatchRunner::new(settings, options);
                    run_batch(&runner, &cli.files)
                }
            }
        });

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run_simple(path: &Path, options: &ResolvedOptions) -> Result<ExitCode> {
    let (source, filename) = if path.as_os_str() == STDIN_MARKER {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        (source, None)
    } else {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        (source, Some(path.display().to_string()))
    };

    let (bom, body) = split_bom(&source);
    let converted = relaxdecor::convert_with_options(body, filename.as_deref(), options)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(bom.as_bytes())?;
    stdout.write_all(converted.as_bytes())?;
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn run_batch(runner: &BatchRunner<relaxdecor::TreeSitterParser>, paths: &[PathBuf]) -> Result<ExitCode> {
    let files = discover_files(paths);
    if files.is_empty() {
        error!("No Python files found");
        return Ok(ExitCode::FAILURE);
    }

    info!(
        files = files.len(),
        workers = runner.settings().concurrency,
        "Starting conversion"
    );
    let report = runner.run(&files)?;

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            "{} of {} files failed",
            report.failed.len(),
            files.len()
        );
        Ok(ExitCode::FAILURE)
    }
}
