//! Batch conversion of files in place
//!
//! Each file is read, converted and written back by one rayon worker. A
//! failing file is logged and recorded in the report; the others carry on.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::config::{BatchSettings, ResolvedOptions};
use crate::errors::{RelaxdecorError, Result};
use crate::features::conversion::ConvertSourceUseCase;
use crate::features::parsing::{Parser, TreeSitterParser};

use super::bom::split_bom;

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Converted text differed and was written back
    Rewritten,
    /// Nothing to rewrite; file left alone
    Unchanged,
    /// Dry run: the file was only listed
    Skipped,
}

/// Per-file results of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rewritten: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, RelaxdecorError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Files that went through conversion without error
    pub fn converted(&self) -> usize {
        self.rewritten.len() + self.unchanged.len()
    }

    fn record(&mut self, path: PathBuf, outcome: Result<FileOutcome>) {
        match outcome {
            Ok(FileOutcome::Rewritten) => self.rewritten.push(path),
            Ok(FileOutcome::Unchanged) => self.unchanged.push(path),
            Ok(FileOutcome::Skipped) => self.skipped.push(path),
            Err(e) => self.failed.push((path, e)),
        }
    }
}

/// Converts files in place on a dedicated thread pool
pub struct BatchRunner<P: Parser> {
    use_case: ConvertSourceUseCase<P>,
    settings: BatchSettings,
    options: ResolvedOptions,
}

impl BatchRunner<TreeSitterParser> {
    pub fn new(settings: BatchSettings, options: ResolvedOptions) -> Self {
        Self::with_parser(TreeSitterParser::python(), settings, options)
    }
}

impl<P: Parser> BatchRunner<P> {
    pub fn with_parser(parser: P, settings: BatchSettings, options: ResolvedOptions) -> Self {
        Self {
            use_case: ConvertSourceUseCase::new(parser),
            settings,
            options,
        }
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Convert every file in `files`
    ///
    /// Only a pool start-up failure is returned as an error; per-file
    /// failures end up in the report.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.concurrency)
            .build()?;

        let outcomes: Vec<_> = pool.install(|| {
            files
                .par_iter()
                .map(|path| (path.clone(), self.convert_file(path)))
                .collect()
        });

        let mut report = BatchReport::default();
        for (path, outcome) in outcomes {
            if let Err(e) = &outcome {
                if e.is_user_error() {
                    warn!("Failed to convert {}: {}", path.display(), e);
                } else {
                    error!("Failed to convert {}: {}", path.display(), e);
                }
            }
            report.record(path, outcome);
        }

        info!(
            rewritten = report.rewritten.len(),
            unchanged = report.unchanged.len(),
            failed = report.failed.len(),
            "Batch finished"
        );
        Ok(report)
    }

    /// Convert one file in place
    pub fn convert_file(&self, path: &Path) -> Result<FileOutcome> {
        info!("Now converting: {}", path.display());
        if self.settings.dry_run {
            return Ok(FileOutcome::Skipped);
        }

        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| RelaxdecorError::Encoding {
            path: path.to_path_buf(),
        })?;
        let (bom, source) = split_bom(&text);

        let filename = path.display().to_string();
        let converted = self
            .use_case
            .execute_with_options(source, Some(&filename), &self.options)?;
        if converted == source {
            return Ok(FileOutcome::Unchanged);
        }

        let mut out = String::with_capacity(bom.len() + converted.len());
        out.push_str(bom);
        out.push_str(&converted);
        fs::write(path, out)?;
        Ok(FileOutcome::Rewritten)
    }
}
