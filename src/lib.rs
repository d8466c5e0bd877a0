//! dupecheck - content-verified duplicate file finder
//!
//! Walks a directory tree and reports groups of byte-identical files.
//! Candidate pairs are pruned by cheap attribute checks (extension,
//! optionally name, then size) before a chunked byte-for-byte comparison
//! confirms them; no hashing is involved.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = dupecheck::scan(Path::new("/photos"));
//! print!("{}", report.render_text());
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod scanner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use yansi::Paint;

use crate::cli::{Cli, Commands, CompareArgs, InitConfigArgs, ScanArgs};
use crate::config::{Config, ConfigError};
use crate::duplicates::{ContentComparator, DuplicateFinder, DEFAULT_CHUNK_SIZE};
use crate::error::ExitCode;
use crate::progress::{Progress, ProgressCallback};
use crate::prompt::ConsolePrompter;
use crate::report::{Report, ScanSummary};

/// Scan `root` with the default configuration and report its duplicates.
///
/// `root` is assumed to be an existing directory. Unreadable parts of the
/// tree are skipped; the call always returns a report.
#[must_use]
pub fn scan(root: &Path) -> Report {
    DuplicateFinder::with_defaults().scan(root)
}

/// Run the command described by `cli`.
///
/// # Errors
///
/// Returns an error for an invalid scan root ([`duplicates::FinderError`]),
/// a failed prompt, or a report/config file that cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(args) => run_scan(&args, cli.quiet),
        Commands::Compare(args) => Ok(run_compare(&args)),
        Commands::InitConfig(args) => run_init_config(&args),
    }
}

fn run_scan(args: &ScanArgs, quiet: bool) -> Result<ExitCode> {
    let mut config = Config::load(args.config.as_deref());
    config.apply_scan_args(args);
    log::debug!("Effective configuration: {:?}", config);

    let Some(root) = resolve_root(args.path.as_ref())? else {
        log::info!("No directory chosen; nothing to scan");
        return Ok(ExitCode::Cancelled);
    };

    let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(quiet || !config.progress));
    let finder = DuplicateFinder::new(config.finder_config().with_progress_callback(progress));
    let report = finder.scan_checked(&root)?;

    output::write_report(&report, config.output, config.output_file.as_deref())
        .context("Failed to write report")?;

    if !quiet {
        print_summary(report.summary());
    }

    Ok(if report.has_duplicates() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    })
}

fn resolve_root(path: Option<&PathBuf>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => Ok(Some(path.clone())),
        None => {
            let mut prompter = ConsolePrompter::new();
            prompt::request_root_path(&mut prompter).context("Failed to read the directory to scan")
        }
    }
}

fn print_summary(summary: &ScanSummary) {
    eprintln!(
        "{} {} duplicate groups, {} duplicate files, {} reclaimable ({} files, {} scanned in {:.2?})",
        "Done:".green().bold(),
        summary.duplicate_groups,
        summary.duplicate_files,
        summary.reclaimable_display().bold(),
        summary.total_files,
        summary.total_size_display(),
        summary.scan_duration
    );
    if summary.is_partial() {
        eprintln!(
            "{} {} directories and {} files could not be read, {} pairs could not be compared",
            "Partial:".yellow().bold(),
            summary.directories_skipped,
            summary.files_skipped,
            summary.unreadable_pairs
        );
    }
}

fn run_compare(args: &CompareArgs) -> ExitCode {
    let chunk_size = args
        .chunk_size
        .map_or(DEFAULT_CHUNK_SIZE, |s| usize::try_from(s).unwrap_or(usize::MAX));
    let outcome = ContentComparator::new(chunk_size).compare_paths(&args.file_a, &args.file_b);
    println!("{}", outcome.label());

    if outcome.is_identical() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    }
}

fn run_init_config(args: &InitConfigArgs) -> Result<ExitCode> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => Config::default_path().ok_or(ConfigError::NoConfigDir)?,
    };
    Config::default()
        .save(&path, args.force)
        .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
    eprintln!("{} {}", "Wrote".green(), path.display());
    Ok(ExitCode::Success)
}
