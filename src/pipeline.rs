//! The whole run: parse arguments, load, transform, write.
//!
//! Every step after argument parsing is best effort. Failures are logged and
//! collected in [`RunReport::errors`], and the run always completes.

use std::path::{Path, PathBuf};

use crate::activity_log::{ActivityLog, FileActivityLog, NullActivityLog};
use crate::config::{Config, parse_args};
use crate::error::{LineError, UsageReason};
use crate::loader::load_lines;
use crate::transform::transform;
use crate::writer::{choose_destination, write_lines};

/// Default base name of the activity log file.
pub const DEFAULT_LOG_FILE_NAME: &str = "DeleteFileLine.log";

/// Process-level settings that do not come from `/key:value` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory the file names and the activity log are resolved against.
    pub directory: PathBuf,
    /// Base name of the activity log; the current date is added to it.
    pub log_file_name: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

/// What happened during a completed run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Lines read from the source, trailer records excluded.
    pub lines_loaded: usize,
    /// Lines left after the transformations.
    pub lines_after_transform: usize,
    /// Count stated by the trailer record, if the file had one.
    pub trailer_count: Option<u64>,
    pub stages_run: Vec<String>,
    pub counts_matched: bool,
    /// File that was written, if any.
    pub written: Option<PathBuf>,
    /// Non-fatal problems, in the order they happened.
    pub errors: Vec<LineError>,
}

/// Result of [`execute`].
#[derive(Debug)]
pub enum Outcome {
    /// Usage text should be shown; nothing was read or written.
    Usage(UsageReason),
    Completed(RunReport),
}

/// The activity log a configuration asks for.
///
/// Falls back to no logging when the log file cannot be opened.
pub fn activity_log_for(config: &Config, options: &RunOptions) -> Box<dyn ActivityLog> {
    if !config.log_enabled() {
        return Box::new(NullActivityLog);
    }
    match FileActivityLog::dated(&options.directory, &options.log_file_name) {
        Ok(log) => Box::new(log),
        Err(e) => {
            tracing::warn!(
                "The log file {} cannot be opened in {}: {e}",
                options.log_file_name,
                options.directory.display()
            );
            Box::new(NullActivityLog)
        }
    }
}

/// Parse `args` and run the pipeline with the activity log they ask for.
pub fn execute<S: AsRef<str>>(args: &[S], options: &RunOptions) -> Outcome {
    match parse_args(args) {
        Ok(config) => {
            let log = activity_log_for(&config, options);
            Outcome::Completed(run(&config, &options.directory, log.as_ref()))
        }
        Err(LineError::Usage(reason)) => Outcome::Usage(reason),
        // parse_args only fails with a usage error.
        Err(other) => {
            tracing::warn!("{other}");
            Outcome::Usage(UsageReason::NoArguments)
        }
    }
}

/// Run load, transform and write for an already parsed configuration.
///
/// File names in `config` are resolved against `dir`.
pub fn run(config: &Config, dir: &Path, log: &dyn ActivityLog) -> RunReport {
    for (key, value) in config.entries() {
        log.record(&format!("Argument requested: {key}, value of the argument: {value}"));
    }

    let source = dir.join(&config.filename);
    let remove_empty_lines = config.remove_empty_line.is_true();

    let mut loaded = load_lines(&source, remove_empty_lines, log);
    let mut report = RunReport {
        lines_loaded: loaded.lines.len(),
        trailer_count: loaded.trailer_count,
        errors: std::mem::take(&mut loaded.errors),
        ..RunReport::default()
    };

    if loaded.lines.is_empty() {
        log.record("There is nothing to transform, no file has been written");
        return report;
    }

    let trailer = loaded.trailer_info();
    let mut lines = loaded.lines;
    let transformed = transform(&mut lines, config, trailer, log);
    report.stages_run = transformed.stages_run;
    report.counts_matched = transformed.counts_matched;
    report.errors.extend(transformed.errors);
    report.lines_after_transform = lines.len();

    let destination = choose_destination(config, dir);
    match write_lines(&lines, &destination, remove_empty_lines, log) {
        Ok(written) => report.written = written,
        Err(err) => {
            tracing::warn!("{err}");
            report.errors.push(err);
        }
    }

    tracing::info!(
        loaded = report.lines_loaded,
        kept = report.lines_after_transform,
        counts_matched = report.counts_matched,
        "run complete"
    );
    report
}
