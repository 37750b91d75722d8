//! Line transformations: header removal, footer removal, first column removal.
//!
//! Each transformation is a [`LineStage`]. [`build_stages`] picks the stages
//! a configuration asks for, always in the same order, and [`transform`]
//! runs them over the in-memory lines and then checks the line count
//! against the trailer record.

use crate::activity_log::ActivityLog;
use crate::config::Config;
use crate::error::LineError;
use crate::loader::TrailerInfo;

/// A transformation over the whole line sequence.
///
/// Stages work on the full sequence rather than line by line because the
/// header and footer are positional.
pub trait LineStage {
    /// Transform `lines` in place, returning the problems met on the way.
    fn apply(&mut self, lines: &mut Vec<String>, log: &dyn ActivityLog) -> Vec<LineError>;

    /// The display name of this stage.
    fn name(&self) -> &str;
}

/// Removes the first line.
pub struct DropHeader;

impl LineStage for DropHeader {
    fn apply(&mut self, lines: &mut Vec<String>, log: &dyn ActivityLog) -> Vec<LineError> {
        if !lines.is_empty() {
            let header = lines.remove(0);
            log.record(&format!(
                "Header (which is the first line) has been removed: {header}"
            ));
        }
        vec![]
    }

    fn name(&self) -> &str {
        "DROP HEADER"
    }
}

/// Removes the last line, unless the footer was the trailer record
/// (already taken out by the loader).
pub struct DropFooter {
    trailer: TrailerInfo,
}

impl DropFooter {
    pub fn new(trailer: TrailerInfo) -> Self {
        Self { trailer }
    }
}

impl LineStage for DropFooter {
    fn apply(&mut self, lines: &mut Vec<String>, log: &dyn ActivityLog) -> Vec<LineError> {
        if lines.is_empty() {
            return vec![];
        }
        log.record(&format!(
            "{} lines stated in footer",
            self.trailer.stated_count
        ));
        if self.trailer.footer_is_trailer {
            log.record(&format!(
                "The file has {} lines; the footer is the trailer record and has already been removed",
                lines.len()
            ));
        } else if let Some(footer) = lines.pop() {
            log.record(&format!("The file has {} lines", lines.len()));
            log.record(&format!(
                "Footer (which is the last line) has been removed: {footer}"
            ));
        }
        vec![]
    }

    fn name(&self) -> &str {
        "DROP FOOTER"
    }
}

/// Cuts every line just past the first separator.
///
/// Lines without the separator are left as they are and reported.
pub struct StripFirstColumn {
    separator: String,
}

impl StripFirstColumn {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl LineStage for StripFirstColumn {
    fn apply(&mut self, lines: &mut Vec<String>, log: &dyn ActivityLog) -> Vec<LineError> {
        if lines.is_empty() {
            return vec![];
        }
        if self.separator.is_empty() {
            log.record("The separator is empty, the first column has not been deleted");
            return vec![];
        }

        let mut errors = Vec::new();
        for (idx, line) in lines.iter_mut().enumerate() {
            match line.find(&self.separator) {
                Some(pos) => *line = line[pos + self.separator.len()..].to_string(),
                None => {
                    let err = LineError::ColumnStrip {
                        line_number: idx + 1,
                        line: line.clone(),
                    };
                    log.record(&err.to_string());
                    errors.push(err);
                }
            }
        }
        log.record("The first column has been deleted");
        errors
    }

    fn name(&self) -> &str {
        "STRIP FIRST COLUMN"
    }
}

/// Stages requested by `config`, in their fixed order: header, footer,
/// first column.
pub fn build_stages(config: &Config, trailer: TrailerInfo) -> Vec<Box<dyn LineStage>> {
    let mut stages: Vec<Box<dyn LineStage>> = Vec::new();
    if config.delete_header.is_true() && config.has_header.is_true() {
        stages.push(Box::new(DropHeader));
    }
    if config.delete_footer.is_true() && config.has_footer.is_true() {
        stages.push(Box::new(DropFooter::new(trailer)));
    }
    if config.delete_first_column.is_true() {
        stages.push(Box::new(StripFirstColumn::new(config.separator.as_str())));
    }
    stages
}

/// Outcome of [`transform`].
#[derive(Debug, Default)]
pub struct TransformReport {
    /// Names of the stages that ran.
    pub stages_run: Vec<String>,
    /// The remaining line count equals the trailer's stated count.
    pub counts_matched: bool,
    pub errors: Vec<LineError>,
}

/// Apply the configured stages to `lines`, then run the integrity check.
///
/// An empty sequence is left alone and nothing is checked.
pub fn transform(
    lines: &mut Vec<String>,
    config: &Config,
    trailer: TrailerInfo,
    log: &dyn ActivityLog,
) -> TransformReport {
    let mut report = TransformReport::default();
    if lines.is_empty() {
        return report;
    }

    for mut stage in build_stages(config, trailer) {
        tracing::debug!(stage = stage.name(), lines = lines.len(), "applying stage");
        report.errors.extend(stage.apply(lines, log));
        report.stages_run.push(stage.name().to_string());
    }

    report.counts_matched = lines.len() as u64 == trailer.stated_count;
    log.record(&format!(
        "{} lines remain, {} stated in trailer: counts matched = {}",
        lines.len(),
        trailer.stated_count,
        report.counts_matched
    ));
    if !report.counts_matched {
        tracing::info!(
            lines = lines.len(),
            stated = trailer.stated_count,
            "line count differs from trailer record"
        );
    }
    report
}
