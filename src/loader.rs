//! Reading the source file into memory.
//!
//! Lines of the form `9;<count>` are trailer records carrying the number of
//! data lines the file claims to hold. They are consumed here and never
//! become part of the line sequence. A `9;` line whose count does not parse
//! is reported and kept as ordinary data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::activity_log::ActivityLog;
use crate::error::LineError;

/// Prefix of a trailer record.
pub const TRAILER_MARKER: &str = "9;";

/// What the trailer record told us, as needed by the transformation step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrailerInfo {
    /// Stated data line count, 0 when the file had no trailer record.
    pub stated_count: u64,
    /// The trailer record was the file's last line, i.e. its footer.
    pub footer_is_trailer: bool,
}

/// Result of reading a source file.
#[derive(Debug, Default)]
pub struct LoadedFile {
    /// Data lines in file order.
    pub lines: Vec<String>,
    /// Count stated by the last well-formed trailer record, if any.
    pub trailer_count: Option<u64>,
    /// The final line of the file was a trailer record.
    pub footer_is_trailer: bool,
    /// Problems met while reading. None of them stop the read.
    pub errors: Vec<LineError>,
}

impl LoadedFile {
    /// The stated count used for the integrity check; 0 when absent.
    pub fn stated_count(&self) -> u64 {
        self.trailer_count.unwrap_or(0)
    }

    pub fn trailer_info(&self) -> TrailerInfo {
        TrailerInfo {
            stated_count: self.stated_count(),
            footer_is_trailer: self.footer_is_trailer,
        }
    }
}

/// Parse a trailer record.
///
/// Returns `None` when `line` is not a trailer record at all. The digits may
/// be zero padded (`9;00000042`); an all-zero count is 0.
pub fn parse_trailer(line: &str) -> Option<Result<u64, LineError>> {
    let rest = line.strip_prefix(TRAILER_MARKER)?.trim();
    let parsed = if rest.is_empty() {
        None
    } else {
        let digits = rest.trim_start_matches('0');
        if digits.is_empty() {
            Some(0)
        } else if digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse::<u64>().ok()
        } else {
            None
        }
    };
    Some(parsed.ok_or_else(|| LineError::TrailerParse {
        line: line.to_string(),
    }))
}

/// Read `path` line by line.
///
/// A missing file or a read failure is recorded in [`LoadedFile::errors`]
/// and whatever was read up to that point is returned.
pub fn load_lines(path: &Path, remove_empty_lines: bool, log: &dyn ActivityLog) -> LoadedFile {
    let mut loaded = LoadedFile::default();

    if !path.exists() {
        let err = LineError::SourceNotFound {
            path: path.to_path_buf(),
        };
        tracing::warn!("{err}");
        log.record(&err.to_string());
        loaded.errors.push(err);
        return loaded;
    }

    match read_into(path, remove_empty_lines, log, &mut loaded) {
        Ok(()) => {
            log.record("The file has been read correctly");
            log.record(&format!(
                "The footer of the file states {} lines.",
                loaded.stated_count()
            ));
        }
        Err(e) => {
            let err = LineError::ReadIo {
                path: path.to_path_buf(),
                source: e,
            };
            tracing::warn!("{err}");
            log.record(&err.to_string());
            loaded.errors.push(err);
        }
    }

    log.record(&format!("{} lines kept from the file", loaded.lines.len()));
    tracing::debug!(
        path = %path.display(),
        lines = loaded.lines.len(),
        trailer = ?loaded.trailer_count,
        "source loaded"
    );
    loaded
}

fn read_into(
    path: &Path,
    remove_empty_lines: bool,
    log: &dyn ActivityLog,
    loaded: &mut LoadedFile,
) -> std::io::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        let line = line?;

        match parse_trailer(&line) {
            Some(Ok(count)) => {
                loaded.trailer_count = Some(count);
                loaded.footer_is_trailer = true;
                continue;
            }
            Some(Err(err)) => {
                tracing::warn!("{err}");
                log.record(&err.to_string());
                loaded.errors.push(err);
            }
            None => {}
        }

        if remove_empty_lines && line.is_empty() {
            continue;
        }
        loaded.lines.push(line);
        loaded.footer_is_trailer = false;
    }
    Ok(())
}
