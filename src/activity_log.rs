//! Activity log sinks.
//!
//! The pipeline never writes the log itself: it is handed an [`ActivityLog`]
//! and calls [`ActivityLog::record`]. The binary picks a
//! [`FileActivityLog`] when `/log:true` is given and a [`NullActivityLog`]
//! otherwise; tests use [`MemoryActivityLog`].

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

/// Timestamp written in front of every log line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date inserted into the log file name.
const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Something that accepts activity messages.
pub trait ActivityLog {
    /// Record one message. Must not fail; sinks swallow their own errors.
    fn record(&self, message: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullActivityLog;

impl ActivityLog for NullActivityLog {
    fn record(&self, _message: &str) {}
}

/// Keeps messages in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    messages: RefCell<Vec<String>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// True if any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl ActivityLog for MemoryActivityLog {
    fn record(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Appends `<timestamp> - <message>` lines to a daily rotated file.
///
/// `app.log` in `dir` is written as `app.2024-03-01.log` (UTC date), and a
/// new file is started when the day changes.
#[derive(Debug)]
pub struct FileActivityLog {
    dir: PathBuf,
    base_name: String,
    appender: RefCell<RollingFileAppender>,
}

impl FileActivityLog {
    /// Open today's log file for `base_name` inside `dir`, creating the
    /// directory when needed.
    pub fn dated(dir: &Path, base_name: &str) -> Result<Self, InitError> {
        let (stem, extension) = split_base_name(base_name);
        let mut builder = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(stem);
        if let Some(extension) = extension {
            builder = builder.filename_suffix(extension);
        }
        let appender = builder.build(dir)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            base_name: base_name.to_string(),
            appender: RefCell::new(appender),
        })
    }

    /// Path of the file messages recorded now end up in.
    pub fn current_path(&self) -> PathBuf {
        self.dir.join(dated_log_file_name(&self.base_name, Utc::now().date_naive()))
    }
}

impl ActivityLog for FileActivityLog {
    fn record(&self, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let mut writer = self.appender.borrow_mut();
        let result = writeln!(writer, "{timestamp} - {message}").and_then(|()| writer.flush());
        if let Err(e) = result {
            tracing::warn!(
                "There was an error while writing the file: {}. The error is: {e}",
                self.current_path().display()
            );
        }
    }
}

/// Stem and extension of a log base name, directories dropped.
fn split_base_name(base_name: &str) -> (String, Option<String>) {
    let path = Path::new(base_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());
    (stem, extension)
}

/// Name of the rotated log file for `base_name` on `date`:
/// `<stem>.<date>.<extension>`.
pub fn dated_log_file_name(base_name: &str, date: NaiveDate) -> String {
    let (stem, extension) = split_base_name(base_name);
    let date = date.format(FILE_DATE_FORMAT);
    match extension {
        Some(ext) => format!("{stem}.{date}.{ext}"),
        None => format!("{stem}.{date}"),
    }
}
