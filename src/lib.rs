//! # delete-file-line
//!
//! Edits a delimited text file in place, or into a new file: drops the
//! header line, the footer line and/or the first column, and checks the
//! remaining line count against an optional `9;<count>` trailer record.
//!
//! ## Overview
//!
//! A run is a short fixed pipeline:
//! - **Parse**: `/key:value` arguments become a [`Config`]
//! - **Load**: the source is read into memory, trailer records set aside
//! - **Transform**: header, footer and first column stages, in that order
//! - **Write**: the result replaces the source or goes to a new file
//!
//! Activity messages go to an injected [`ActivityLog`].
//!
//! ## Example
//!
//! ```
//! use delete_file_line::{MemoryActivityLog, TrailerInfo, parse_args, transform};
//!
//! let config = parse_args(&[
//!     "/filename:data.csv",
//!     "/hasheader:true",
//!     "/deleteheader:true",
//!     "/deletefirstcolumn:true",
//! ])
//! .unwrap();
//!
//! let mut lines = vec!["ID;NAME".to_string(), "1;SMITH".to_string()];
//! let log = MemoryActivityLog::new();
//! transform(&mut lines, &config, TrailerInfo::default(), &log);
//!
//! assert_eq!(lines, vec!["SMITH"]);
//! ```

pub mod activity_log;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod transform;
pub mod usage;
pub mod writer;

pub use activity_log::{
    ActivityLog, FileActivityLog, MemoryActivityLog, NullActivityLog, dated_log_file_name,
};
pub use config::{Config, Flag, parse_args, sanitize_filename};
pub use error::{LineError, UsageReason};
pub use loader::{LoadedFile, TRAILER_MARKER, TrailerInfo, load_lines, parse_trailer};
pub use pipeline::{
    DEFAULT_LOG_FILE_NAME, Outcome, RunOptions, RunReport, activity_log_for, execute, run,
};
pub use transform::{
    DropFooter, DropHeader, LineStage, StripFirstColumn, TransformReport, build_stages, transform,
};
pub use usage::usage_text;
pub use writer::{Destination, choose_destination, write_lines};
