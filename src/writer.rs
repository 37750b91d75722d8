//! Writing transformed lines back to disk.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::activity_log::ActivityLog;
use crate::config::Config;
use crate::error::LineError;

/// Where the transformed lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Overwrite the source file.
    SameFile(PathBuf),
    /// Write a separate file, truncating it if it exists.
    NewFile(PathBuf),
    /// `samename` is off and no `newname` was given.
    Nowhere,
}

impl Destination {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Destination::SameFile(p) | Destination::NewFile(p) => Some(p),
            Destination::Nowhere => None,
        }
    }
}

/// Pick the destination for `config`, resolving names against `dir`.
pub fn choose_destination(config: &Config, dir: &Path) -> Destination {
    if config.same_name.is_true() {
        Destination::SameFile(dir.join(&config.filename))
    } else if !config.new_name.is_empty() {
        Destination::NewFile(dir.join(&config.new_name))
    } else {
        Destination::Nowhere
    }
}

/// Write `lines` to `destination`, one per line, newline terminated.
///
/// With `remove_empty_lines`, lines that are blank once trimmed are skipped.
/// Returns the path written, or `None` for [`Destination::Nowhere`].
pub fn write_lines(
    lines: &[String],
    destination: &Destination,
    remove_empty_lines: bool,
    log: &dyn ActivityLog,
) -> Result<Option<PathBuf>, LineError> {
    let (path, file) = match destination {
        Destination::SameFile(path) => (path, reopen_for_rewrite(path)),
        Destination::NewFile(path) => (path, File::create(path)),
        Destination::Nowhere => {
            log.record("No new name given and same name is off: nothing has been written");
            return Ok(None);
        }
    };

    let result = file.and_then(|file| {
        let mut out = BufWriter::new(file);
        for line in lines {
            if remove_empty_lines && line.trim().is_empty() {
                continue;
            }
            writeln!(out, "{line}")?;
        }
        out.flush()
    });

    match result {
        Ok(()) => {
            log.record(&format!(
                "The transformed file has been written correctly: {}",
                path.display()
            ));
            Ok(Some(path.clone()))
        }
        Err(source) => {
            let err = LineError::WriteIo {
                path: path.clone(),
                source,
            };
            log.record(&err.to_string());
            Err(err)
        }
    }
}

/// Delete `path` and open it again for appending.
fn reopen_for_rewrite(path: &Path) -> io::Result<File> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_log::{MemoryActivityLog, NullActivityLog};
    use crate::config::Flag;
    use crate::loader::load_lines;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_choose_destination() {
        let dir = Path::new("/data");
        let config = Config {
            filename: "in.csv".to_string(),
            new_name: "out.csv".to_string(),
            ..Config::default()
        };
        assert_eq!(
            choose_destination(&config, dir),
            Destination::SameFile(PathBuf::from("/data/in.csv"))
        );

        let config = Config {
            same_name: Flag::False,
            ..config
        };
        assert_eq!(
            choose_destination(&config, dir),
            Destination::NewFile(PathBuf::from("/data/out.csv"))
        );

        let config = Config {
            new_name: String::new(),
            ..config
        };
        assert_eq!(choose_destination(&config, dir), Destination::Nowhere);
    }

    #[test]
    fn test_same_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "old content that is longer\nsecond\n").unwrap();

        let written = write_lines(
            &lines(&["1", "2"]),
            &Destination::SameFile(path.clone()),
            true,
            &NullActivityLog,
        )
        .unwrap();
        assert_eq!(written, Some(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n");
    }

    #[test]
    fn test_new_file_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale\nstale\nstale\n").unwrap();

        write_lines(
            &lines(&["x"]),
            &Destination::NewFile(path.clone()),
            true,
            &NullActivityLog,
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    }

    #[test]
    fn test_blank_lines_filtered_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_lines(
            &lines(&["a", "", "   ", "b"]),
            &Destination::NewFile(path.clone()),
            true,
            &NullActivityLog,
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_round_trip_keeps_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let original = lines(&["a", "", "  ", "b", ""]);
        write_lines(
            &original,
            &Destination::NewFile(path.clone()),
            false,
            &NullActivityLog,
        )
        .unwrap();

        let reread = load_lines(&path, false, &NullActivityLog);
        assert_eq!(reread.lines, original);
    }

    #[test]
    fn test_nowhere_writes_nothing() {
        let log = MemoryActivityLog::new();
        let written = write_lines(&lines(&["a"]), &Destination::Nowhere, true, &log).unwrap();
        assert_eq!(written, None);
        assert!(log.contains("nothing has been written"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let log = MemoryActivityLog::new();
        let result = write_lines(&lines(&["a"]), &Destination::NewFile(path), true, &log);
        assert!(matches!(result, Err(LineError::WriteIo { .. })));
        assert!(log.contains("cannot be written"));
    }
}
