//! Argument parsing for `/key:value` style options.
//!
//! Option names are case-insensitive, values keep their case. Boolean options
//! stay three-state ([`Flag`]) so that values like `True` or `yes` remain
//! visible in the argument log while still behaving as false.

use std::fmt;

use crate::error::{LineError, UsageReason};

/// Characters that are not allowed in a Windows file name.
pub const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// A boolean option as it was written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// Exactly `true`.
    True,
    /// Exactly `false`.
    False,
    /// Anything else. Behaves as false.
    Other(String),
}

impl Flag {
    pub fn parse(value: &str) -> Self {
        match value {
            "true" => Flag::True,
            "false" => Flag::False,
            other => Flag::Other(other.to_string()),
        }
    }

    /// Enabled only for the literal value `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, Flag::True)
    }

    /// Enabled for `true` in any casing.
    pub fn is_true_ignore_case(&self) -> bool {
        match self {
            Flag::True => true,
            Flag::False => false,
            Flag::Other(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::True => f.write_str("true"),
            Flag::False => f.write_str("false"),
            Flag::Other(s) => f.write_str(s),
        }
    }
}

/// Parsed and sanitized run configuration. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub filename: String,
    pub separator: String,
    pub has_header: Flag,
    pub has_footer: Flag,
    pub delete_header: Flag,
    pub delete_footer: Flag,
    pub delete_first_column: Flag,
    pub same_name: Flag,
    pub new_name: String,
    pub log: Flag,
    pub remove_empty_line: Flag,
    /// Unrecognized options, first-seen order. Only used for the argument log.
    pub extra: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename: String::new(),
            separator: ";".to_string(),
            has_header: Flag::False,
            has_footer: Flag::False,
            delete_header: Flag::False,
            delete_footer: Flag::False,
            delete_first_column: Flag::False,
            same_name: Flag::True,
            new_name: String::new(),
            log: Flag::False,
            remove_empty_line: Flag::True,
            extra: Vec::new(),
        }
    }
}

impl Config {
    /// Whether the activity log is switched on.
    pub fn log_enabled(&self) -> bool {
        self.log.is_true_ignore_case()
    }

    /// Every option with its value: recognized ones first, then the extras.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("filename".to_string(), self.filename.clone()),
            ("separator".to_string(), self.separator.clone()),
            ("hasheader".to_string(), self.has_header.to_string()),
            ("hasfooter".to_string(), self.has_footer.to_string()),
            ("deleteheader".to_string(), self.delete_header.to_string()),
            ("deletefooter".to_string(), self.delete_footer.to_string()),
            (
                "deletefirstcolumn".to_string(),
                self.delete_first_column.to_string(),
            ),
            ("samename".to_string(), self.same_name.to_string()),
            ("newname".to_string(), self.new_name.clone()),
            ("log".to_string(), self.log.to_string()),
            (
                "removeemptyline".to_string(),
                self.remove_empty_line.to_string(),
            ),
        ];
        entries.extend(self.extra.iter().cloned());
        entries
    }

    fn set(&mut self, key: String, value: &str) {
        match key.as_str() {
            "filename" => self.filename = value.to_string(),
            "separator" => self.separator = value.to_string(),
            "hasheader" => self.has_header = Flag::parse(value),
            "hasfooter" => self.has_footer = Flag::parse(value),
            "deleteheader" => self.delete_header = Flag::parse(value),
            "deletefooter" => self.delete_footer = Flag::parse(value),
            "deletefirstcolumn" => self.delete_first_column = Flag::parse(value),
            "samename" => self.same_name = Flag::parse(value),
            "newname" => self.new_name = value.to_string(),
            "log" => self.log = Flag::parse(value),
            "removeemptyline" => self.remove_empty_line = Flag::parse(value),
            _ => match self.extra.iter_mut().find(|(k, _)| *k == key) {
                Some((_, v)) => *v = value.to_string(),
                None => self.extra.push((key, value.to_string())),
            },
        }
    }
}

/// Split a `/key:value` token. The first character is the sigil and is
/// dropped whatever it is. Tokens without `:` or without a key yield `None`.
fn split_token(token: &str) -> Option<(String, &str)> {
    let idx = token.find(':')?;
    if idx == 0 {
        return None;
    }
    let key: String = token[..idx].chars().skip(1).collect();
    Some((key.to_lowercase(), &token[idx + 1..]))
}

/// Remove every Windows-reserved character and any leading whitespace.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c))
        .collect::<String>()
        .trim_start()
        .to_string()
}

/// Parse raw argument tokens into a [`Config`].
///
/// Returns [`LineError::Usage`] when there are no arguments, when the first
/// one asks for help, or when no usable filename is left after sanitizing.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Config, LineError> {
    let Some(first) = args.first() else {
        return Err(LineError::Usage(UsageReason::NoArguments));
    };
    let first = first.as_ref();
    if first.to_lowercase().contains("help") || first.contains('?') {
        return Err(LineError::Usage(UsageReason::HelpRequested));
    }

    let mut config = Config::default();
    for token in args {
        // Malformed tokens are ignored.
        if let Some((key, value)) = split_token(token.as_ref()) {
            config.set(key, value);
        }
    }

    config.filename = sanitize_filename(&config.filename);
    if config.filename.trim().is_empty() {
        return Err(LineError::Usage(UsageReason::EmptyFilename));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_reason(args: &[&str]) -> Option<UsageReason> {
        match parse_args(args) {
            Err(LineError::Usage(reason)) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn test_no_arguments_shows_usage() {
        let args: [&str; 0] = [];
        assert_eq!(usage_reason(&args), Some(UsageReason::NoArguments));
    }

    #[test]
    fn test_help_variants_show_usage() {
        assert_eq!(usage_reason(&["/help"]), Some(UsageReason::HelpRequested));
        assert_eq!(usage_reason(&["/HELP"]), Some(UsageReason::HelpRequested));
        assert_eq!(usage_reason(&["/?"]), Some(UsageReason::HelpRequested));
        assert_eq!(
            usage_reason(&["--Help", "/filename:a.csv"]),
            Some(UsageReason::HelpRequested)
        );
    }

    #[test]
    fn test_help_only_checked_on_first_argument() {
        let config = parse_args(&["/filename:a.csv", "/help"]).unwrap();
        assert_eq!(config.filename, "a.csv");
    }

    #[test]
    fn test_defaults() {
        let config = parse_args(&["/filename:data.txt"]).unwrap();
        assert_eq!(config.separator, ";");
        assert_eq!(config.has_header, Flag::False);
        assert_eq!(config.same_name, Flag::True);
        assert_eq!(config.remove_empty_line, Flag::True);
        assert!(config.new_name.is_empty());
        assert!(!config.log_enabled());
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_keys_are_case_insensitive_values_are_not() {
        let config = parse_args(&[
            "/FileName:MyFile.CSV",
            "/SEPARATOR:,",
            "/hasHeader:true",
            "/NewName:Out.CSV",
        ])
        .unwrap();
        assert_eq!(config.filename, "MyFile.CSV");
        assert_eq!(config.separator, ",");
        assert!(config.has_header.is_true());
        assert_eq!(config.new_name, "Out.CSV");
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let config = parse_args(&["/filename:a.csv", "/separator::"]).unwrap();
        assert_eq!(config.separator, ":");
        let config = parse_args(&["/filename:a.csv", "/newname:C:\\out\\b.csv"]).unwrap();
        assert_eq!(config.new_name, "C:\\out\\b.csv");
    }

    #[test]
    fn test_malformed_tokens_ignored() {
        let config = parse_args(&["/filename:a.csv", "garbage", ":novalue", "/hasheader"]).unwrap();
        assert_eq!(config.has_header, Flag::False);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_unknown_keys_kept_for_logging() {
        let config = parse_args(&[
            "/filename:a.csv",
            "/Color:Blue",
            "/color:Red",
            "/size:1",
        ])
        .unwrap();
        assert_eq!(
            config.extra,
            vec![
                ("color".to_string(), "Red".to_string()),
                ("size".to_string(), "1".to_string())
            ]
        );
        let entries = config.entries();
        assert_eq!(entries.len(), 13);
        assert_eq!(entries[11], ("color".to_string(), "Red".to_string()));
    }

    #[test]
    fn test_flag_quirks() {
        let config = parse_args(&[
            "/filename:a.csv",
            "/deleteheader:True",
            "/hasheader:yes",
            "/log:TRUE",
        ])
        .unwrap();
        assert_eq!(config.delete_header, Flag::Other("True".to_string()));
        assert!(!config.delete_header.is_true());
        assert!(!config.has_header.is_true());
        // The log switch is the one option that ignores casing.
        assert!(config.log_enabled());
        assert_eq!(config.log.to_string(), "TRUE");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename(r#"  a\b/c:d*e?f"g<h>i|j.csv"#), "abcdefghij.csv");
        assert_eq!(sanitize_filename("/  data.csv "), "data.csv ");
    }

    #[test]
    fn test_filename_only_reserved_chars_shows_usage() {
        assert_eq!(
            usage_reason(&["/filename:<>|"]),
            Some(UsageReason::EmptyFilename)
        );
        assert_eq!(
            usage_reason(&["/separator:,"]),
            Some(UsageReason::EmptyFilename)
        );
        assert_eq!(usage_reason(&["/filename: / "]), Some(UsageReason::EmptyFilename));
    }

    #[test]
    fn test_filename_sanitized_before_use() {
        let config = parse_args(&["/filename:..\\secret/da*ta.csv"]).unwrap();
        assert_eq!(config.filename, "..secretdata.csv");
    }
}
