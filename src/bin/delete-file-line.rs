//! CLI tool to strip header, footer and first column from a delimited file.
//!
//! Usage:
//!   delete-file-line /filename:data.csv /hasheader:true /deleteheader:true
//!   delete-file-line -C /var/data --log-file run.log /filename:data.csv /log:true
//!
//! The process always exits with status 0; problems are reported on stderr
//! and in the activity log.

use clap::Parser;
use delete_file_line::{DEFAULT_LOG_FILE_NAME, Outcome, RunOptions, execute, usage_text};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Remove header, footer and/or first column from a delimited text file.
// `--help` and `-h` go to the `/key:value` parser, which shows the usage text.
#[derive(Parser, Debug)]
#[command(name = "delete-file-line", disable_help_flag = true)]
struct Cli {
    /// Directory the file names and the activity log are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Base name of the activity log (the current date is added to it)
    #[arg(long, default_value = DEFAULT_LOG_FILE_NAME)]
    log_file: String,

    /// Options in /key:value form, e.g. /filename:data.csv /hasheader:true
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Bad process options: report, show usage and stop cleanly.
            let _ = e.print();
            println!("{}", usage_text());
            return;
        }
    };

    let options = RunOptions {
        directory: cli.directory,
        log_file_name: cli.log_file,
    };

    match execute(&cli.args, &options) {
        Outcome::Usage(reason) => {
            tracing::debug!(?reason, "showing usage");
            println!("{}", usage_text());
        }
        Outcome::Completed(report) => {
            if let Some(path) = &report.written {
                tracing::info!(
                    "Processed {} -> {} lines, output: {}",
                    report.lines_loaded,
                    report.lines_after_transform,
                    path.display()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delete_file_line::{LineError, UsageReason, parse_args};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("delete-file-line").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_help_flags_reach_usage() {
        for flag in ["--help", "-h"] {
            let cli = parse(&[flag]);
            assert_eq!(cli.args, vec![flag]);
            assert!(matches!(
                parse_args(&cli.args),
                Err(LineError::Usage(UsageReason::HelpRequested))
            ));
        }
    }

    #[test]
    fn test_process_options_before_arguments() {
        let cli = parse(&[
            "-C",
            "/data",
            "--log-file",
            "run.log",
            "/filename:in.csv",
            "/log:true",
        ]);
        assert_eq!(cli.directory, PathBuf::from("/data"));
        assert_eq!(cli.log_file, "run.log");
        assert_eq!(cli.args, vec!["/filename:in.csv", "/log:true"]);
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["/filename:in.csv"]);
        assert_eq!(cli.directory, PathBuf::from("."));
        assert_eq!(cli.log_file, DEFAULT_LOG_FILE_NAME);
    }
}
