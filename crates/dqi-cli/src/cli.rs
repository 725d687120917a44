//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dqi",
    version,
    about = "Study quality snapshot - extract trial operations workbooks into one DQI snapshot",
    long_about = "Extract clinical trial operations workbooks into one data quality snapshot.\n\n\
                  Every subdirectory of STUDY_ROOT is a study. Workbooks are classified by\n\
                  file name into nine source kinds, normalized, and reduced to flat metrics,\n\
                  a region/country/site hierarchy and a composite data quality index."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process every study under a root and write the snapshot.
    Run(RunArgs),

    /// List the source kinds with their file-name rules and sheets.
    Kinds,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory whose immediate subdirectories are studies.
    #[arg(value_name = "STUDY_ROOT")]
    pub study_root: PathBuf,

    /// Output directory for the snapshot files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Snapshot files to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Worker threads for study extraction (0 = available parallelism).
    #[arg(long = "jobs", short = 'j', value_name = "N", default_value_t = 0)]
    pub jobs: usize,

    /// Seed for the simulated DQI trend, for reproducible output.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Override the `dataSource` text of the snapshot.
    #[arg(long = "data-source", value_name = "TEXT")]
    pub data_source: Option<String>,

    /// Also write the extraction error log as CSV.
    #[arg(long = "errors-csv", value_name = "PATH")]
    pub errors_csv: Option<PathBuf>,

    /// Extract and report without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Js,
    Both,
}

impl OutputFormatArg {
    pub fn wants_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn wants_js(self) -> bool {
        matches!(self, Self::Js | Self::Both)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["dqi", "run", "data/studies"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.study_root, PathBuf::from("data/studies"));
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.format, OutputFormatArg::Both);
        assert_eq!(args.jobs, 0);
        assert!(args.seed.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn run_flags() {
        let cli = Cli::try_parse_from([
            "dqi",
            "run",
            "root",
            "--format",
            "js",
            "-j",
            "4",
            "--seed",
            "9",
            "--errors-csv",
            "errors.csv",
            "--dry-run",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.format.wants_js());
        assert!(!args.format.wants_json());
        assert_eq!(args.jobs, 4);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.errors_csv, Some(PathBuf::from("errors.csv")));
        assert!(args.dry_run);
    }
}
