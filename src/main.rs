use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use grade_scanner::{AggregationPolicy, ScanOptions};

/// Count Language and Mathematics grades found in report-card PDFs
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file with scan options; flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the report-card PDFs [default: data/input]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV file to create or overwrite [default: data/output/grades.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Count grades from every PDF instead of only the last one scanned
    #[arg(long)]
    accumulate: bool,

    /// Process at most this many PDFs
    #[arg(long)]
    max_files: Option<usize>,

    /// Also write the raw grades, counts and statistics as JSON
    #[arg(long)]
    json_report: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_options(self) -> Result<ScanOptions> {
        let mut options = match &self.config {
            Some(path) => ScanOptions::from_toml_file(path)?,
            None => ScanOptions::default(),
        };

        if let Some(input) = self.input {
            options.input_dir = input;
        }
        if let Some(output) = self.output {
            options.output_file = output;
        }
        if self.accumulate {
            options.policy = AggregationPolicy::Accumulate;
        }
        if self.max_files.is_some() {
            options.max_files = self.max_files;
        }
        if self.json_report.is_some() {
            options.json_report = self.json_report;
        }
        if self.no_progress {
            options.show_progress = false;
        }

        Ok(options)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let options = args.into_options()?;
    debug!("Scan options: {:?}", options);

    grade_scanner::run(&options)?;
    Ok(())
}
