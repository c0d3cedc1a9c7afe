mod summary;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fc_cleaner::{clean_tree, FilingCleaner};
use fc_core::CleanerConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use summary::{BatchSummary, FileSummary};
use tracing_subscriber::EnvFilter;

/// Strip an EDGAR full-submission archive down to readable text.
#[derive(Debug, Parser)]
#[command(name = "fc-clean", version, about)]
struct Cli {
    /// Raw archive, or a directory of downloaded filings to clean in bulk
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (default: cleaned.txt beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding cleaner settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Returns `Ok(false)` when a batch finished with failures.
    fn run(&self) -> Result<bool> {
        let config = match &self.config {
            Some(path) => CleanerConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CleanerConfig::default(),
        };
        let budget = config.budget.clone();
        let cleaner = FilingCleaner::new(config);

        if self.input.is_dir() {
            if self.output.is_some() {
                bail!("--output cannot be used when --input is a directory");
            }
            let entries = clean_tree(&cleaner, &self.input)?;
            let summary = BatchSummary::new(self.input.clone(), &entries);
            if self.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.render());
            }
            return Ok(summary.failed == 0);
        }

        let cleaned = cleaner.clean_file(&self.input, self.output.as_deref())?;
        let summary = FileSummary::new(&cleaned, &budget);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", summary.render());
        }
        Ok(true)
    }
}

fn init_logging(level: &str) {
    let default = format!("fc_cleaner={level},fc_core={level},fc_clean={level}");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match cli.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
