use std::path::PathBuf;

use clap::Parser;
use docscore::{RunPaths, ScoreConfig};

/// Build a prioritized spreadsheet of documentation pages that need tests.
#[derive(Parser, Debug)]
#[command(name = "docscore", version, about, long_about = None)]
struct Cli {
    /// Points to the cloned path of the docs site
    #[arg(long = "docspath", default_value = "../istio.io")]
    docs_path: PathBuf,

    /// Path to create the spreadsheet CSV at
    #[arg(long = "outpath", default_value = "out.csv")]
    out_path: PathBuf,

    /// Path to a file containing the page-hits analytics CSV
    #[arg(long = "analyticspath", default_value = "analytics.csv")]
    analytics_path: PathBuf,

    /// Score ceiling for a page
    #[arg(long, default_value_t = 15)]
    max_score: u32,

    /// Additional relative path prefix to exclude (repeatable)
    #[arg(long, value_name = "PREFIX")]
    exclude: Vec<String>,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> ScoreConfig {
        let mut config = ScoreConfig::istio();
        config.max_score = self.max_score;
        config.exclude_dirs.extend(self.exclude.iter().cloned());
        config
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("docscore error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = cli.config();
    let paths = RunPaths {
        docs: &cli.docs_path,
        analytics: &cli.analytics_path,
        out: &cli.out_path,
    };
    let summary = docscore::run(&config, &paths)?;
    summary.print(&cli.out_path);
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DOCSCORE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
