//! Prioritize documentation pages for test coverage.
//!
//! Pages are discovered under a docs tree, scored by page views from an
//! analytics export, and written to a tracking spreadsheet.

mod analytics;
mod discovery;
mod error;
mod report;
mod scoring;
mod types;

pub use analytics::{HitsTable, load_hits, normalize_path};
pub use discovery::{
    FrontMatter, collect_files, get_and_trim_field, is_excluded, page_url, test_status,
};
pub use error::DocscoreError;
pub use report::{HEADER, write_report};
pub use scoring::{HitsScorer, Scorer};
pub use types::{
    Collection, FileEntry, Priority, ScoreConfig, SkippedFile, TestStatus, page_slug,
};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct RunPaths<'a> {
    pub docs: &'a Path,
    pub analytics: &'a Path,
    pub out: &'a Path,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub pages: usize,
    pub skipped: Vec<SkippedFile>,
    pub by_priority: [usize; 4],
    pub has_analytics: bool,
}

impl RunSummary {
    pub fn print(&self, out: &Path) {
        println!("\nWrote {} page(s) to {}", self.pages, out.display());
        for (i, n) in self.by_priority.iter().enumerate() {
            println!("  P{}: {}", i, n);
        }
        if !self.has_analytics {
            println!("\nNo analytics data: every page scored zero hits");
        }
        if !self.skipped.is_empty() {
            println!("\nSkipped {} unreadable file(s):", self.skipped.len());
            for s in &self.skipped {
                println!("  {} ({})", s.path.display(), s.reason);
            }
        }
    }
}

/// Run the full pipeline: load analytics, collect pages, score, write the report.
pub fn run(config: &ScoreConfig, paths: &RunPaths<'_>) -> Result<RunSummary> {
    info!("Scoring docs in {}", paths.docs.display());

    let hits = HitsScorer::from_csv(paths.analytics, config.max_score);
    let has_analytics = hits.has_data();
    let scorers: Vec<Box<dyn Scorer>> = vec![Box::new(hits)];

    let Collection { mut entries, skipped } = collect_files(paths.docs, config)
        .with_context(|| format!("failed to collect pages under {}", paths.docs.display()))?;
    info!(pages = entries.len(), skipped = skipped.len(), "collected pages");

    for scorer in &scorers {
        entries = scorer.score(entries);
        info!(scorer = scorer.name(), "scored pages");
    }

    write_report(&entries, paths.out, config).context("failed to write report")?;

    let mut by_priority = [0; 4];
    for entry in &entries {
        by_priority[Priority::from_score(entry.score, config).index()] += 1;
    }

    Ok(RunSummary {
        pages: entries.len(),
        skipped,
        by_priority,
        has_analytics,
    })
}
