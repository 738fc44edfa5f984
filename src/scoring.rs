//! Scorers: enrich collected pages with score contributions and notes.

use crate::analytics::{self, HitsTable};
use crate::types::{FileEntry, page_slug};
use std::path::Path;
use tracing::{info, warn};

/// A scoring strategy.
///
/// Each scorer takes every collected page, adds its contribution to `score`
/// and appends a note explaining it.
pub trait Scorer {
    fn name(&self) -> &str;

    fn score(&self, entries: Vec<FileEntry>) -> Vec<FileEntry>;
}

/// Scores pages by cumulative page views.
pub struct HitsScorer {
    max_score: u32,
    hits: HitsTable,
}

impl HitsScorer {
    pub fn new(hits: HitsTable, max_score: u32) -> Self {
        Self { max_score, hits }
    }

    /// Build a scorer from an analytics export.
    ///
    /// An export that cannot be loaded is logged and leaves every page with zero hits.
    pub fn from_csv(path: &Path, max_score: u32) -> Self {
        let hits = match analytics::load_hits(path) {
            Ok(hits) => {
                info!(pages = hits.len(), "loaded analytics from {}", path.display());
                hits
            }
            Err(e) => {
                warn!("could not get hits scorer: {}", e);
                HitsTable::new()
            }
        };
        Self::new(hits, max_score)
    }

    pub fn has_data(&self) -> bool {
        !self.hits.is_empty()
    }

    /// Analytics key for a page: its slug with a trailing `/`.
    pub fn lookup_key(relative: &str) -> String {
        let slug = page_slug(relative);
        if slug.is_empty() { slug } else { format!("{}/", slug) }
    }

    /// Hits recorded for a page.
    pub fn hits_for(&self, relative: &str) -> u64 {
        self.hits
            .get(&Self::lookup_key(relative))
            .copied()
            .unwrap_or(0)
    }

    /// Score contribution for a hit count.
    pub fn points(&self, hits: u64) -> u32 {
        match hits {
            h if h > 2000 => self.max_score,
            h if h > 400 => self.max_score * 2 / 3,
            h if h > 10 => self.max_score / 3,
            _ => 0,
        }
    }
}

impl Scorer for HitsScorer {
    fn name(&self) -> &str {
        "hits"
    }

    fn score(&self, mut entries: Vec<FileEntry>) -> Vec<FileEntry> {
        for entry in &mut entries {
            let hits = self.hits_for(&entry.relative);
            entry.add_score(self.points(hits), self.max_score);
            entry.notes.push(format!("Hits: {}\n", hits));
        }
        entries
    }
}
