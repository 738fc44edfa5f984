//! Core types for documentation scoring.

use std::fmt;
use std::path::PathBuf;

/// Locale prefix stripped from relative paths when deriving page slugs.
pub const LOCALE_PREFIX: &str = "en/";

/// Configuration for discovery, scoring and reporting.
///
/// Different sites can customize behavior by providing different configs.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Relative path prefixes never scored (administrative or non-content sections).
    pub exclude_dirs: Vec<String>,

    /// Prefix every page URL is published under.
    pub base_url: String,

    /// Ceiling for a page's cumulative score.
    pub max_score: u32,
}

impl ScoreConfig {
    /// Config matching the istio.io site layout.
    pub fn istio() -> Self {
        Self {
            exclude_dirs: [
                "en/about",
                "zh/about",
                "en/blog",
                "zh/blog",
                "en/boilerplates",
                "zh/boilerplates",
                "en/events",
                "zh/events",
                "en/docs/reference/glossary",
                "zh/docs/reference/glossary",
                "zh/news",
                "en/news",
                "en/test",
                "zh/test",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            base_url: "https://preliminary.istio.io/latest/".to_string(),
            max_score: 15,
        }
    }

    /// Score threshold above which a page lands in the top tier.
    pub fn upper_third(&self) -> u32 {
        self.max_score * 2 / 3
    }

    /// Score threshold above which a page lands in the second tier.
    pub fn lower_third(&self) -> u32 {
        self.max_score / 3
    }
}

/// Whether a page is covered by automated tests, from its `test:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    NotApplicable,
    No,
    Yes,
    Unknown,
}

impl TestStatus {
    /// Parse a raw `test:` value. Absent or unrecognized values are `Unknown`.
    pub fn from_field(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "n/a" => TestStatus::NotApplicable,
            "no" => TestStatus::No,
            "yes" => TestStatus::Yes,
            _ => TestStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::NotApplicable => "n/a",
            TestStatus::No => "no",
            TestStatus::Yes => "yes",
            TestStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority tier derived from a page's final score. `P0` is the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn from_score(score: u32, config: &ScoreConfig) -> Self {
        if score > config.upper_third() {
            Priority::P0
        } else if score > config.lower_third() {
            Priority::P1
        } else if score > 0 {
            Priority::P2
        } else {
            Priority::P3
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.index())
    }
}

/// One markdown page found under the docs root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub full_path: PathBuf,
    /// `/`-separated path relative to the docs root.
    pub relative: String,
    pub url: String,
    pub test_status: TestStatus,
    pub score: u32,
    pub title: String,
    pub owner: String,
    pub notes: Vec<String>,
}

impl FileEntry {
    /// Add a scorer's contribution, clamped to the configured ceiling.
    pub fn add_score(&mut self, points: u32, max_score: u32) {
        self.score = self.score.saturating_add(points).min(max_score);
    }
}

/// A markdown file the collector could not read.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything the collector found under the docs root.
#[derive(Debug, Default)]
pub struct Collection {
    pub entries: Vec<FileEntry>,
    pub skipped: Vec<SkippedFile>,
}

/// Page slug for a relative path: locale prefix stripped, parent directory kept.
///
/// `en/docs/tasks/index.md` becomes `docs/tasks`; a top-level page has an empty slug.
pub fn page_slug(relative: &str) -> String {
    let path = relative.strip_prefix(LOCALE_PREFIX).unwrap_or(relative);
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}
