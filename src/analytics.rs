//! Page-hits analytics: load a CSV export into a table keyed by page path.

use crate::error::{DocscoreError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const PATH_PREFIX: &str = "/latest/";
const PATH_SUFFIX: &str = "index.html";

/// Cumulative hits per normalized page path.
pub type HitsTable = HashMap<String, u64>;

/// Normalize an analytics URL path to a page key.
///
/// `/latest/docs/tasks/index.html` becomes `docs/tasks/`.
pub fn normalize_path(path: &str) -> &str {
    let path = path.strip_suffix(PATH_SUFFIX).unwrap_or(path);
    path.strip_prefix(PATH_PREFIX).unwrap_or(path)
}

/// Parse a hit count best-effort. Anything unparsable counts as zero.
fn parse_hits(raw: &str) -> u64 {
    raw.trim().replace(',', "").parse().unwrap_or(0)
}

/// Load an analytics export: column 0 is the URL path, column 2 the hit count.
///
/// Rows mapping to the same normalized path are summed. Rows with fewer than
/// three columns are ignored.
pub fn load_hits(path: &Path) -> Result<HitsTable> {
    let err = |source: csv::Error| DocscoreError::Analytics {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(err)?;

    let mut hits = HitsTable::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(err)?;
        let (Some(url), Some(count)) = (record.get(0), record.get(2)) else {
            debug!(row = i + 1, "skipping analytics row with fewer than 3 columns");
            continue;
        };
        *hits.entry(normalize_path(url).to_string()).or_insert(0) += parse_hits(count);
    }

    for (key, total) in &hits {
        debug!("{}: {}", key, total);
    }

    Ok(hits)
}
