//! Report writer: serialize scored pages to the test-tracking spreadsheet.

use crate::error::{DocscoreError, Result};
use crate::types::{FileEntry, Priority, ScoreConfig};
use std::path::Path;

pub const HEADER: [&str; 15] = [
    "",
    "Owner",
    "Test Cases",
    "Priority",
    "Automated",
    "In Progress",
    "In Progress Last Updated",
    "Done By",
    "Done By Last Updated",
    "GitHub Issue",
    "Comments (e.g. env used)",
    "Automated Sign Up",
    "Automated Last Updated",
    "Automation GitHub Issue",
    "Generator Notes",
];

/// Spreadsheet formula linking a page's URL under its title.
pub fn hyperlink(url: &str, title: &str) -> String {
    format!("=HYPERLINK(\"{}\",\"{}\")", url, title.replace('"', ""))
}

/// One spreadsheet row for a page.
pub fn row(entry: &FileEntry, config: &ScoreConfig) -> [String; 15] {
    let mut row: [String; 15] = Default::default();
    row[1] = entry.owner.clone();
    row[2] = hyperlink(&entry.url, &entry.title);
    row[3] = Priority::from_score(entry.score, config).to_string();
    row[4] = entry.test_status.to_string();
    row[14] = entry.notes.join("\n");
    row
}

/// Write the report to `path`, one row per entry in input order.
pub fn write_report(entries: &[FileEntry], path: &Path, config: &ScoreConfig) -> Result<()> {
    let err = |source: csv::Error| DocscoreError::Report {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(err)?;
    writer.write_record(HEADER).map_err(err)?;
    for entry in entries {
        writer.write_record(row(entry, config)).map_err(err)?;
    }
    writer.flush().map_err(|source| DocscoreError::ReportIo {
        path: path.to_path_buf(),
        source,
    })
}
