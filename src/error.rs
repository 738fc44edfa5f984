//! Error types for loading, collecting and reporting.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocscoreError {
    /// The analytics export could not be opened or parsed.
    #[error("unable to load analytics CSV {}: {source}", path.display())]
    Analytics {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The docs root could not be walked.
    #[error("unable to walk docs tree {}: {reason}", path.display())]
    Walk { path: PathBuf, reason: String },

    /// The report could not be created or a row could not be written.
    #[error("unable to write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The report could not be flushed to disk.
    #[error("unable to flush report {}: {source}", path.display())]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocscoreError>;
