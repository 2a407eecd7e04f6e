//! Prescreening report assembly and storage.
//!
//! This crate covers the handoff side of the prescreening assistant:
//!
//! - [`ReportAssembler`] renders a patient-facing plain-text report from the
//!   conversation transcript and accumulated symptom text.
//! - [`ReportStore`] persists assembled reports as JSON files under a storage
//!   root, with a searchable `reports_index.json` alongside them.
//!
//! ## Storage Layout
//!
//! ```text
//! <storage_root>/
//! ├── reports_index.json           # searchable index of every report
//! └── <year>/                      # reports grouped by calendar year
//!     └── report_<stamp>_<id>.json # one JSON document per report
//! ```
//!
//! The store itself is single-threaded over the index file. Embedding
//! applications that serve concurrent requests wrap the store in a mutex.

mod assemble;
mod store;

pub use assemble::{AssembledReport, ConversationEntry, ReportAssembler, ReportMetadata};
pub use store::{
    IndexEntry, ReportPage, ReportPayload, ReportStore, SearchFilter, StorageStats,
    StoredMetadata, StoredReport, DEFAULT_SEARCH_LIMIT,
};

/// Errors that can occur while persisting or reading reports
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage root exists but is not a directory
    #[error("Invalid storage root: {0}")]
    InvalidRoot(String),

    /// I/O failure reading or writing report files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index or report file contains malformed JSON
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Truncates to at most `limit` characters, marking cut text with an ellipsis.
pub(crate) fn truncated(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_owned()
    } else {
        let mut cut: String = text.chars().take(limit).collect();
        cut.push_str("...");
        cut
    }
}
