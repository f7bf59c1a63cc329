//! Error types for data export.

/// Errors that can occur while exporting records.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Records could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (writing export files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported export format name.
    #[error("Unknown export format '{0}' (expected csv, tsv, xlsx or json)")]
    UnknownFormat(String),

    /// Date range with its end before its start.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Range start, rendered.
        start: String,
        /// Range end, rendered.
        end: String,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
