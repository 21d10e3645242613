// File: crates/history-core/src/error.rs
// Summary: Error type for parsing price-history payloads and reading configuration.

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing column: expected one of {expected:?}")]
    MissingColumn { expected: &'static [&'static str] },

    #[error("unexpected payload shape: {0}")]
    Payload(String),

    #[error("invalid config value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, HistoryError>;
