use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpcError {
    #[error("Invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("Invalid date {value:?} (expected format {format:?}): {source}")]
    InvalidDate {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{table} row {row}: {source}")]
    Record {
        table: &'static str,
        row: usize,
        #[source]
        source: Box<SpcError>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Source request failed: {0}")]
    Source(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpcError {
    pub fn in_record(self, table: &'static str, row: usize) -> Self {
        Self::Record {
            table,
            row,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpcError>;
