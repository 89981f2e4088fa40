mod client;
mod url_utils;

use std::fmt;
use std::path::PathBuf;

use log::{info, warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, SpcError};
use crate::spc::ingest::{CompletionRow, ScheduleRow};
pub use client::SourceClient;

/// Where an input table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(Url),
}

impl Source {
    /// `http(s)` and `file` URLs are taken as URLs, anything else as a local path.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SpcError::Config("source must not be empty".to_string()));
        }

        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Path)
                .map_err(|()| SpcError::Config(format!("Invalid file URL: {value}"))),
            _ => Ok(Self::Path(PathBuf::from(value))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Decodes CSV text into rows, matching columns by header name and ignoring the rest.
pub fn decode_rows<T: DeserializeOwned>(text: &str, table: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

    let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;

    if rows.is_empty() {
        warn!("{table} table has no rows");
    }
    info!("Decoded {} {table} rows", rows.len());

    Ok(rows)
}

impl SourceClient {
    /// Fetches both tables concurrently and decodes them.
    pub async fn load_tables(
        &self,
        schedule: &Source,
        completions: &Source,
    ) -> Result<(Vec<ScheduleRow>, Vec<CompletionRow>)> {
        let (schedule_text, completions_text) =
            futures::try_join!(self.fetch_text(schedule), self.fetch_text(completions))?;

        Ok((
            decode_rows(&schedule_text, "schedule")?,
            decode_rows(&completions_text, "completions")?,
        ))
    }
}
