use chrono::{DateTime, Utc};
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Station identifier must not be empty")]
    EmptyStation,

    #[error("Request window starts at {start} which is after its end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

#[derive(Debug, Error)]
pub enum AsosDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Data download failed")]
    DownloadIo(#[source] std::io::Error),

    #[error("Failed to read observation file '{0}'")]
    SourceRead(PathBuf, #[source] std::io::Error),

    // Errors during CSV reading (inside blocking task)
    #[error("I/O error processing CSV data from {source_name}")]
    CsvReadIo {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parsing error processing CSV data from {source_name}")]
    CsvReadPolars {
        source_name: String,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Missing required column '{0}'")]
    MissingColumn(String, #[source] PolarsError),

    #[error("Could not parse observation time '{value}' in row {row}")]
    TimestampParse {
        value: String,
        row: usize,
        #[source]
        source: chrono::ParseError,
    },

    #[error("No observations found in {0}")]
    NoObservations(String),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
