//! Error type shared by every stage of the fetch pipeline.

use std::fmt;

use thiserror::Error;

/// The three archive requests, in the order they are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Identifiers,
    Sectors,
    Table,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Identifiers => "planet identifiers",
            Stage::Sectors => "sector information",
            Stage::Table => "light curve data",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, TLS, connection reset, body read.
    #[error("Network error while fetching {stage}")]
    Network {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The archive answered with something other than 200.
    #[error("Failed to fetch {stage}: {status}")]
    Status { stage: Stage, status: u16 },

    /// The body was not the JSON shape the stage expects.
    #[error("Unexpected {stage} response")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error("No sectors found for TCE {tce}")]
    EmptyResult { tce: String },

    #[error("Light curve table has no {column} column")]
    ColumnMissing { column: String },

    #[error("Column {column} has {len} rows, expected {expected}")]
    RaggedTable {
        column: String,
        len: usize,
        expected: usize,
    },

    #[error("Column {column} row {row} is not a number")]
    InvalidCell { column: String, row: usize },

    #[error("Unexpected table layout: {0}")]
    TableShape(&'static str),

    #[error("Invalid archive URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_the_stage() {
        let err = FetchError::Status {
            stage: Stage::Sectors,
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to fetch sector information: 404");
    }

    #[test]
    fn empty_result_names_the_tce() {
        let err = FetchError::EmptyResult {
            tce: "TCE_1".to_string(),
        };
        assert_eq!(err.to_string(), "No sectors found for TCE TCE_1");
    }
}
