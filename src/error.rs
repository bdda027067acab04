//! Error types for the delay-intelligence core.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No identity was supplied for an operation that needs one.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The caller tried to delete a report they did not submit.
    #[error("report {report_id} belongs to another user")]
    NotOwner { report_id: String },

    #[error("report not found: {0}")]
    ReportNotFound(String),

    #[error("invalid vote direction: {0}")]
    InvalidVote(String),

    #[error("invalid severity: {0}")]
    InvalidSeverity(String),

    /// Injected engine weights do not match the 6-16-4 topology.
    #[error("weight matrix `{layer}` has shape {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    WeightShape {
        layer: &'static str,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    /// Any failure of the external text-generation call, flattened to one message.
    #[error("{0}")]
    Advisory(String),

    #[error("report store error: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
