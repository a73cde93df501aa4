//! Unified application error type.
//! All modules (models, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Client resolution
    // ---------------------------
    #[error("Client '{name}' not found (known clients: {known})")]
    ClientNotFound { name: String, known: String },

    #[error("No client specified: pass -n <CLIENT>, or set default_client in the configuration")]
    NoClientSpecified,

    // ---------------------------
    // Session state
    // ---------------------------
    #[error("Last session was not closed. Did you mean to call 'end'?")]
    SessionAlreadyOpen,

    #[error("No open session. Did you mean to call 'start'?")]
    NoOpenSession,

    #[error("Session is paused (marker {}). Call 'unpause' first", .0.display())]
    SessionPaused(PathBuf),

    #[error("Session is not paused (marker {} does not exist)", .0.display())]
    NotPaused(PathBuf),

    #[error("No billable sessions in {} (empty ledger)", .0.display())]
    EmptyLedger(PathBuf),

    #[error("Sessions must end after they start: {0}")]
    InvalidReset(String),

    #[error("Session cannot end at {end}: it started at {start}")]
    EndBeforeStart { start: String, end: String },

    // ---------------------------
    // Ledger files
    // ---------------------------
    #[error("File already exists: {}. Delete or move it before creating a new ledger", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("Ledger not found: {}. Create it with 'new'", .0.display())]
    LedgerNotFound(PathBuf),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Invalid timestamp '{0}' (expected DD.MM.YYYY HH:MM)")]
    InvalidTimestamp(String),

    #[error("Invalid {field}: '{value}' must not contain ';' or line breaks")]
    InvalidField { field: &'static str, value: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Report / export errors
    // ---------------------------
    #[error("Report error: {0}")]
    Report(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
