// src/export/model.rs

use crate::models::record::LedgerRecord;
use crate::utils::time::format_timestamp;
use serde::Serialize;

/// Flat, tool-friendly shape of one session.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    /// Ledger file the session was read from.
    pub source: String,
    pub start: String,
    pub labels: String,
    pub projects: String,
    pub description: String,
    pub end: String,
    pub minutes: Option<i64>,
}

impl RecordExport {
    pub fn from_record(source: &str, r: &LedgerRecord) -> Self {
        Self {
            source: source.to_string(),
            start: format_timestamp(&r.start),
            labels: r.labels.to_string(),
            projects: r.projects.to_string(),
            description: r.description.clone(),
            end: r.end.as_ref().map(format_timestamp).unwrap_or_default(),
            minutes: r.minutes,
        }
    }
}
