// src/export/logic.rs

use crate::core::report::discover_history;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::models::client::Client;
use crate::store::ledger_file::load_ledger;
use crate::ui::messages::warning;
use std::path::Path;
use tracing::debug;

/// High-level export of a client's sessions.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the current ledger followed by every history ledger.
    /// Returns the number of exported sessions.
    pub fn export(
        client: &Client,
        financial_dir: &Path,
        format: ExportFormat,
        file: &Path,
        force: bool,
    ) -> AppResult<usize> {
        let rows = collect_rows(client, financial_dir)?;

        if rows.is_empty() {
            warning("No sessions to export.");
            return Ok(0);
        }

        ensure_writable(file, force)?;
        if let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        debug!(format = format.as_str(), rows = rows.len(), "exporting sessions");
        match format {
            ExportFormat::Csv => export_csv(&rows, file)?,
            ExportFormat::Json => export_json(&rows, file)?,
        }

        Ok(rows.len())
    }
}

/// Current ledger first, then history ledgers in path order.
pub(crate) fn collect_rows(client: &Client, financial_dir: &Path) -> AppResult<Vec<RecordExport>> {
    let mut sources = vec![client.ledger_path(financial_dir)];
    sources.extend(discover_history(client, &client.history_dir(financial_dir))?);

    let mut rows = Vec::new();
    for path in sources {
        let ledger = load_ledger(&path)?;
        let label = path
            .strip_prefix(financial_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();
        rows.extend(
            ledger
                .records
                .iter()
                .map(|r| RecordExport::from_record(&label, r)),
        );
    }
    Ok(rows)
}
