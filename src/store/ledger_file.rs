use crate::errors::{AppError, AppResult};
use crate::models::ledger::Ledger;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and parse a whole ledger file.
pub fn load_ledger(path: &Path) -> AppResult<Ledger> {
    if !path.exists() {
        return Err(AppError::LedgerNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let ledger = Ledger::parse(&content)?;
    debug!(path = %path.display(), records = ledger.len(), "ledger loaded");
    Ok(ledger)
}

/// Overwrite the ledger file with the full contents of `ledger`.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> AppResult<()> {
    fs::write(path, ledger.to_text())?;
    debug!(path = %path.display(), records = ledger.len(), "ledger written");
    Ok(())
}

/// Create a header-only ledger. Never overwrites.
pub fn create_ledger(path: &Path) -> AppResult<()> {
    if path.exists() {
        return Err(AppError::FileAlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    save_ledger(path, &Ledger::default())
}
