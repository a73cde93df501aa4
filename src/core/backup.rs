use crate::errors::AppResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One-generation rollback copy of a ledger.
///
/// Taken after a command's preconditions pass and before it writes; every
/// snapshot overwrites the previous one.
pub struct BackupGuard {
    backup: PathBuf,
}

impl BackupGuard {
    pub fn new(backup: PathBuf) -> Self {
        Self { backup }
    }

    pub fn path(&self) -> &Path {
        &self.backup
    }

    /// Copy `ledger` verbatim over the backup file.
    pub fn snapshot(&self, ledger: &Path) -> AppResult<()> {
        if let Some(parent) = self.backup.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = fs::copy(ledger, &self.backup)?;
        debug!(
            from = %ledger.display(),
            to = %self.backup.display(),
            bytes,
            "ledger backup written"
        );
        Ok(())
    }
}
