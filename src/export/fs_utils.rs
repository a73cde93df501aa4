// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Check whether an export file may be created or overwritten.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask on stdin
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    let stdin = io::stdin();
    ensure_writable_with(path, force, &mut stdin.lock())
}

pub(crate) fn ensure_writable_with(
    path: &Path,
    force: bool,
    input: &mut dyn BufRead,
) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "cancelled, '{}' not overwritten",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn new_or_forced_files_are_writable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        ensure_writable_with(&path, false, &mut "".as_bytes()).unwrap();

        fs::write(&path, "x").unwrap();
        ensure_writable_with(&path, true, &mut "".as_bytes()).unwrap();
    }

    #[test]
    fn existing_file_needs_confirmation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "x").unwrap();

        ensure_writable_with(&path, false, &mut "yes\n".as_bytes()).unwrap();
        assert!(matches!(
            ensure_writable_with(&path, false, &mut "n\n".as_bytes()),
            Err(AppError::Export(_))
        ));
        assert!(ensure_writable_with(&path, false, &mut "".as_bytes()).is_err());
    }
}
