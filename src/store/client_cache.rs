//! Last used client name, so `-n` can be omitted between invocations.

use crate::errors::AppResult;
use std::fs;
use std::path::Path;

/// Cached client name, `None` when the cache is missing or blank.
pub fn read_cached_client(path: &Path) -> AppResult<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let name = content.lines().next().unwrap_or_default().trim();
    Ok((!name.is_empty()).then(|| name.to_string()))
}

pub fn write_cached_client(path: &Path, name: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cache_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lastclient.txt");

        assert_eq!(read_cached_client(&path).unwrap(), None);
        write_cached_client(&path, "Acme").unwrap();
        assert_eq!(read_cached_client(&path).unwrap().as_deref(), Some("Acme"));
        write_cached_client(&path, "Globex").unwrap();
        assert_eq!(read_cached_client(&path).unwrap().as_deref(), Some("Globex"));
    }

    #[test]
    fn blank_cache_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lastclient.txt");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(read_cached_client(&path).unwrap(), None);
    }
}
