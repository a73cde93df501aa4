//! Pause marker: a side file holding the time a pause began.
//! Existence of the file is the paused state.

use crate::errors::AppResult;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PauseMarker {
    path: PathBuf,
}

impl PauseMarker {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn write(&self, started: NaiveDateTime) -> AppResult<()> {
        fs::write(&self.path, format_timestamp(&started))?;
        Ok(())
    }

    pub fn read(&self) -> AppResult<NaiveDateTime> {
        let content = fs::read_to_string(&self.path)?;
        let first = content.lines().next().unwrap_or_default();
        parse_timestamp(first)
    }

    pub fn remove(&self) -> AppResult<()> {
        if self.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
