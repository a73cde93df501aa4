use super::language::Language;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const BILLINGS_FILE_NAME: &str = "billings.csv";
const BILLINGS_BACKUP_FILE_NAME: &str = "billings_backup.csv";
const PAUSE_FILE_NAME: &str = "pause.txt";

/// A customer billed at a fixed hourly wage. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub hourly_wage: f64,
    pub currency_symbol: String,
    #[serde(default)]
    pub language: Language,
    /// Day of the month (1..=31) on which the invoice is issued.
    #[serde(default = "default_due_day")]
    pub due_day: u32,
}

fn default_due_day() -> u32 {
    31
}

impl Client {
    pub fn new(
        name: &str,
        hourly_wage: f64,
        currency_symbol: &str,
        language: Language,
        due_day: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            hourly_wage,
            currency_symbol: currency_symbol.to_string(),
            language,
            due_day,
        }
    }

    pub fn billings_file_name(&self) -> String {
        format!("{}_{}", self.name, BILLINGS_FILE_NAME)
    }

    /// Name of ledgers found in history folders besides `<name>_billings.csv`.
    pub fn past_billings_file_name(&self) -> &'static str {
        BILLINGS_FILE_NAME
    }

    pub fn ledger_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.billings_file_name())
    }

    pub fn backup_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_{}", self.name, BILLINGS_BACKUP_FILE_NAME))
    }

    pub fn pause_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_{}", self.name, PAUSE_FILE_NAME))
    }

    pub fn history_dir(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_history", self.name))
    }

    /// Earnings for a number of minutes, in the client's currency.
    pub fn earnings(&self, minutes: f64) -> f64 {
        self.hourly_wage * minutes / 60.0
    }
}

/// Immutable table of configured clients, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: Vec<Client>,
}

impl ClientRegistry {
    pub fn new(clients: Vec<Client>) -> AppResult<Self> {
        for (i, c) in clients.iter().enumerate() {
            if c.name.trim().is_empty() {
                return Err(AppError::Config("client name must not be empty".into()));
            }
            if c.name.contains(['/', '\\', ';']) {
                return Err(AppError::Config(format!(
                    "client name '{}' must not contain '/', '\\' or ';'",
                    c.name
                )));
            }
            if clients[..i].iter().any(|other| other.name == c.name) {
                return Err(AppError::Config(format!("duplicate client '{}'", c.name)));
            }
            if !(1..=31).contains(&c.due_day) {
                return Err(AppError::Config(format!(
                    "client '{}': due_day must be between 1 and 31, got {}",
                    c.name, c.due_day
                )));
            }
            if !c.hourly_wage.is_finite() || c.hourly_wage < 0.0 {
                return Err(AppError::Config(format!(
                    "client '{}': invalid hourly_wage {}",
                    c.name, c.hourly_wage
                )));
            }
        }
        Ok(Self { clients })
    }

    pub fn get(&self, name: &str) -> AppResult<&Client> {
        self.clients
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::ClientNotFound {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
