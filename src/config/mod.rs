use crate::errors::{AppError, AppResult};
use crate::models::client::{Client, ClientRegistry};
use crate::models::language::Language;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the file caching the last used client, inside the financial dir.
pub const CLIENT_CACHE_FILE_NAME: &str = "lastclient.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding ledgers, backups, pause markers and history folders.
    #[serde(default = "default_financial_dir")]
    pub financial_dir: String,
    #[serde(default)]
    pub default_client: Option<String>,
    #[serde(default = "default_clients")]
    pub clients: Vec<Client>,
    #[serde(default = "default_conversions")]
    pub conversions_to_eur: BTreeMap<String, f64>,
}

fn default_financial_dir() -> String {
    Config::config_dir()
        .join("ledgers")
        .to_string_lossy()
        .to_string()
}

fn default_clients() -> Vec<Client> {
    vec![Client::new("ExampleClient", 20.0, "€", Language::DE, 31)]
}

fn default_conversions() -> BTreeMap<String, f64> {
    BTreeMap::from([("€".to_string(), 1.0), ("$".to_string(), 0.85)])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            financial_dir: default_financial_dir(),
            default_client: None,
            clients: default_clients(),
            conversions_to_eur: default_conversions(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("billings")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".billings")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("billings.conf")
    }

    /// Load configuration from `path` (or the standard location).
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), clients = cfg.clients.len(), "configuration loaded");
        Ok(cfg)
    }

    /// Directory of the ledgers, with `~/` expanded.
    pub fn financial_dir(&self) -> PathBuf {
        expand_tilde(&self.financial_dir)
    }

    pub fn client_cache_file(&self) -> PathBuf {
        self.financial_dir().join(CLIENT_CACHE_FILE_NAME)
    }

    /// Build the immutable client table.
    pub fn registry(&self) -> AppResult<ClientRegistry> {
        if let Some(name) = &self.default_client
            && !self.clients.iter().any(|c| &c.name == name)
        {
            return Err(AppError::Config(format!(
                "default_client '{name}' is not a configured client"
            )));
        }
        ClientRegistry::new(self.clients.clone())
    }

    /// Conversion rate of a currency symbol to EUR.
    pub fn rate_to_eur(&self, symbol: &str) -> AppResult<f64> {
        self.conversions_to_eur.get(symbol).copied().ok_or_else(|| {
            AppError::Config(format!(
                "no conversion rate to EUR for currency '{symbol}' (add it to conversions_to_eur)"
            ))
        })
    }

    /// Check every client's currency has a conversion rate.
    pub fn check(&self) -> AppResult<ClientRegistry> {
        let registry = self.registry()?;
        for client in registry.iter() {
            self.rate_to_eur(&client.currency_symbol)?;
        }
        Ok(registry)
    }

    /// Write the default configuration (unless the file exists) and create
    /// the financial directory. `financial_dir` replaces the default one in a
    /// newly written file. Returns whether a new file was written.
    pub fn init_all(path: Option<&Path>, financial_dir: Option<&Path>) -> AppResult<bool> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        let written = if path.exists() {
            false
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut cfg = Config::default();
            if let Some(dir) = financial_dir {
                cfg.financial_dir = dir.to_string_lossy().to_string();
            }
            fs::write(&path, serde_yaml::to_string(&cfg)?)?;
            debug!(path = %path.display(), "default configuration written");
            true
        };

        let cfg = Self::load(Some(&path))?;
        fs::create_dir_all(cfg.financial_dir())?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let cfg = Config::load(Some(&dir.path().join("nope.conf"))).unwrap();
        assert_eq!(cfg.clients.len(), 1);
        assert_eq!(cfg.clients[0].name, "ExampleClient");
        assert_eq!(cfg.rate_to_eur("$").unwrap(), 0.85);
    }

    #[test]
    fn parses_yaml_with_defaults_for_optional_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("billings.conf");
        fs::write(
            &path,
            "financial_dir: /tmp/fin\n\
             default_client: Acme\n\
             clients:\n  - name: Acme\n    hourly_wage: 50.0\n    currency_symbol: \"$\"\n",
        )
        .unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        let reg = cfg.check().unwrap();
        let acme = reg.get("Acme").unwrap();
        assert_eq!(acme.due_day, 31);
        assert_eq!(acme.language, Language::EN);
        assert_eq!(cfg.financial_dir(), PathBuf::from("/tmp/fin"));
    }

    #[test]
    fn unknown_default_client_is_rejected() {
        let cfg = Config {
            default_client: Some("Ghost".into()),
            ..Config::default()
        };
        assert!(matches!(cfg.registry(), Err(AppError::Config(_))));
    }

    #[test]
    fn init_writes_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("billings.conf");
        let fin = dir.path().join("fin");

        assert!(Config::init_all(Some(&path), Some(&fin)).unwrap());
        assert!(fin.is_dir());
        assert_eq!(Config::load(Some(&path)).unwrap().financial_dir(), fin);

        let other = dir.path().join("other");
        assert!(!Config::init_all(Some(&path), Some(&other)).unwrap());
        assert!(!other.exists());
    }
}
