#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

pub const HEADER: &str = "Starting time;Labels;Projects;Description;Ending time;Minutes;";

pub fn bill() -> Command {
    cargo_bin_cmd!("billings")
}

/// A configuration file and a ledger directory inside a temp dir.
///
/// Clients: `Acme` (40€/h, due day 31) and `Globex` (30$/h, due day 15).
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
    pub ledgers: PathBuf,
}

impl Sandbox {
    pub fn new(default_client: Option<&str>) -> Self {
        let dir = tempdir().expect("tempdir");
        let config = dir.path().join("billings.conf");
        let ledgers = dir.path().join("ledgers");
        fs::create_dir_all(&ledgers).expect("create ledger dir");

        let mut yaml = format!("financial_dir: '{}'\n", ledgers.display());
        if let Some(name) = default_client {
            yaml.push_str(&format!("default_client: {name}\n"));
        }
        yaml.push_str(
            "clients:\n\
             \x20 - name: Acme\n\
             \x20   hourly_wage: 40.0\n\
             \x20   currency_symbol: \"€\"\n\
             \x20   language: EN\n\
             \x20 - name: Globex\n\
             \x20   hourly_wage: 30.0\n\
             \x20   currency_symbol: \"$\"\n\
             \x20   language: DE\n\
             \x20   due_day: 15\n\
             conversions_to_eur:\n\
             \x20 \"€\": 1.0\n\
             \x20 \"$\": 0.5\n",
        );
        fs::write(&config, yaml).expect("write config");

        Self {
            dir,
            config,
            ledgers,
        }
    }

    /// `billings --config <sandbox config>`
    pub fn cmd(&self) -> Command {
        let mut cmd = bill();
        cmd.arg("--config").arg(&self.config);
        cmd
    }

    /// Same as `cmd`, with the clock pinned to `now` (DD.MM.YYYY HH:MM).
    pub fn at(&self, now: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--now", now]);
        cmd
    }

    pub fn ledger_path(&self, client: &str) -> PathBuf {
        self.ledgers.join(format!("{client}_billings.csv"))
    }

    pub fn pause_path(&self, client: &str) -> PathBuf {
        self.ledgers.join(format!("{client}_pause.txt"))
    }

    pub fn read_ledger(&self, client: &str) -> String {
        fs::read_to_string(self.ledger_path(client)).expect("read ledger")
    }

    /// Data lines of the ledger, header excluded.
    pub fn rows(&self, client: &str) -> Vec<String> {
        self.read_ledger(client)
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .map(String::from)
            .collect()
    }

    pub fn write_ledger(&self, client: &str, rows: &[&str]) {
        let mut text = format!("{HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        fs::write(self.ledger_path(client), text).expect("write ledger");
    }
}
