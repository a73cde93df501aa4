//! Read-only aggregates over a client's ledgers: time distribution,
//! billing, daily volume and the projected payout.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::ledger::Ledger;
use crate::models::record::LedgerRecord;
use crate::models::tags::TagSet;
use crate::store::ledger_file::load_ledger;
use crate::utils::time::Clock;
use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Largest gap allowed between the row sum and a distribution's sum.
pub const SUM_TOLERANCE: f64 = 0.1;

/// Length of the billing cycle the payout projection assumes.
pub const DAYS_PER_CYCLE: u32 = 31;

#[derive(Debug, Clone, Serialize)]
pub struct Share {
    pub name: String,
    pub minutes: f64,
    pub percent: f64,
    pub hours: f64,
    pub billing: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyVolume {
    pub today: i64,
    pub yesterday: i64,
    /// Distinct days with sessions in the current ledger.
    pub days_worked: usize,
    pub first_day: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientReport {
    pub client: String,
    pub currency_symbol: String,
    pub title: String,
    pub total_minutes: i64,
    pub labels: Vec<Share>,
    pub projects: Vec<Share>,
    pub billing: f64,
    pub billing_eur: f64,
    pub daily: DailyVolume,
    pub history_files: usize,
    /// `None` while nothing has been billed.
    pub days_past_due: Option<u32>,
    pub expected_payout: Option<f64>,
    pub expected_payout_eur: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub clients: Vec<ClientReport>,
    /// Clients whose ledgers could not be read, with the reason.
    pub failures: Vec<(String, String)>,
    /// Grand totals, only when every client could be read.
    pub total_eur: Option<f64>,
    pub total_expected_payout_eur: Option<f64>,
    /// Non-EUR rates that went into the totals.
    pub conversions_used: BTreeMap<String, f64>,
}

/// Minutes per label (or project). A row's minutes are split evenly
/// among its tags; open rows count zero.
pub fn distribution<F>(ledger: &Ledger, column: F) -> BTreeMap<String, f64>
where
    F: Fn(&LedgerRecord) -> &TagSet,
{
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for record in &ledger.records {
        let minutes = record.minutes.unwrap_or_default() as f64;
        let tags = column(record);
        let tags = if tags.is_empty() {
            TagSet::default_tags()
        } else {
            tags.clone()
        };
        let share = minutes / tags.len() as f64;
        for tag in tags.iter() {
            *out.entry(tag.to_string()).or_default() += share;
        }
    }
    out
}

/// The distribution must account for every minute of the ledger.
pub fn verify_distribution(
    what: &str,
    dist: &BTreeMap<String, f64>,
    total_minutes: i64,
) -> AppResult<()> {
    let sum: f64 = dist.values().sum();
    if (sum - total_minutes as f64).abs() >= SUM_TOLERANCE {
        return Err(AppError::Report(format!(
            "{what}: expected {total_minutes} minutes, got {sum}"
        )));
    }
    Ok(())
}

/// Days since the last invoice, counted in uniform 31-day months.
pub fn days_past_due(today: u32, due_day: u32) -> u32 {
    let days = if today > due_day {
        today - due_day
    } else {
        DAYS_PER_CYCLE + today - due_day
    };
    days.max(1)
}

/// Scale what was billed so far to a whole billing cycle.
pub fn projected_payout(billing: f64, days_past_due: u32) -> f64 {
    billing * DAYS_PER_CYCLE as f64 / days_past_due as f64
}

/// Ledgers of past billing cycles below `dir`: in every folder, a
/// `billings.csv`, or else a `<client>_billings.csv`.
pub fn discover_history(client: &Client, dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    if dir.is_dir() {
        walk_history(client, dir, &mut found)?;
    }
    found.sort();
    Ok(found)
}

fn walk_history(client: &Client, dir: &Path, found: &mut Vec<PathBuf>) -> AppResult<()> {
    let generic = dir.join(client.past_billings_file_name());
    let named = dir.join(client.billings_file_name());
    if generic.is_file() {
        found.push(generic);
    } else if named.is_file() {
        found.push(named);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_history(client, &path, found)?;
        }
    }
    Ok(())
}

fn shares(dist: &BTreeMap<String, f64>, total: i64, client: &Client) -> Vec<Share> {
    dist.iter()
        .map(|(name, &minutes)| Share {
            name: name.clone(),
            minutes,
            percent: if total > 0 {
                100.0 * minutes / total as f64
            } else {
                0.0
            },
            hours: minutes / 60.0,
            billing: client.earnings(minutes),
        })
        .collect()
}

fn daily_volume(current: &Ledger, history: &[Ledger], today: NaiveDate) -> DailyVolume {
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for ledger in std::iter::once(current).chain(history.iter()) {
        for r in &ledger.records {
            *per_day.entry(r.start.date()).or_default() += r.minutes.unwrap_or_default();
        }
    }

    let yesterday = today - TimeDelta::days(1);
    let current_days: BTreeSet<NaiveDate> = current.records.iter().map(|r| r.start.date()).collect();

    DailyVolume {
        today: per_day.get(&today).copied().unwrap_or_default(),
        yesterday: per_day.get(&yesterday).copied().unwrap_or_default(),
        days_worked: current_days.len(),
        first_day: current.records.first().map(|r| r.start.date()),
    }
}

pub struct ReportLogic<'a> {
    cfg: &'a Config,
    financial_dir: PathBuf,
    clock: &'a dyn Clock,
}

impl<'a> ReportLogic<'a> {
    pub fn new(cfg: &'a Config, financial_dir: PathBuf, clock: &'a dyn Clock) -> Self {
        Self {
            cfg,
            financial_dir,
            clock,
        }
    }

    pub fn client_report(&self, client: &Client) -> AppResult<ClientReport> {
        let ledger = load_ledger(&client.ledger_path(&self.financial_dir))?;
        let rate = self.cfg.rate_to_eur(&client.currency_symbol)?;

        let history_paths = discover_history(client, &client.history_dir(&self.financial_dir))?;
        let mut history = Vec::new();
        for path in &history_paths {
            match load_ledger(path) {
                Ok(l) => history.push(l),
                Err(e) => warn!(path = %path.display(), "skipping history ledger: {e}"),
            }
        }

        let total = ledger.total_minutes();
        let labels = distribution(&ledger, |r| &r.labels);
        let projects = distribution(&ledger, |r| &r.projects);
        verify_distribution("labels", &labels, total)?;
        verify_distribution("projects", &projects, total)?;

        let billing = client.earnings(total as f64);
        let billing_eur = billing * rate;

        let now = self.clock.now();
        let (days, payout) = if billing_eur == 0.0 {
            (None, None)
        } else {
            let days = days_past_due(now.day(), client.due_day);
            (Some(days), Some(projected_payout(billing, days)))
        };

        debug!(client = %client.name, total, history = history.len(), "client report built");

        Ok(ClientReport {
            client: client.name.clone(),
            currency_symbol: client.currency_symbol.clone(),
            title: client.language.time_distribution_title().to_string(),
            total_minutes: total,
            labels: shares(&labels, total, client),
            projects: shares(&projects, total, client),
            billing,
            billing_eur,
            daily: daily_volume(&ledger, &history, now.date()),
            history_files: history.len(),
            days_past_due: days,
            expected_payout: payout,
            expected_payout_eur: payout.map(|p| p * rate),
        })
    }

    pub fn build<'c, I>(&self, clients: I) -> Report
    where
        I: IntoIterator<Item = &'c Client>,
    {
        let mut reports = Vec::new();
        let mut failures = Vec::new();
        let mut conversions_used = BTreeMap::new();

        for client in clients {
            match self.client_report(client) {
                Ok(r) => {
                    if client.currency_symbol != "€"
                        && let Ok(rate) = self.cfg.rate_to_eur(&client.currency_symbol)
                    {
                        conversions_used.insert(client.currency_symbol.clone(), rate);
                    }
                    reports.push(r);
                }
                Err(e) => failures.push((client.name.clone(), e.to_string())),
            }
        }

        let complete = failures.is_empty();
        let total_eur = complete.then(|| reports.iter().map(|r| r.billing_eur).sum());
        let total_payout = complete.then(|| {
            reports
                .iter()
                .filter_map(|r| r.expected_payout_eur)
                .sum()
        });

        Report {
            clients: reports,
            failures,
            total_eur,
            total_expected_payout_eur: total_payout,
            conversions_used,
        }
    }
}
