//! Session state machine: validates every command against the ledger state
//! and performs the read-validate-backup-write cycle.

use crate::core::backup::BackupGuard;
use crate::core::merge::{MergeWarning, merge_description, merge_tags};
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::ledger::Ledger;
use crate::models::record::{LedgerRecord, validate_field};
use crate::models::session_state::SessionState;
use crate::models::tags::TagSet;
use crate::store::ledger_file::{create_ledger, load_ledger, save_ledger};
use crate::store::pause_marker::PauseMarker;
use crate::utils::time::{Clock, format_timestamp, minutes_between, shift_minutes};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Largest gap between stored and recomputed minutes `check` accepts.
pub const CHECK_TOLERANCE: f64 = 0.1;

/// Labels, projects and description given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SessionInput {
    pub labels: Option<String>,
    pub projects: Option<String>,
    pub description: Option<String>,
}

impl SessionInput {
    fn validate(&self) -> AppResult<()> {
        for (field, value) in [
            ("labels", &self.labels),
            ("projects", &self.projects),
            ("description", &self.description),
        ] {
            if let Some(v) = value {
                validate_field(field, v)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Started {
    pub record: LedgerRecord,
    /// A marker left over from an earlier session was deleted.
    pub removed_stale_marker: bool,
}

#[derive(Debug, Clone)]
pub struct Ended {
    pub record: LedgerRecord,
    pub minutes: i64,
    pub warnings: Vec<MergeWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Open session: the start moved back by `delta` minutes.
    StartShifted { delta: i64, start: NaiveDateTime },
    /// Closed session: the end moved forward by `delta` minutes.
    EndShifted {
        delta: i64,
        end: NaiveDateTime,
        minutes: i64,
    },
}

#[derive(Debug, Clone)]
pub struct Unpaused {
    pub at: NaiveDateTime,
    pub paused_minutes: i64,
    pub reset: ResetOutcome,
}

/// A closed record whose stored minutes disagree with its timestamps.
#[derive(Debug, Clone)]
pub struct CheckIssue {
    /// 1-based position among the records.
    pub record_no: usize,
    pub stored: i64,
    pub expected: i64,
    pub line: String,
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    pub records: usize,
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compare every closed record's minutes with its timestamps.
pub fn check_ledger(ledger: &Ledger) -> CheckReport {
    let issues = ledger
        .records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let expected = record.recomputed_minutes()?;
            let stored = record.minutes?;
            ((stored.abs_diff(expected) as f64) > CHECK_TOLERANCE).then(|| CheckIssue {
                record_no: idx + 1,
                stored,
                expected,
                line: record.to_line(),
            })
        })
        .collect();

    CheckReport {
        records: ledger.len(),
        issues,
    }
}

/// Close `record` at `end`, merging what was given at start and at close.
pub fn close_record(
    record: &mut LedgerRecord,
    input: &SessionInput,
    end: NaiveDateTime,
) -> AppResult<Vec<MergeWarning>> {
    if end < record.start {
        return Err(AppError::EndBeforeStart {
            start: format_timestamp(&record.start),
            end: format_timestamp(&end),
        });
    }

    let mut warnings = Vec::new();

    let (labels, only_default) =
        merge_tags(&record.labels, &TagSet::from_option(input.labels.as_deref()));
    if only_default {
        warnings.push(MergeWarning::OnlyDefaultLabel);
    }

    let (projects, only_default) = merge_tags(
        &record.projects,
        &TagSet::from_option(input.projects.as_deref()),
    );
    if only_default {
        warnings.push(MergeWarning::OnlyDefaultProject);
    }

    let (description, missing) = merge_description(&record.description, input.description.as_deref());
    if missing {
        warnings.push(MergeWarning::NoDescription);
    }

    record.set_details(labels, projects, description);
    record.close_at(end);

    Ok(warnings)
}

/// Files and clock one command works against.
pub struct SessionLogic<'a> {
    client: &'a Client,
    ledger_path: PathBuf,
    marker: PauseMarker,
    backup: BackupGuard,
    clock: &'a dyn Clock,
}

impl<'a> SessionLogic<'a> {
    pub fn new(client: &'a Client, financial_dir: &Path, clock: &'a dyn Clock) -> Self {
        Self {
            client,
            ledger_path: client.ledger_path(financial_dir),
            marker: PauseMarker::new(client.pause_path(financial_dir)),
            backup: BackupGuard::new(client.backup_path(financial_dir)),
            clock,
        }
    }

    pub fn client(&self) -> &Client {
        self.client
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn marker(&self) -> &PauseMarker {
        &self.marker
    }

    pub fn backup_path(&self) -> &Path {
        self.backup.path()
    }

    fn state_of(&self, ledger: &Ledger) -> SessionState {
        let marker = self.marker.exists();
        if marker && ledger.open_session().is_none() {
            warn!(marker = %self.marker.path().display(), "pause marker without an open session");
        }
        SessionState::derive(ledger.open_session().is_some(), marker)
    }

    /// Current ledger and state, without touching anything.
    pub fn snapshot(&self) -> AppResult<(Ledger, SessionState)> {
        let ledger = load_ledger(&self.ledger_path)?;
        let state = self.state_of(&ledger);
        Ok((ledger, state))
    }

    fn write(&self, ledger: &Ledger) -> AppResult<()> {
        self.backup.snapshot(&self.ledger_path)?;
        save_ledger(&self.ledger_path, ledger)
    }

    /// Move an open session's start back by `delta` minutes, or a closed
    /// session's end forward by `delta` minutes and recompute its duration.
    fn shift_last(&self, ledger: &mut Ledger, delta: i64) -> AppResult<ResetOutcome> {
        let last = ledger
            .last_mut()
            .ok_or_else(|| AppError::EmptyLedger(self.ledger_path.clone()))?;
        let out_of_range = || {
            AppError::InvalidReset(format!(
                "a shift of {delta} minutes is outside the supported date range"
            ))
        };

        let Some(end) = last.end else {
            let start = delta
                .checked_neg()
                .and_then(|back| shift_minutes(last.start, back))
                .ok_or_else(out_of_range)?;
            last.set_start(start);
            return Ok(ResetOutcome::StartShifted { delta, start });
        };

        let new_end = shift_minutes(end, delta).ok_or_else(out_of_range)?;
        if new_end <= last.start {
            return Err(AppError::InvalidReset(format!(
                "moving the end of the last session ({}) by {} minutes would put it at {}, not after its start {}",
                format_timestamp(&end),
                delta,
                format_timestamp(&new_end),
                format_timestamp(&last.start)
            )));
        }
        last.close_at(new_end);

        Ok(ResetOutcome::EndShifted {
            delta,
            end: new_end,
            minutes: last.minutes.unwrap_or_default(),
        })
    }

    /// `NEW`: header-only ledger.
    pub fn create(&self) -> AppResult<PathBuf> {
        create_ledger(&self.ledger_path)?;
        debug!(client = %self.client.name, "ledger created");
        Ok(self.ledger_path.clone())
    }

    pub fn start(&self, input: &SessionInput) -> AppResult<Started> {
        input.validate()?;
        let (mut ledger, state) = self.snapshot()?;

        if state != SessionState::NoSession {
            return Err(AppError::SessionAlreadyOpen);
        }

        let removed_stale_marker = self.marker.exists();
        if removed_stale_marker {
            self.marker.remove()?;
        }

        let record = LedgerRecord::open(
            self.clock.now(),
            TagSet::from_option(input.labels.as_deref()),
            TagSet::from_option(input.projects.as_deref()),
            input.description.clone().unwrap_or_default().trim().to_string(),
        );
        ledger.push(record.clone());
        self.write(&ledger)?;

        debug!(client = %self.client.name, start = %format_timestamp(&record.start), "session started");
        Ok(Started {
            record,
            removed_stale_marker,
        })
    }

    pub fn end(&self, input: &SessionInput) -> AppResult<Ended> {
        input.validate()?;
        let (mut ledger, state) = self.snapshot()?;

        match state {
            SessionState::NoSession => return Err(AppError::NoOpenSession),
            SessionState::Paused => {
                return Err(AppError::SessionPaused(self.marker.path().to_path_buf()));
            }
            SessionState::Open => {}
        }

        let now = self.clock.now();
        let record = ledger
            .open_session_mut()
            .ok_or(AppError::NoOpenSession)?;
        let warnings = close_record(record, input, now)?;
        let record = record.clone();
        self.write(&ledger)?;

        for w in &warnings {
            debug!(client = %self.client.name, "{}", w.message());
        }
        let minutes = record.minutes.unwrap_or_default();
        debug!(client = %self.client.name, minutes, "session ended");

        Ok(Ended {
            record,
            minutes,
            warnings,
        })
    }

    pub fn pause(&self) -> AppResult<NaiveDateTime> {
        let (_, state) = self.snapshot()?;

        match state {
            SessionState::NoSession => Err(AppError::NoOpenSession),
            SessionState::Paused => Err(AppError::SessionPaused(self.marker.path().to_path_buf())),
            SessionState::Open => {
                let now = self.clock.now();
                self.marker.write(now)?;
                debug!(client = %self.client.name, at = %format_timestamp(&now), "session paused");
                Ok(now)
            }
        }
    }

    pub fn unpause(&self) -> AppResult<Unpaused> {
        let (mut ledger, state) = self.snapshot()?;

        match state {
            SessionState::NoSession => return Err(AppError::NoOpenSession),
            SessionState::Open => {
                return Err(AppError::NotPaused(self.marker.path().to_path_buf()));
            }
            SessionState::Paused => {}
        }

        let paused_at = self.marker.read()?;
        let now = self.clock.now();
        let mut paused_minutes = minutes_between(paused_at, now);
        if paused_minutes < 0 {
            warn!(paused_at = %format_timestamp(&paused_at), "pause marker lies in the future, ignoring it");
            paused_minutes = 0;
        }

        let reset = self.shift_last(&mut ledger, -paused_minutes)?;
        self.write(&ledger)?;
        self.marker.remove()?;

        debug!(client = %self.client.name, paused_minutes, "session unpaused");
        Ok(Unpaused {
            at: now,
            paused_minutes,
            reset,
        })
    }

    pub fn reset(&self, delta: i64) -> AppResult<ResetOutcome> {
        let (mut ledger, state) = self.snapshot()?;

        if ledger.is_empty() {
            return Err(AppError::EmptyLedger(self.ledger_path.clone()));
        }
        if state == SessionState::Paused {
            return Err(AppError::SessionPaused(self.marker.path().to_path_buf()));
        }

        let outcome = self.shift_last(&mut ledger, delta)?;

        if let ResetOutcome::StartShifted { start, .. } = &outcome
            && *start > self.clock.now()
        {
            warn!(start = %format_timestamp(start), "open session now starts in the future");
        }

        self.write(&ledger)?;
        debug!(client = %self.client.name, delta, "session reset");
        Ok(outcome)
    }

    pub fn check(&self) -> AppResult<CheckReport> {
        let (ledger, state) = self.snapshot()?;

        match state {
            SessionState::Open => Err(AppError::SessionAlreadyOpen),
            SessionState::Paused => Err(AppError::SessionPaused(self.marker.path().to_path_buf())),
            SessionState::NoSession => Ok(check_ledger(&ledger)),
        }
    }
}
