use super::record::LedgerRecord;
use crate::errors::{AppError, AppResult};

/// First line of every ledger file.
pub const HEADER: &str = "Starting time;Labels;Projects;Description;Ending time;Minutes;";

/// All sessions of one client, in file order.
///
/// Invariant: only the last record may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub records: Vec<LedgerRecord>,
}

impl Ledger {
    pub fn parse(content: &str) -> AppResult<Self> {
        let mut lines = content.lines().enumerate();

        match lines.next() {
            None => return Ok(Self::default()),
            Some((_, first)) if first.trim_end() == HEADER => {}
            Some((_, first)) if first.trim().is_empty() && content.trim().is_empty() => {
                return Ok(Self::default());
            }
            Some((_, first)) => {
                return Err(AppError::MalformedRecord {
                    line: 1,
                    reason: format!("unexpected header '{first}'"),
                });
            }
        }

        let mut records: Vec<LedgerRecord> = Vec::new();
        let mut open_line: Option<usize> = None;

        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;

            if let Some(open_no) = open_line {
                return Err(AppError::MalformedRecord {
                    line: open_no,
                    reason: "open session is not the last record".into(),
                });
            }

            let record = LedgerRecord::parse(line, line_no)?;
            if record.is_open() {
                open_line = Some(line_no);
            }
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Full file contents: header, one line per record, trailing newline.
    pub fn to_text(&self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for record in &self.records {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn last(&self) -> Option<&LedgerRecord> {
        self.records.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut LedgerRecord> {
        self.records.last_mut()
    }

    pub fn open_session(&self) -> Option<&LedgerRecord> {
        self.last().filter(|r| r.is_open())
    }

    pub fn open_session_mut(&mut self) -> Option<&mut LedgerRecord> {
        self.last_mut().filter(|r| r.is_open())
    }

    pub fn push(&mut self, record: LedgerRecord) {
        self.records.push(record);
    }

    /// Sum of stored minutes; open sessions count as zero.
    pub fn total_minutes(&self) -> i64 {
        self.records.iter().filter_map(|r| r.minutes).sum()
    }
}
