use super::tags::TagSet;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_timestamp, minutes_between, parse_timestamp};
use chrono::NaiveDateTime;

/// Column delimiter of ledger files.
pub const CSV_DELIM: char = ';';

/// Number of columns in a record line, not counting the trailing delimiter.
pub const FIELD_COUNT: usize = 6;

/// One work session, one ledger line:
/// `start;labels;projects;description;end;minutes;`
///
/// A parsed record keeps its line and writes it back untouched until one of
/// `set_start`, `set_details` or `close_at` changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub start: NaiveDateTime,
    pub labels: TagSet,
    pub projects: TagSet,
    pub description: String,
    /// `None` while the session is open.
    pub end: Option<NaiveDateTime>,
    /// `None` while the session is open.
    pub minutes: Option<i64>,
    source: Option<String>,
}

impl LedgerRecord {
    pub fn open(start: NaiveDateTime, labels: TagSet, projects: TagSet, description: String) -> Self {
        Self {
            start,
            labels,
            projects,
            description,
            end: None,
            minutes: None,
            source: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Minutes derived from the stored timestamps, `None` for open sessions.
    pub fn recomputed_minutes(&self) -> Option<i64> {
        self.end.map(|end| minutes_between(self.start, end))
    }

    /// Set the end and the matching duration.
    pub fn close_at(&mut self, end: NaiveDateTime) {
        self.end = Some(end);
        self.minutes = Some(minutes_between(self.start, end));
        self.source = None;
    }

    /// Move the start; the stored duration is left alone.
    pub fn set_start(&mut self, start: NaiveDateTime) {
        self.start = start;
        self.source = None;
    }

    pub fn set_details(&mut self, labels: TagSet, projects: TagSet, description: String) {
        self.labels = labels;
        self.projects = projects;
        self.description = description;
        self.source = None;
    }

    /// Parse one line. `line_no` is 1-based and only used for error messages.
    pub fn parse(line: &str, line_no: usize) -> AppResult<Self> {
        let malformed = |reason: String| AppError::MalformedRecord {
            line: line_no,
            reason,
        };

        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields: Vec<&str> = line.split(CSV_DELIM).collect();

        // A well-formed line ends with the delimiter, leaving one empty field.
        match fields.pop() {
            Some("") => {}
            _ => return Err(malformed("missing trailing ';'".into())),
        }
        if fields.len() != FIELD_COUNT {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let start = parse_timestamp(fields[0])
            .map_err(|_| malformed(format!("invalid starting time '{}'", fields[0])))?;

        let end = match fields[4] {
            "" => None,
            raw => Some(
                parse_timestamp(raw)
                    .map_err(|_| malformed(format!("invalid ending time '{raw}'")))?,
            ),
        };

        let minutes = match fields[5].trim() {
            "" => None,
            raw => {
                let m: i64 = raw
                    .parse()
                    .map_err(|_| malformed(format!("invalid minutes '{raw}'")))?;
                if m < 0 {
                    return Err(malformed(format!("negative minutes '{raw}'")));
                }
                Some(m)
            }
        };

        if end.is_some() != minutes.is_some() {
            return Err(malformed(
                "ending time and minutes must be both set or both empty".into(),
            ));
        }

        Ok(Self {
            start,
            labels: TagSet::parse(fields[1]),
            projects: TagSet::parse(fields[2]),
            description: fields[3].to_string(),
            end,
            minutes,
            source: Some(line.to_string()),
        })
    }

    /// Serialize to a ledger line (without line terminator).
    pub fn to_line(&self) -> String {
        if let Some(line) = &self.source {
            return line.clone();
        }

        let end = self.end.as_ref().map(format_timestamp).unwrap_or_default();
        let minutes = self.minutes.map(|m| m.to_string()).unwrap_or_default();

        let mut line = String::new();
        for field in [
            format_timestamp(&self.start),
            self.labels.to_string(),
            self.projects.to_string(),
            self.description.clone(),
            end,
            minutes,
        ] {
            line.push_str(&field);
            line.push(CSV_DELIM);
        }
        line
    }
}

/// Reject free text that would break the line format.
pub fn validate_field(field: &'static str, value: &str) -> AppResult<()> {
    if value.contains(CSV_DELIM) || value.contains(['\n', '\r']) {
        return Err(AppError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED: &str = "01.03.2024 09:00;CODE,LEARN;ProjA;fixed parser;01.03.2024 10:30;90;";
    const OPEN: &str = "02.03.2024 08:15;MISC;MISC;;;;";

    #[test]
    fn parse_closed_record() {
        let rec = LedgerRecord::parse(CLOSED, 2).unwrap();
        assert_eq!(rec.labels.to_string(), "CODE,LEARN");
        assert_eq!(rec.projects.to_string(), "ProjA");
        assert_eq!(rec.description, "fixed parser");
        assert_eq!(rec.minutes, Some(90));
        assert_eq!(rec.recomputed_minutes(), Some(90));
        assert!(!rec.is_open());
    }

    #[test]
    fn parse_open_record() {
        let rec = LedgerRecord::parse(OPEN, 3).unwrap();
        assert!(rec.is_open());
        assert_eq!(rec.minutes, None);
        assert_eq!(rec.description, "");
    }

    #[test]
    fn lines_roundtrip() {
        for line in [CLOSED, OPEN] {
            assert_eq!(LedgerRecord::parse(line, 1).unwrap().to_line(), line);
        }
    }

    #[test]
    fn unchanged_lines_keep_their_spelling() {
        for line in [
            "01.03.2024 09:00;CODE, LEARN;ProjA;;01.03.2024 10:30;90;",
            "01.03.2024 09:00;A,A;P,,Q;x;01.03.2024 10:30; 90;",
        ] {
            assert_eq!(LedgerRecord::parse(line, 1).unwrap().to_line(), line);
        }

        let rec = LedgerRecord::parse("01.03.2024 09:00;CODE, LEARN;A,A;;;;", 1).unwrap();
        assert_eq!(rec.labels.to_string(), "CODE,LEARN");
        assert_eq!(rec.projects.len(), 1);
    }

    #[test]
    fn edits_render_normalized_cells() {
        let mut rec = LedgerRecord::parse("01.03.2024 09:00;CODE, LEARN;A,A;;;;", 1).unwrap();
        rec.close_at(parse_timestamp("01.03.2024 10:00").unwrap());
        assert_eq!(rec.to_line(), "01.03.2024 09:00;CODE,LEARN;A;;01.03.2024 10:00;60;");

        let mut rec = LedgerRecord::parse(OPEN, 1).unwrap();
        rec.set_start(parse_timestamp("02.03.2024 08:00").unwrap());
        assert_eq!(rec.to_line(), "02.03.2024 08:00;MISC;MISC;;;;");
    }

    #[test]
    fn tolerates_crlf() {
        let rec = LedgerRecord::parse(&format!("{CLOSED}\r\n"), 1).unwrap();
        assert_eq!(rec.to_line(), CLOSED);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = LedgerRecord::parse("01.03.2024 09:00;CODE;ProjA;;01.03.2024 10:00;", 7)
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { line: 7, .. }));
    }

    #[test]
    fn rejects_missing_trailing_delimiter() {
        let line = CLOSED.trim_end_matches(';');
        assert!(matches!(
            LedgerRecord::parse(line, 2),
            Err(AppError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_half_open_record() {
        let line = "01.03.2024 09:00;CODE;ProjA;;;90;";
        assert!(LedgerRecord::parse(line, 2).is_err());
    }

    #[test]
    fn rejects_bad_minutes() {
        let line = "01.03.2024 09:00;CODE;ProjA;;01.03.2024 10:00;sixty;";
        assert!(LedgerRecord::parse(line, 2).is_err());
    }

    #[test]
    fn close_at_computes_minutes() {
        let mut rec = LedgerRecord::parse(OPEN, 1).unwrap();
        rec.close_at(parse_timestamp("02.03.2024 09:00").unwrap());
        assert_eq!(rec.minutes, Some(45));
    }

    #[test]
    fn validate_field_rejects_delimiters() {
        assert!(validate_field("description", "a;b").is_err());
        assert!(validate_field("description", "a\nb").is_err());
        assert!(validate_field("description", "a, b + c").is_ok());
    }
}
