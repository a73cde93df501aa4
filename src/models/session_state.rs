use std::fmt;

/// Where a client's ledger stands between two commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ledger empty, or every record closed.
    NoSession,
    /// Last record open, no pause marker.
    Open,
    /// Last record open and pause marker present.
    Paused,
}

impl SessionState {
    pub fn derive(has_open_record: bool, marker_exists: bool) -> Self {
        match (has_open_record, marker_exists) {
            (false, _) => SessionState::NoSession,
            (true, false) => SessionState::Open,
            (true, true) => SessionState::Paused,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NoSession => "no open session",
            SessionState::Open => "session open",
            SessionState::Paused => "session paused",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
