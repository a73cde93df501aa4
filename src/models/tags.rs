//! Label/project sets as stored in a ledger cell ("CODE,LEARN").

use serde::Serialize;
use std::fmt;

/// Inner delimiter of multi-valued cells.
pub const SET_DELIM: char = ',';

/// Placeholder used when no real label or project was given.
pub const DEFAULT_TAG: &str = "MISC";

/// Insertion-ordered set of labels or projects.
///
/// Order is kept so that a parsed cell serializes back to the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn parse(cell: &str) -> Self {
        let mut set = TagSet::default();
        for tag in cell.split(SET_DELIM) {
            set.insert(tag);
        }
        set
    }

    /// The sentinel set `{MISC}`.
    pub fn default_tags() -> Self {
        TagSet(vec![DEFAULT_TAG.to_string()])
    }

    /// Cell text for a CLI option; a missing option means the sentinel.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) if !TagSet::parse(v).is_empty() => TagSet::parse(v),
            _ => TagSet::default_tags(),
        }
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        before != self.0.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn union(&self, other: &TagSet) -> TagSet {
        let mut out = self.clone();
        for tag in other.iter() {
            out.insert(tag);
        }
        out
    }

    /// True for exactly `{MISC}`.
    pub fn is_default_only(&self) -> bool {
        self.0.len() == 1 && self.0[0] == DEFAULT_TAG
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Same members regardless of order.
    pub fn same_members(&self, other: &TagSet) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(&SET_DELIM.to_string()))
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TagSet::default();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
