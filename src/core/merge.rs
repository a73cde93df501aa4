//! Combine what was given at `start` with what is given at `end`.

use crate::models::tags::{DEFAULT_TAG, TagSet};

/// Non-fatal findings while merging, reported to the user by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeWarning {
    OnlyDefaultLabel,
    OnlyDefaultProject,
    NoDescription,
}

impl MergeWarning {
    pub fn message(&self) -> &'static str {
        match self {
            MergeWarning::OnlyDefaultLabel => {
                "Got only the default label at the beginning and end of session."
            }
            MergeWarning::OnlyDefaultProject => {
                "Got only the default project at the beginning and end of session."
            }
            MergeWarning::NoDescription => "Did not get session description.",
        }
    }
}

/// Union of both sets. The sentinel is dropped as soon as a real value is
/// present; a union of nothing but the sentinel is kept and flagged.
/// Returns the merged set and whether it holds only the sentinel.
pub fn merge_tags(existing: &TagSet, supplied: &TagSet) -> (TagSet, bool) {
    let mut all = existing.union(supplied);

    if all.is_empty() {
        return (TagSet::default_tags(), true);
    }
    if all.is_default_only() {
        return (all, true);
    }
    if all.len() > 1 {
        all.remove(DEFAULT_TAG);
    }
    (all, false)
}

/// `"<start> + <end>"`, or whichever side is non-empty.
/// Returns the text and whether both sides were empty.
pub fn merge_description(existing: &str, supplied: Option<&str>) -> (String, bool) {
    let existing = existing.trim();
    let supplied = supplied.map(str::trim).unwrap_or_default();

    match (existing.is_empty(), supplied.is_empty()) {
        (true, true) => (String::new(), true),
        (false, true) => (existing.to_string(), false),
        (true, false) => (supplied.to_string(), false),
        (false, false) => (format!("{existing} + {supplied}"), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(s: &str) -> TagSet {
        TagSet::parse(s)
    }

    #[test]
    fn default_on_both_ends_warns_and_keeps_sentinel() {
        let (merged, only_default) = merge_tags(&tags("MISC"), &tags("MISC"));
        assert!(only_default);
        assert_eq!(merged.to_string(), "MISC");
    }

    #[test]
    fn real_label_at_end_drops_sentinel() {
        let (merged, only_default) = merge_tags(&tags("MISC"), &tags("CODE"));
        assert!(!only_default);
        assert_eq!(merged.to_string(), "CODE");
    }

    #[test]
    fn real_label_at_start_survives_default_end() {
        let (merged, only_default) = merge_tags(&tags("CODE,LEARN"), &tags("MISC"));
        assert!(!only_default);
        assert!(merged.same_members(&tags("CODE,LEARN")));
    }

    #[test]
    fn union_of_real_labels() {
        let (merged, _) = merge_tags(&tags("CODE"), &tags("LEARN,CODE"));
        assert_eq!(merged.to_string(), "CODE,LEARN");
    }

    #[test]
    fn empty_cells_fall_back_to_sentinel() {
        let (merged, only_default) = merge_tags(&tags(""), &tags(""));
        assert!(only_default);
        assert!(merged.is_default_only());
    }

    #[test]
    fn descriptions_are_joined() {
        assert_eq!(
            merge_description("setup", Some("tests")),
            ("setup + tests".to_string(), false)
        );
        assert_eq!(merge_description("", Some("tests")), ("tests".into(), false));
        assert_eq!(merge_description("setup", None), ("setup".into(), false));
        assert_eq!(merge_description("", None), (String::new(), true));
        assert_eq!(merge_description("  ", Some("")), (String::new(), true));
    }
}
