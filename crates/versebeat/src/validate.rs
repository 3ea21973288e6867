//! Rhythm validation.
//!
//! Problems are reported as data so callers can decide whether to proceed,
//! retry with a canned pattern, or warn the user.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{NoteDuration, REST_SYLLABLE_INDEX};

/// A single invariant violation, naming the offending entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RhythmIssue {
    #[error("entry {index}: duration must be positive, got {beats}")]
    NonPositiveBeats { index: usize, beats: f64 },

    #[error("entry {index}: rest must have syllable index -1, got {syllable_index}")]
    RestWithSyllable { index: usize, syllable_index: i32 },

    #[error("entry {index}: note must have a non-negative syllable index, got {syllable_index}")]
    NoteWithoutSyllable { index: usize, syllable_index: i32 },

    #[error("entry {index}: syllable {syllable_index} is out of order, expected {expected}")]
    SyllableOutOfOrder {
        index: usize,
        syllable_index: i32,
        expected: i32,
    },
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<RhythmIssue>) -> Self {
        ValidationResult {
            valid: issues.is_empty(),
            issues: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Check every entry for positive beats and consistent rest/syllable identity.
///
/// Empty input is valid. Never panics.
pub fn validate_rhythm(durations: &[NoteDuration]) -> ValidationResult {
    ValidationResult::from_issues(rhythm_issues(durations))
}

/// Structured form of [`validate_rhythm`].
pub fn rhythm_issues(durations: &[NoteDuration]) -> Vec<RhythmIssue> {
    let mut issues = Vec::new();

    for (index, entry) in durations.iter().enumerate() {
        // NaN fails this comparison too
        if !(entry.beats > 0.0) {
            issues.push(RhythmIssue::NonPositiveBeats {
                index,
                beats: entry.beats,
            });
        }

        if entry.is_rest && entry.syllable_index != REST_SYLLABLE_INDEX {
            issues.push(RhythmIssue::RestWithSyllable {
                index,
                syllable_index: entry.syllable_index,
            });
        }

        if !entry.is_rest && entry.syllable_index < 0 {
            issues.push(RhythmIssue::NoteWithoutSyllable {
                index,
                syllable_index: entry.syllable_index,
            });
        }
    }

    issues
}

/// Check that notes walk the syllables in order, starting from 0.
///
/// Consecutive entries with the same syllable are accepted, since measure
/// fitting splits one syllable into tied parts.
pub fn validate_syllable_order(durations: &[NoteDuration]) -> ValidationResult {
    let mut issues = Vec::new();
    let mut last: Option<i32> = None;

    for (index, entry) in durations.iter().enumerate().filter(|(_, e)| !e.is_rest) {
        let expected = last.map_or(0, |l| l + 1);
        let continues_split = last == Some(entry.syllable_index);
        if entry.syllable_index != expected && !continues_split {
            issues.push(RhythmIssue::SyllableOutOfOrder {
                index,
                syllable_index: entry.syllable_index,
                expected,
            });
        }
        last = Some(entry.syllable_index);
    }

    ValidationResult::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        let result = validate_rhythm(&[]);
        assert!(result.valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_well_formed_sequence() {
        let durations = vec![
            NoteDuration::note(0, 0.5),
            NoteDuration::rest(0.5),
            NoteDuration::note(1, 1.0),
        ];
        assert!(validate_rhythm(&durations).valid);
        assert!(validate_syllable_order(&durations).valid);
    }

    #[test]
    fn test_reports_each_problem() {
        let durations = vec![
            NoteDuration::note(0, 0.0),
            NoteDuration {
                syllable_index: 4,
                beats: 0.5,
                is_rest: true,
            },
            NoteDuration {
                syllable_index: -1,
                beats: -1.0,
                is_rest: false,
            },
            NoteDuration::note(3, f64::NAN),
        ];
        let result = validate_rhythm(&durations);
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 5);
        assert!(result.issues[0].starts_with("entry 0: duration must be positive"));
        assert!(result.issues[1].contains("rest must have syllable index -1"));
        assert!(result.issues.iter().any(|i| i.starts_with("entry 2: note must have")));
        assert!(result.issues[4].starts_with("entry 3"));
    }

    #[test]
    fn test_structured_issues() {
        let issues = rhythm_issues(&[NoteDuration::rest(-0.5)]);
        assert_eq!(
            issues,
            vec![RhythmIssue::NonPositiveBeats {
                index: 0,
                beats: -0.5
            }]
        );
    }

    #[test]
    fn test_syllable_order_allows_split_parts() {
        let durations = vec![
            NoteDuration::note(0, 3.0),
            NoteDuration::note(1, 1.0),
            NoteDuration::note(1, 1.0),
            NoteDuration::rest(2.0),
            NoteDuration::note(2, 1.0),
        ];
        assert!(validate_syllable_order(&durations).valid);
    }

    #[test]
    fn test_syllable_order_catches_gaps() {
        let durations = vec![NoteDuration::note(1, 1.0), NoteDuration::note(3, 1.0)];
        let result = validate_syllable_order(&durations);
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues[0].contains("expected 0"));
    }
}
