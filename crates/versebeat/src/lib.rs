//! Stress-to-rhythm mapping for sung lyrics.
//!
//! This crate turns a line's syllable stress pattern (`'0'` unstressed,
//! `'1'` primary, `'2'` secondary) into a sequence of note and rest
//! durations measured in beats, aware of the meter's strong beats and the
//! tempo. The result can then be split at barlines and padded so it fills
//! whole measures before a melody is written over it.
//!
//! # Example
//!
//! ```
//! use versebeat::{render_line, LineOptions, TimeSignature};
//!
//! let options = LineOptions {
//!     time_signature: TimeSignature::FourFour,
//!     breath_points: vec![3],
//!     ..LineOptions::default()
//! };
//!
//! let line = render_line("01010101", &options);
//! assert!(line.validation.valid);
//! assert_eq!(line.total_beats % 4.0, 0.0);
//! ```
//!
//! The individual stages are exposed too, for callers that need to step in
//! between them:
//!
//! ```
//! use versebeat::{fit_to_measure, map_line_to_rhythm, FitToMeasureOptions, TimeSignature};
//!
//! let rhythm = map_line_to_rhythm("1010", TimeSignature::ThreeFour, 100.0);
//! let fitted = fit_to_measure(&rhythm, 3.0, &FitToMeasureOptions::default());
//! assert!(fitted.len() >= rhythm.len());
//! ```

pub mod align;
pub mod breath;
pub mod duration;
pub mod fit;
pub mod line;
pub mod meter;
pub mod patterns;
pub mod pipeline;
pub mod stress;
pub mod types;
pub mod util;
pub mod validate;

use thiserror::Error;

pub use align::{align_stress_to_beats, MAX_NUDGE_BEATS};
pub use breath::{insert_breath_rests, DEFAULT_BREATH_REST_BEATS};
pub use duration::{stress_to_note_duration, DurationModel, HeuristicDurationModel};
pub use fit::{fit_to_measure, FitToMeasureOptions, BEAT_EPSILON};
pub use line::{map_line_to_rhythm, map_line_to_rhythm_with, DEFAULT_TEMPO};
pub use meter::{
    beats_to_seconds, create_rhythm_context, get_strong_beats, is_strong_beat, RhythmContext,
    TimeSignature,
};
pub use patterns::{create_foot_rhythm, create_iambic_rhythm, create_trochaic_rhythm};
pub use pipeline::{render_line, render_line_with, LineOptions, LineRhythm};
pub use stress::{detect_foot, FootDetection, FootType, StressLevel, StressPattern};
pub use types::{NoteDuration, REST_SYLLABLE_INDEX};
pub use util::{calculate_total_duration, count_measures, durations_to_beats};
pub use validate::{
    rhythm_issues, validate_rhythm, validate_syllable_order, RhythmIssue, ValidationResult,
};

/// Errors from the parsing and configuration seams.
///
/// The mapping operations themselves never fail; bad input falls back to a
/// defined default and shows up in validation instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RhythmError {
    #[error("unsupported time signature: {0:?} (expected 4/4, 3/4, 6/8 or 2/4)")]
    UnsupportedTimeSignature(String),

    #[error("invalid stress mark {found:?} at syllable {index}")]
    InvalidStress { index: usize, found: char },

    #[error("invalid duration policy: {0}")]
    InvalidPolicy(String),
}
