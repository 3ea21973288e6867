//! Line mapper: a whole stress pattern to a beat-aware duration sequence.

use tracing::trace;

use crate::duration::{DurationModel, HeuristicDurationModel};
use crate::meter::{create_rhythm_context, TimeSignature};
use crate::stress::StressLevel;
use crate::types::NoteDuration;

/// Tempo used when the analyzer didn't suggest one.
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Map a stress pattern to durations with the default heuristic model.
///
/// One entry per character, `syllable_index` equal to the character's
/// position. Each syllable sees the beat position reached by the durations
/// before it, so alternating stress turns into alternating short/long notes
/// that fall against the meter's strong beats.
pub fn map_line_to_rhythm(
    stress_pattern: &str,
    time_signature: TimeSignature,
    tempo: f64,
) -> Vec<NoteDuration> {
    map_line_to_rhythm_with(&HeuristicDurationModel::default(), stress_pattern, time_signature, tempo)
}

/// Map a stress pattern to durations with a caller-supplied model.
pub fn map_line_to_rhythm_with(
    model: &dyn DurationModel,
    stress_pattern: &str,
    time_signature: TimeSignature,
    tempo: f64,
) -> Vec<NoteDuration> {
    let beats_per_measure = time_signature.beats_per_measure();
    let mut consumed = 0.0_f64;

    stress_pattern
        .chars()
        .enumerate()
        .map(|(index, c)| {
            let position = (consumed.floor() as u64 % beats_per_measure as u64) as u32;
            let context = create_rhythm_context(time_signature, tempo, position);
            let beats = model.duration(StressLevel::from_char(c), &context);
            trace!(index, stress = %c, position, beats, "mapped syllable");

            consumed += beats;
            NoteDuration::note(index, beats)
        })
        .collect()
}
