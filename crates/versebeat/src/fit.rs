//! Measure fitting: greedy packing of a duration sequence into fixed-size
//! measures, splitting notes at barlines and padding the last measure.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::NoteDuration;
use crate::util::calculate_total_duration;

/// Tolerance for beat arithmetic.
pub const BEAT_EPSILON: f64 = 1e-9;

/// Rounds of last-entry correction when closing the final measure.
const MAX_CORRECTIONS: usize = 8;

/// How leftover beats at measure boundaries are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitToMeasureOptions {
    /// Close an incomplete final measure with a rest.
    #[serde(default = "default_true")]
    pub pad_with_rests: bool,
    /// Cut notes that cross a barline into tied parts.
    #[serde(default = "default_true")]
    pub allow_split_notes: bool,
    /// Hint for callers: nudge primary stresses onto strong beats before
    /// fitting. The capacity arithmetic here ignores it.
    #[serde(default)]
    pub preserve_stress_alignment: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FitToMeasureOptions {
    fn default() -> Self {
        FitToMeasureOptions {
            pad_with_rests: true,
            allow_split_notes: true,
            preserve_stress_alignment: false,
        }
    }
}

impl From<&verseconf::FitConfig> for FitToMeasureOptions {
    fn from(config: &verseconf::FitConfig) -> Self {
        FitToMeasureOptions {
            pad_with_rests: config.pad_with_rests,
            allow_split_notes: config.allow_split_notes,
            preserve_stress_alignment: config.preserve_stress_alignment,
        }
    }
}

/// Pack `durations` into measures of `beats_per_measure` beats.
///
/// A non-positive capacity or an empty input returns the input unchanged.
/// With default options the result's total is an exact multiple of the
/// capacity. Without splitting, a note that overflows a measure is kept
/// whole and the next measure starts from the overflow. Entries whose beats
/// are not finite are passed through untouched and take no room, so the
/// validator still sees them.
pub fn fit_to_measure(
    durations: &[NoteDuration],
    beats_per_measure: f64,
    options: &FitToMeasureOptions,
) -> Vec<NoteDuration> {
    if durations.is_empty() || !(beats_per_measure.is_finite() && beats_per_measure > 0.0) {
        return durations.to_vec();
    }

    let capacity = beats_per_measure;
    let mut result = Vec::with_capacity(durations.len() + 2);
    let mut fill = 0.0_f64;
    let mut splits = 0usize;

    for entry in durations {
        if !entry.beats.is_finite() {
            debug!(
                syllable = entry.syllable_index,
                beats = entry.beats,
                "passing through non-finite duration"
            );
            result.push(*entry);
            continue;
        }

        if !options.allow_split_notes {
            result.push(*entry);
            fill = wrap_fill(fill + entry.beats, capacity);
            continue;
        }

        // Zero or negative entries are passed through for the validator to report
        if entry.beats <= BEAT_EPSILON {
            result.push(*entry);
            continue;
        }

        let mut remaining = entry.beats;
        while remaining > BEAT_EPSILON {
            let space = capacity - fill;
            if remaining <= space + BEAT_EPSILON {
                result.push(entry.with_beats(remaining));
                fill = wrap_fill(fill + remaining, capacity);
                break;
            }

            result.push(entry.with_beats(space));
            remaining -= space;
            fill = 0.0;
            splits += 1;
        }
    }

    let padded = if options.pad_with_rests {
        close_last_measure(&mut result, capacity)
    } else {
        0.0
    };

    debug!(
        input = durations.len(),
        output = result.len(),
        splits,
        padded,
        capacity,
        "fitted rhythm to measures"
    );

    result
}

/// Make the summed beats an exact multiple of `capacity`, returning the
/// length of the padding rest (0 when none was added).
///
/// The target comes from the output's own total rather than the running
/// fill, so accumulated float error is absorbed instead of left behind. A
/// total within epsilon of a barline is snapped onto it by adjusting the
/// last entry.
fn close_last_measure(result: &mut Vec<NoteDuration>, capacity: f64) -> f64 {
    let total = calculate_total_duration(result);
    if !total.is_finite() || total <= BEAT_EPSILON {
        return 0.0;
    }

    let measures = (total / capacity - BEAT_EPSILON).ceil().max(0.0);
    let target = measures * capacity;
    let gap = target - total;

    let padded = if gap > BEAT_EPSILON {
        result.push(NoteDuration::rest(gap));
        gap
    } else {
        0.0
    };

    // The sum is taken left to right, so correct the last entry until that
    // exact sum lands on the target.
    for _ in 0..MAX_CORRECTIONS {
        let sum = calculate_total_duration(result);
        if sum == target {
            break;
        }
        if let Some(last) = result.last_mut() {
            last.beats += target - sum;
        }
    }

    padded
}

/// Position within the current measure after adding beats, snapping values
/// within epsilon of a barline to the barline.
fn wrap_fill(fill: f64, capacity: f64) -> f64 {
    let wrapped = fill.rem_euclid(capacity);
    if wrapped < BEAT_EPSILON || capacity - wrapped < BEAT_EPSILON {
        0.0
    } else {
        wrapped
    }
}
