//! Totals and projections over duration sequences.

use crate::types::NoteDuration;

/// Sum of all beats, rests included.
pub fn calculate_total_duration(durations: &[NoteDuration]) -> f64 {
    durations.iter().map(|d| d.beats).sum()
}

/// Number of measures the sequence spans, possibly fractional.
///
/// For reporting only. A non-positive capacity yields 0.
pub fn count_measures(durations: &[NoteDuration], beats_per_measure: f64) -> f64 {
    if !(beats_per_measure.is_finite() && beats_per_measure > 0.0) {
        return 0.0;
    }
    calculate_total_duration(durations) / beats_per_measure
}

/// The beats of each entry, in order.
pub fn durations_to_beats(durations: &[NoteDuration]) -> Vec<f64> {
    durations.iter().map(|d| d.beats).collect()
}
