//! Best-effort alignment of primary stresses with strong beats.

use tracing::debug;

use crate::fit::BEAT_EPSILON;
use crate::meter::{is_strong_beat, TimeSignature};
use crate::stress::{StressLevel, StressPattern};
use crate::types::NoteDuration;

/// Largest lengthening applied to a single entry.
pub const MAX_NUDGE_BEATS: f64 = 1.0;

/// Nudge primary-stressed syllables onto strong beats.
///
/// A syllable lands on the beat its onset falls within, the same way the
/// line mapper assigns positions. When a primary stress lands on a weak
/// beat, the entry before it is lengthened so the stress starts on the next
/// strong beat, provided that takes at most [`MAX_NUDGE_BEATS`]. Farther
/// stresses are left alone, so alignment is not guaranteed. Already-aligned
/// input comes back unchanged.
pub fn align_stress_to_beats(
    durations: &[NoteDuration],
    stress_pattern: &str,
    time_signature: TimeSignature,
) -> Vec<NoteDuration> {
    let stresses = StressPattern::lenient(stress_pattern);
    let mut result = durations.to_vec();
    let mut onset = 0.0_f64;

    for i in 0..result.len() {
        let entry = result[i];
        let is_primary = entry
            .syllable()
            .and_then(|s| stresses.get(s))
            .is_some_and(|level| level == StressLevel::Primary);
        // Only the first part of a split syllable carries its stress
        let continues_split = i > 0
            && !result[i - 1].is_rest
            && result[i - 1].syllable_index == entry.syllable_index;

        if is_primary
            && !continues_split
            && i > 0
            && !lands_on_strong_beat(onset, time_signature)
        {
            let gap = next_strong_beat(onset, time_signature) - onset;
            if gap <= MAX_NUDGE_BEATS + BEAT_EPSILON {
                debug!(
                    syllable = entry.syllable_index,
                    onset,
                    gap,
                    "nudging primary stress onto strong beat"
                );
                result[i - 1].beats += gap;
                onset += gap;
            }
        }

        onset += result[i].beats;
    }

    result
}

fn lands_on_strong_beat(onset: f64, time_signature: TimeSignature) -> bool {
    // Snap onsets sitting within epsilon below a beat boundary
    let beat = (onset + BEAT_EPSILON).floor().max(0.0) as u64;
    let wrapped = beat % time_signature.beats_per_measure() as u64;
    is_strong_beat(wrapped as u32, time_signature)
}

/// First strong beat boundary strictly after `onset`.
fn next_strong_beat(onset: f64, time_signature: TimeSignature) -> f64 {
    let measure = time_signature.beats_per_measure() as f64;
    let measure_start = (onset / measure).floor() * measure;

    [measure_start, measure_start + measure]
        .into_iter()
        .flat_map(|start| {
            time_signature
                .strong_beats()
                .iter()
                .map(move |&beat| start + beat as f64)
        })
        .find(|&boundary| boundary > onset + BEAT_EPSILON)
        .unwrap_or(measure_start + measure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{map_line_to_rhythm, DEFAULT_TEMPO};
    use crate::util::durations_to_beats;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_already_aligned_is_unchanged() {
        let input = vec![
            NoteDuration::note(0, 2.0),
            NoteDuration::note(1, 2.0),
            NoteDuration::note(2, 1.0),
        ];
        let aligned = align_stress_to_beats(&input, "101", TimeSignature::FourFour);
        assert_eq!(aligned, input);
    }

    #[test]
    fn test_iambic_line_last_stress_nudged() {
        let rhythm = map_line_to_rhythm("01010101", TimeSignature::FourFour, DEFAULT_TEMPO);
        let aligned = align_stress_to_beats(&rhythm, "01010101", TimeSignature::FourFour);
        // Only the final stress starts on a weak beat (5.75)
        assert_eq!(
            durations_to_beats(&aligned),
            vec![0.5, 1.25, 0.5, 1.25, 0.5, 1.25, 0.75, 1.0]
        );
    }

    #[test]
    fn test_nudges_weak_beat_stress() {
        let input = vec![
            NoteDuration::note(0, 1.0),
            NoteDuration::note(1, 1.0),
            NoteDuration::note(2, 2.0),
        ];
        let aligned = align_stress_to_beats(&input, "010", TimeSignature::FourFour);
        assert_eq!(durations_to_beats(&aligned), vec![2.0, 1.0, 2.0]);
        assert_eq!(durations_to_beats(&input), vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_gives_up_on_far_strong_beat() {
        let input = vec![NoteDuration::note(0, 1.0), NoteDuration::note(1, 1.0)];
        let aligned = align_stress_to_beats(&input, "01", TimeSignature::ThreeFour);
        assert_eq!(aligned, input);
    }

    #[test]
    fn test_rest_before_stress_absorbs_nudge() {
        let input = vec![
            NoteDuration::note(0, 0.5),
            NoteDuration::rest(0.5),
            NoteDuration::note(1, 1.0),
            NoteDuration::note(2, 1.0),
        ];
        let aligned = align_stress_to_beats(&input, "001", TimeSignature::TwoFour);
        // Syllable 2 starts at beat 2 (strong in 2/4), nothing to do
        assert_eq!(aligned, input);

        let aligned = align_stress_to_beats(&input, "010", TimeSignature::FourFour);
        // Syllable 1 starts at beat 1, the rest grows by one beat
        assert_eq!(aligned[1], NoteDuration::rest(1.5));
    }

    #[test]
    fn test_split_continuations_are_not_nudged() {
        let input = vec![
            NoteDuration::note(0, 1.0),
            NoteDuration::note(1, 3.0),
            NoteDuration::note(1, 1.0),
        ];
        let aligned = align_stress_to_beats(&input, "01", TimeSignature::FourFour);
        // The first part of syllable 1 moves to beat 2; its tail is untouched
        assert_eq!(durations_to_beats(&aligned), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_next_strong_beat() {
        assert_eq!(next_strong_beat(0.5, TimeSignature::FourFour), 2.0);
        assert_eq!(next_strong_beat(2.0, TimeSignature::FourFour), 4.0);
        assert_eq!(next_strong_beat(4.0, TimeSignature::SixEight), 6.0);
        assert_eq!(next_strong_beat(7.0, TimeSignature::SixEight), 9.0);
    }
}
