//! Canned foot rhythms, used as reference patterns or as a fallback when the
//! analyzer has no stress pattern for a line.

use crate::meter::TimeSignature;
use crate::stress::FootType;
use crate::types::NoteDuration;

/// Per-syllable beats for one foot.
///
/// Meters that group in threes (3/4, 6/8) get three-beat feet; the others
/// get two-beat feet, so two feet fill a 4/4 measure and one fills 2/4.
fn foot_beats(foot: FootType, time_signature: TimeSignature) -> &'static [f64] {
    let triple = time_signature.beats_per_measure() % 3 == 0;
    match (foot, triple) {
        (FootType::Iambic, false) => &[0.5, 1.5],
        (FootType::Iambic, true) => &[1.0, 2.0],
        (FootType::Trochaic, false) => &[1.5, 0.5],
        (FootType::Trochaic, true) => &[2.0, 1.0],
        (FootType::Anapestic, false) => &[0.5, 0.5, 1.0],
        (FootType::Anapestic, true) => &[0.5, 0.5, 2.0],
        (FootType::Dactylic, false) => &[1.0, 0.5, 0.5],
        (FootType::Dactylic, true) => &[2.0, 0.5, 0.5],
    }
}

/// Repeat a foot's rhythm across `syllable_count` syllables.
///
/// A count that isn't a whole number of feet ends partway through a foot.
pub fn create_foot_rhythm(
    foot: FootType,
    syllable_count: usize,
    time_signature: TimeSignature,
) -> Vec<NoteDuration> {
    let beats = foot_beats(foot, time_signature);
    let per_foot = foot.syllables_per_foot();
    (0..syllable_count)
        .map(|i| NoteDuration::note(i, beats[i % per_foot]))
        .collect()
}

/// Alternating short-long rhythm. Defaults to 4/4.
pub fn create_iambic_rhythm(
    syllable_count: usize,
    time_signature: Option<TimeSignature>,
) -> Vec<NoteDuration> {
    create_foot_rhythm(FootType::Iambic, syllable_count, time_signature.unwrap_or_default())
}

/// Alternating long-short rhythm. Defaults to 4/4.
pub fn create_trochaic_rhythm(
    syllable_count: usize,
    time_signature: Option<TimeSignature>,
) -> Vec<NoteDuration> {
    create_foot_rhythm(FootType::Trochaic, syllable_count, time_signature.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{calculate_total_duration, durations_to_beats};
    use crate::validate::validate_rhythm;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iambic_alternates_short_long() {
        let rhythm = create_iambic_rhythm(8, None);
        assert_eq!(rhythm.len(), 8);
        for pair in rhythm.chunks(2) {
            assert!(pair[0].beats < pair[1].beats);
        }
        // Four feet of two beats each: two full 4/4 measures
        assert_eq!(calculate_total_duration(&rhythm), 8.0);
        assert!(validate_rhythm(&rhythm).valid);
    }

    #[test]
    fn test_trochaic_alternates_long_short() {
        let rhythm = create_trochaic_rhythm(5, Some(TimeSignature::ThreeFour));
        assert_eq!(durations_to_beats(&rhythm), vec![2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_six_eight_feet_fill_half_measures() {
        let rhythm = create_iambic_rhythm(4, Some(TimeSignature::SixEight));
        assert_eq!(calculate_total_duration(&rhythm), 6.0);
    }

    #[test]
    fn test_triple_feet() {
        let anapest = create_foot_rhythm(FootType::Anapestic, 6, TimeSignature::FourFour);
        assert_eq!(durations_to_beats(&anapest), vec![0.5, 0.5, 1.0, 0.5, 0.5, 1.0]);

        let dactyl = create_foot_rhythm(FootType::Dactylic, 3, TimeSignature::ThreeFour);
        assert_eq!(durations_to_beats(&dactyl), vec![2.0, 0.5, 0.5]);
    }

    #[test]
    fn test_foot_tables_match_templates() {
        for ts in TimeSignature::all() {
            for foot in FootType::all() {
                let beats = foot_beats(foot, ts);
                assert_eq!(beats.len(), foot.syllables_per_foot(), "{foot:?} in {ts}");
                // The stressed syllable of each foot gets the longest note
                let longest = beats.iter().cloned().fold(f64::MIN, f64::max);
                for (&stressed, &b) in foot.template().iter().zip(beats) {
                    assert_eq!(stressed, b == longest, "{foot:?} in {ts}");
                }
            }
        }
    }

    #[test]
    fn test_zero_syllables() {
        assert!(create_iambic_rhythm(0, None).is_empty());
        assert!(create_trochaic_rhythm(0, Some(TimeSignature::TwoFour)).is_empty());
    }

    #[test]
    fn test_syllable_indices() {
        let rhythm = create_trochaic_rhythm(4, None);
        let indices: Vec<i32> = rhythm.iter().map(|n| n.syllable_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(rhythm.iter().all(|n| !n.is_rest));
    }
}
