//! Breath rests spliced in after chosen syllables.

use tracing::debug;

use crate::types::NoteDuration;

/// Default breath rest length in beats.
pub const DEFAULT_BREATH_REST_BEATS: f64 = 0.5;

/// Insert a rest of `rest_beats` immediately after each entry named in
/// `breath_points`.
///
/// Points index into `durations`. Out-of-range points are skipped, and a
/// point listed twice adds two rests. A non-positive `rest_beats` would
/// produce invalid rests, so nothing is inserted in that case.
pub fn insert_breath_rests(
    durations: &[NoteDuration],
    breath_points: &[i64],
    rest_beats: f64,
) -> Vec<NoteDuration> {
    if !(rest_beats.is_finite() && rest_beats > 0.0) {
        debug!(rest_beats, "non-positive breath rest, leaving line unchanged");
        return durations.to_vec();
    }

    let mut rests_after = vec![0usize; durations.len()];
    let mut inserted = 0;
    for &point in breath_points {
        match usize::try_from(point).ok().filter(|&i| i < durations.len()) {
            Some(index) => {
                rests_after[index] += 1;
                inserted += 1;
            }
            None => debug!(point, len = durations.len(), "skipping out-of-range breath point"),
        }
    }

    let mut result = Vec::with_capacity(durations.len() + inserted);
    for (entry, &rests) in durations.iter().zip(&rests_after) {
        result.push(*entry);
        result.extend(std::iter::repeat(NoteDuration::rest(rest_beats)).take(rests));
    }
    result
}
