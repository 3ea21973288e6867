//! Stress-to-duration mapping for a single syllable.
//!
//! The heuristic model is a product of independently testable factors:
//!
//! ```text
//! beats = quantize(base(stress, meter) * strong_beat_bonus(stress, position) * tempo_scale(tempo))
//! ```
//!
//! followed by an ordering guard that keeps every stressed syllable at least
//! one quantum longer than an unstressed syllable in the same context.

use verseconf::PolicyConfig;

use crate::meter::{RhythmContext, TimeSignature};
use crate::stress::StressLevel;
use crate::RhythmError;

/// Trait for duration backends.
///
/// `HeuristicDurationModel` is the only implementation shipped here; the
/// line mapper and pipeline accept any model so callers can swap in their own.
pub trait DurationModel: Send + Sync {
    /// Length in beats of one syllable with `stress` at `context`.
    fn duration(&self, stress: StressLevel, context: &RhythmContext) -> f64;
}

/// Rule-based durations driven by a [`PolicyConfig`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeuristicDurationModel {
    policy: PolicyConfig,
}

impl HeuristicDurationModel {
    /// Build a model from a policy, rejecting policies that would break the
    /// stress orderings.
    pub fn new(policy: PolicyConfig) -> Result<Self, RhythmError> {
        policy.check().map_err(RhythmError::InvalidPolicy)?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Base length before any context adjustment.
    ///
    /// Compound meters shorten unstressed syllables to reflect the finer
    /// subdivision of each felt beat.
    pub fn base_duration(&self, stress: StressLevel, time_signature: TimeSignature) -> f64 {
        match stress {
            StressLevel::Unstressed if time_signature.is_compound() => {
                self.policy.unstressed_beats * self.policy.compound_unstressed_scale
            }
            StressLevel::Unstressed => self.policy.unstressed_beats,
            StressLevel::Secondary => self.policy.secondary_beats,
            StressLevel::Primary => self.policy.primary_beats,
        }
    }

    /// Multiplier for stressed syllables landing on a strong beat. Always >= 1.
    pub fn strong_beat_bonus(&self, stress: StressLevel, context: &RhythmContext) -> f64 {
        if stress.is_stressed() && context.is_strong_beat() {
            self.policy.strong_beat_bonus
        } else {
            1.0
        }
    }

    /// Slower tempos stretch durations, faster tempos compress them.
    ///
    /// Non-increasing in `tempo`. A non-positive or non-finite tempo is
    /// treated as the reference tempo.
    pub fn tempo_scale(&self, tempo: f64) -> f64 {
        if !(tempo.is_finite() && tempo > 0.0) {
            return 1.0;
        }
        (self.policy.reference_tempo / tempo)
            .clamp(self.policy.min_tempo_scale, self.policy.max_tempo_scale)
    }

    /// Snap to the policy grid, never below one grid step.
    pub fn quantize(&self, beats: f64) -> f64 {
        let quantum = self.policy.quantum;
        ((beats / quantum).round() * quantum).max(quantum)
    }

    fn unquantized(&self, stress: StressLevel, context: &RhythmContext) -> f64 {
        self.base_duration(stress, context.time_signature)
            * self.strong_beat_bonus(stress, context)
            * self.tempo_scale(context.tempo)
    }
}

impl DurationModel for HeuristicDurationModel {
    fn duration(&self, stress: StressLevel, context: &RhythmContext) -> f64 {
        let beats = self.quantize(self.unquantized(stress, context));
        if !stress.is_stressed() {
            return beats;
        }

        let unstressed = self.quantize(self.unquantized(StressLevel::Unstressed, context));
        beats.max(unstressed + self.policy.quantum)
    }
}

/// Duration in beats for one stress character under the default policy.
///
/// Characters other than `'0'`, `'1'` and `'2'` get the unstressed duration.
pub fn stress_to_note_duration(stress: char, context: &RhythmContext) -> f64 {
    HeuristicDurationModel::default().duration(StressLevel::from_char(stress), context)
}
