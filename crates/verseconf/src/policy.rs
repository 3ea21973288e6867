//! Duration policy - the tunable constants behind stress-to-duration mapping.
//!
//! None of these values are a contract. The engine only promises orderings
//! (stressed longer than unstressed, strong beats never shorter than weak,
//! faster tempo never longer than slower), so any values that keep those
//! orderings are acceptable here.

use serde::{Deserialize, Serialize};

/// Heuristic constants for the duration mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Base length of an unstressed syllable in simple meters.
    /// Default: 0.5 beats
    #[serde(default = "PolicyConfig::default_unstressed_beats")]
    pub unstressed_beats: f64,

    /// Base length of a secondary-stress syllable.
    /// Default: 0.75 beats
    #[serde(default = "PolicyConfig::default_secondary_beats")]
    pub secondary_beats: f64,

    /// Base length of a primary-stress syllable.
    /// Default: 1.0 beats
    #[serde(default = "PolicyConfig::default_primary_beats")]
    pub primary_beats: f64,

    /// Multiplier on the unstressed base in compound meters (6/8).
    /// Default: 0.75
    #[serde(default = "PolicyConfig::default_compound_unstressed_scale")]
    pub compound_unstressed_scale: f64,

    /// Multiplier on stressed syllables that fall on a strong beat.
    /// Default: 1.25
    #[serde(default = "PolicyConfig::default_strong_beat_bonus")]
    pub strong_beat_bonus: f64,

    /// Tempo at which tempo scaling is the identity.
    /// Default: 120 BPM
    #[serde(default = "PolicyConfig::default_reference_tempo")]
    pub reference_tempo: f64,

    /// Lower clamp for the tempo scale factor (very fast tempos).
    /// Default: 0.5
    #[serde(default = "PolicyConfig::default_min_tempo_scale")]
    pub min_tempo_scale: f64,

    /// Upper clamp for the tempo scale factor (very slow tempos).
    /// Default: 2.0
    #[serde(default = "PolicyConfig::default_max_tempo_scale")]
    pub max_tempo_scale: f64,

    /// Quantization grid for produced durations.
    /// Default: 0.125 beats
    #[serde(default = "PolicyConfig::default_quantum")]
    pub quantum: f64,
}

impl PolicyConfig {
    fn default_unstressed_beats() -> f64 {
        0.5
    }

    fn default_secondary_beats() -> f64 {
        0.75
    }

    fn default_primary_beats() -> f64 {
        1.0
    }

    fn default_compound_unstressed_scale() -> f64 {
        0.75
    }

    fn default_strong_beat_bonus() -> f64 {
        1.25
    }

    fn default_reference_tempo() -> f64 {
        120.0
    }

    fn default_min_tempo_scale() -> f64 {
        0.5
    }

    fn default_max_tempo_scale() -> f64 {
        2.0
    }

    fn default_quantum() -> f64 {
        0.125
    }

    /// Check the orderings the engine relies on.
    ///
    /// Returns a description of the first violated constraint.
    pub fn check(&self) -> Result<(), String> {
        let positive = [
            ("unstressed_beats", self.unstressed_beats),
            ("secondary_beats", self.secondary_beats),
            ("primary_beats", self.primary_beats),
            ("compound_unstressed_scale", self.compound_unstressed_scale),
            ("reference_tempo", self.reference_tempo),
            ("min_tempo_scale", self.min_tempo_scale),
            ("max_tempo_scale", self.max_tempo_scale),
            ("quantum", self.quantum),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }

        if self.secondary_beats <= self.unstressed_beats {
            return Err("secondary_beats must exceed unstressed_beats".to_string());
        }
        if self.primary_beats < self.secondary_beats {
            return Err("primary_beats must be at least secondary_beats".to_string());
        }
        if self.compound_unstressed_scale > 1.0 {
            return Err("compound_unstressed_scale must not exceed 1.0".to_string());
        }
        if !(self.strong_beat_bonus.is_finite() && self.strong_beat_bonus >= 1.0) {
            return Err("strong_beat_bonus must be at least 1.0".to_string());
        }
        if self.min_tempo_scale > self.max_tempo_scale {
            return Err("min_tempo_scale must not exceed max_tempo_scale".to_string());
        }

        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            unstressed_beats: Self::default_unstressed_beats(),
            secondary_beats: Self::default_secondary_beats(),
            primary_beats: Self::default_primary_beats(),
            compound_unstressed_scale: Self::default_compound_unstressed_scale(),
            strong_beat_bonus: Self::default_strong_beat_bonus(),
            reference_tempo: Self::default_reference_tempo(),
            min_tempo_scale: Self::default_min_tempo_scale(),
            max_tempo_scale: Self::default_max_tempo_scale(),
            quantum: Self::default_quantum(),
        }
    }
}
