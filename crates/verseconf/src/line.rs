//! Line defaults - values a caller gets when it doesn't specify its own.

use serde::{Deserialize, Serialize};

/// Defaults applied to each rendered line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Time signature in "N/D" spelling. The engine supports
    /// "4/4", "3/4", "6/8" and "2/4".
    #[serde(default = "DefaultsConfig::default_time_signature")]
    pub time_signature: String,

    /// Tempo in beats per minute.
    #[serde(default = "DefaultsConfig::default_tempo")]
    pub tempo: f64,

    /// Length of each breath rest, in beats.
    #[serde(default = "DefaultsConfig::default_breath_rest_beats")]
    pub breath_rest_beats: f64,
}

impl DefaultsConfig {
    fn default_time_signature() -> String {
        "4/4".to_string()
    }

    fn default_tempo() -> f64 {
        120.0
    }

    fn default_breath_rest_beats() -> f64 {
        0.5
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            time_signature: Self::default_time_signature(),
            tempo: Self::default_tempo(),
            breath_rest_beats: Self::default_breath_rest_beats(),
        }
    }
}

/// Measure fitting behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Whether lines are packed into measures at all.
    #[serde(default = "FitConfig::default_true")]
    pub enabled: bool,

    /// Close the last measure with a rest.
    #[serde(default = "FitConfig::default_true")]
    pub pad_with_rests: bool,

    /// Split notes that cross a barline.
    #[serde(default = "FitConfig::default_true")]
    pub allow_split_notes: bool,

    /// Nudge primary stresses toward strong beats before fitting.
    #[serde(default)]
    pub preserve_stress_alignment: bool,
}

impl FitConfig {
    fn default_true() -> bool {
        true
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pad_with_rests: true,
            allow_split_notes: true,
            preserve_stress_alignment: false,
        }
    }
}
