//! One-call rendering of a lyric line: map, breathe, align, fit, validate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::align_stress_to_beats;
use crate::breath::{insert_breath_rests, DEFAULT_BREATH_REST_BEATS};
use crate::duration::{DurationModel, HeuristicDurationModel};
use crate::fit::{fit_to_measure, FitToMeasureOptions};
use crate::line::{map_line_to_rhythm_with, DEFAULT_TEMPO};
use crate::meter::TimeSignature;
use crate::types::NoteDuration;
use crate::util::{calculate_total_duration, count_measures};
use crate::validate::{validate_rhythm, ValidationResult};
use crate::RhythmError;

/// Everything `render_line` needs besides the stress pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOptions {
    pub time_signature: TimeSignature,
    pub tempo: f64,
    /// Entry indices after which a rest is inserted.
    #[serde(default)]
    pub breath_points: Vec<i64>,
    pub breath_rest_beats: f64,
    pub fit: FitToMeasureOptions,
    /// Skip measure fitting entirely when false.
    pub fit_to_measure: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        LineOptions {
            time_signature: TimeSignature::default(),
            tempo: DEFAULT_TEMPO,
            breath_points: Vec::new(),
            breath_rest_beats: DEFAULT_BREATH_REST_BEATS,
            fit: FitToMeasureOptions::default(),
            fit_to_measure: true,
        }
    }
}

impl LineOptions {
    /// Build options from loaded configuration. Breath points are per line,
    /// so they start empty.
    pub fn from_config(config: &verseconf::RhythmConfig) -> Result<Self, RhythmError> {
        Ok(LineOptions {
            time_signature: config.defaults.time_signature.parse()?,
            tempo: config.defaults.tempo,
            breath_points: Vec::new(),
            breath_rest_beats: config.defaults.breath_rest_beats,
            fit: FitToMeasureOptions::from(&config.fit),
            fit_to_measure: config.fit.enabled,
        })
    }

    pub fn with_breath_points(mut self, breath_points: Vec<i64>) -> Self {
        self.breath_points = breath_points;
        self
    }
}

/// A rendered line, ready to hand to the melody generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRhythm {
    pub durations: Vec<NoteDuration>,
    pub total_beats: f64,
    /// Fractional measure count, for reporting.
    pub measures: f64,
    pub validation: ValidationResult,
}

/// Render a stress pattern with the default heuristic model.
pub fn render_line(stress_pattern: &str, options: &LineOptions) -> LineRhythm {
    render_line_with(&HeuristicDurationModel::default(), stress_pattern, options)
}

/// Render a stress pattern with a caller-supplied duration model.
pub fn render_line_with(
    model: &dyn DurationModel,
    stress_pattern: &str,
    options: &LineOptions,
) -> LineRhythm {
    let time_signature = options.time_signature;
    let beats_per_measure = f64::from(time_signature.beats_per_measure());

    let mapped = map_line_to_rhythm_with(model, stress_pattern, time_signature, options.tempo);
    let mut durations =
        insert_breath_rests(&mapped, &options.breath_points, options.breath_rest_beats);

    if options.fit_to_measure {
        if options.fit.preserve_stress_alignment {
            durations = align_stress_to_beats(&durations, stress_pattern, time_signature);
        }
        durations = fit_to_measure(&durations, beats_per_measure, &options.fit);
    }

    let total_beats = calculate_total_duration(&durations);
    let measures = count_measures(&durations, beats_per_measure);
    let validation = validate_rhythm(&durations);

    debug!(
        syllables = mapped.len(),
        entries = durations.len(),
        total_beats,
        measures,
        valid = validation.valid,
        "rendered line"
    );

    LineRhythm {
        durations,
        total_beats,
        measures,
        validation,
    }
}
