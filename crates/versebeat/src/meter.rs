//! Time signatures, strong beats, and the per-syllable rhythm context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RhythmError;

/// Supported meters.
///
/// Beats are counted in the denominator's unit, so a 6/8 measure holds six
/// eighth-note beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeSignature {
    #[default]
    FourFour,
    ThreeFour,
    SixEight,
    TwoFour,
}

impl TimeSignature {
    /// All supported time signatures
    pub fn all() -> [TimeSignature; 4] {
        [
            TimeSignature::FourFour,
            TimeSignature::ThreeFour,
            TimeSignature::SixEight,
            TimeSignature::TwoFour,
        ]
    }

    pub fn beats_per_measure(&self) -> u32 {
        match self {
            TimeSignature::FourFour => 4,
            TimeSignature::ThreeFour => 3,
            TimeSignature::SixEight => 6,
            TimeSignature::TwoFour => 2,
        }
    }

    /// Compound meters subdivide each felt beat into three.
    pub fn is_compound(&self) -> bool {
        matches!(self, TimeSignature::SixEight)
    }

    /// 0-indexed beat offsets that are metrically strong within one measure.
    pub fn strong_beats(&self) -> &'static [u32] {
        match self {
            TimeSignature::FourFour => &[0, 2],
            TimeSignature::ThreeFour => &[0],
            TimeSignature::SixEight => &[0, 3],
            TimeSignature::TwoFour => &[0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSignature::FourFour => "4/4",
            TimeSignature::ThreeFour => "3/4",
            TimeSignature::SixEight => "6/8",
            TimeSignature::TwoFour => "2/4",
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSignature {
    type Err = RhythmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        TimeSignature::all()
            .into_iter()
            .find(|ts| ts.as_str() == compact)
            .ok_or_else(|| RhythmError::UnsupportedTimeSignature(s.to_string()))
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = RhythmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSignature> for String {
    fn from(ts: TimeSignature) -> Self {
        ts.as_str().to_string()
    }
}

/// Strong beat offsets for a time signature.
pub fn get_strong_beats(time_signature: TimeSignature) -> &'static [u32] {
    time_signature.strong_beats()
}

/// Whether a beat position is strong, wrapping modulo the measure length.
pub fn is_strong_beat(position: u32, time_signature: TimeSignature) -> bool {
    let wrapped = position % time_signature.beats_per_measure();
    time_signature.strong_beats().contains(&wrapped)
}

/// Everything the duration mapper needs to know about where a syllable sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RhythmContext {
    pub time_signature: TimeSignature,
    /// Beats per minute
    pub tempo: f64,
    /// Beat offset within the measure
    pub position: u32,
}

impl RhythmContext {
    /// Context at the start of a measure.
    pub fn new(time_signature: TimeSignature, tempo: f64) -> Self {
        create_rhythm_context(time_signature, tempo, 0)
    }

    /// Same meter and tempo at another beat position.
    pub fn with_position(self, position: u32) -> Self {
        RhythmContext { position, ..self }
    }

    pub fn is_strong_beat(&self) -> bool {
        is_strong_beat(self.position, self.time_signature)
    }

    /// Wall-clock length of one beat. Zero for a non-positive tempo.
    pub fn seconds_per_beat(&self) -> f64 {
        beats_to_seconds(1.0, self.tempo)
    }
}

pub fn create_rhythm_context(time_signature: TimeSignature, tempo: f64, position: u32) -> RhythmContext {
    RhythmContext {
        time_signature,
        tempo,
        position,
    }
}

/// Convert a beat count to seconds at a tempo.
pub fn beats_to_seconds(beats: f64, tempo: f64) -> f64 {
    if !(tempo.is_finite() && tempo > 0.0) {
        return 0.0;
    }
    beats * 60.0 / tempo
}
