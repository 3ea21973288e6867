//! Stress levels, stress patterns, and metrical foot detection.
//!
//! A stress pattern is one character per syllable: `'0'` unstressed,
//! `'1'` primary stress, `'2'` secondary stress. The meter analyzer
//! upstream is not always clean, so the lenient paths map anything else
//! to unstressed instead of failing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RhythmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    #[default]
    Unstressed,
    Primary,
    Secondary,
}

impl StressLevel {
    /// Lenient conversion: unknown characters are unstressed.
    pub fn from_char(c: char) -> Self {
        StressLevel::try_from(c).unwrap_or_default()
    }

    pub fn to_char(&self) -> char {
        match self {
            StressLevel::Unstressed => '0',
            StressLevel::Primary => '1',
            StressLevel::Secondary => '2',
        }
    }

    /// Primary or secondary.
    pub fn is_stressed(&self) -> bool {
        !matches!(self, StressLevel::Unstressed)
    }
}

impl TryFrom<char> for StressLevel {
    type Error = RhythmError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(StressLevel::Unstressed),
            '1' => Ok(StressLevel::Primary),
            '2' => Ok(StressLevel::Secondary),
            found => Err(RhythmError::InvalidStress { index: 0, found }),
        }
    }
}

/// A parsed line of stress levels, one per syllable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StressPattern {
    levels: Vec<StressLevel>,
}

impl StressPattern {
    /// Parse with the unstressed fallback for unknown characters.
    pub fn lenient(pattern: &str) -> Self {
        StressPattern {
            levels: pattern.chars().map(StressLevel::from_char).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[StressLevel] {
        &self.levels
    }

    pub fn get(&self, index: usize) -> Option<StressLevel> {
        self.levels.get(index).copied()
    }

    /// Back to the `'0'`/`'1'`/`'2'` spelling.
    pub fn to_pattern_string(&self) -> String {
        self.levels.iter().map(StressLevel::to_char).collect()
    }
}

impl FromStr for StressPattern {
    type Err = RhythmError;

    /// Strict parse: the first character outside `0`/`1`/`2` is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let levels = s
            .chars()
            .enumerate()
            .map(|(index, c)| {
                StressLevel::try_from(c).map_err(|_| RhythmError::InvalidStress { index, found: c })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StressPattern { levels })
    }
}

impl From<Vec<StressLevel>> for StressPattern {
    fn from(levels: Vec<StressLevel>) -> Self {
        StressPattern { levels }
    }
}

/// Classical metrical feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootType {
    /// da-DUM
    Iambic,
    /// DUM-da
    Trochaic,
    /// da-da-DUM
    Anapestic,
    /// DUM-da-da
    Dactylic,
}

impl FootType {
    pub fn all() -> [FootType; 4] {
        [
            FootType::Iambic,
            FootType::Trochaic,
            FootType::Anapestic,
            FootType::Dactylic,
        ]
    }

    /// Stress template for one foot (true = stressed).
    pub fn template(&self) -> &'static [bool] {
        match self {
            FootType::Iambic => &[false, true],
            FootType::Trochaic => &[true, false],
            FootType::Anapestic => &[false, false, true],
            FootType::Dactylic => &[true, false, false],
        }
    }

    pub fn syllables_per_foot(&self) -> usize {
        self.template().len()
    }
}

/// Best-matching foot for a stress pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootDetection {
    pub foot: FootType,
    /// Fraction of syllables that agree with the repeated foot template
    pub confidence: f64,
}

/// Detect the foot that best explains a stress pattern.
///
/// Each foot's template is repeated across the line and compared syllable
/// by syllable, with secondary stress counted as stressed. Ties go to the
/// earlier foot in [`FootType::all`], so two-syllable feet win over their
/// three-syllable relatives on short ambiguous lines.
pub fn detect_foot(pattern: &StressPattern) -> Option<FootDetection> {
    if pattern.is_empty() {
        return None;
    }

    let mut best: Option<FootDetection> = None;
    for foot in FootType::all() {
        let confidence = template_agreement(pattern.levels(), foot.template());
        if best.map_or(true, |b| confidence > b.confidence) {
            best = Some(FootDetection { foot, confidence });
        }
    }

    best.map(|b| FootDetection {
        confidence: (b.confidence * 1000.0).round() / 1000.0,
        ..b
    })
}

fn template_agreement(levels: &[StressLevel], template: &[bool]) -> f64 {
    let matches = levels
        .iter()
        .zip(template.iter().cycle())
        .filter(|&(level, &stressed)| level.is_stressed() == stressed)
        .count();
    matches as f64 / levels.len() as f64
}
