use serde::{Deserialize, Serialize};

/// Syllable index carried by every rest.
pub const REST_SYLLABLE_INDEX: i32 = -1;

/// One entry of a rhythm: a sung syllable or a rest, with its length in beats.
///
/// Produced sequences keep non-rest syllable indices strictly increasing from
/// 0. The melody generator keys pitches back to the source syllables by
/// `syllable_index` and treats rests as silence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteDuration {
    pub syllable_index: i32,
    pub beats: f64,
    pub is_rest: bool,
}

impl NoteDuration {
    pub fn note(syllable_index: usize, beats: f64) -> Self {
        NoteDuration {
            syllable_index: syllable_index as i32,
            beats,
            is_rest: false,
        }
    }

    pub fn rest(beats: f64) -> Self {
        NoteDuration {
            syllable_index: REST_SYLLABLE_INDEX,
            beats,
            is_rest: true,
        }
    }

    /// Same identity, different length. Used when splitting across barlines.
    pub fn with_beats(self, beats: f64) -> Self {
        NoteDuration { beats, ..self }
    }

    /// The syllable this note sings, if it isn't a rest.
    pub fn syllable(&self) -> Option<usize> {
        if self.is_rest {
            None
        } else {
            usize::try_from(self.syllable_index).ok()
        }
    }
}
