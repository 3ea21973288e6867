//! Fixture-based tests for whole verses.
//!
//! Each .toml file in tests/fixtures/ describes a verse: its meter, tempo,
//! breath points and one stress pattern per line. Every line is rendered
//! and checked for whole measures, valid entries and syllable order.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use versebeat::{
    detect_foot, render_line, validate_syllable_order, FootType, LineOptions, StressPattern,
    TimeSignature, DEFAULT_TEMPO,
};

#[derive(Debug, Deserialize)]
struct Verse {
    description: String,
    time_signature: TimeSignature,
    #[serde(default = "default_tempo")]
    tempo: f64,
    #[serde(default)]
    breath_points: Vec<i64>,
    foot: Option<FootType>,
    lines: Vec<String>,
}

fn default_tempo() -> f64 {
    DEFAULT_TEMPO
}

fn load_fixture(name: &str) -> Verse {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.toml", name));

    let content = fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e));
    toml::from_str(&content).unwrap_or_else(|e| panic!("Fixture {} is malformed: {}", name, e))
}

fn test_fixture(name: &str) {
    let verse = load_fixture(name);
    let options = LineOptions {
        time_signature: verse.time_signature,
        tempo: verse.tempo,
        ..LineOptions::default()
    }
    .with_breath_points(verse.breath_points.clone());
    let beats_per_measure = f64::from(verse.time_signature.beats_per_measure());

    for (n, line) in verse.lines.iter().enumerate() {
        let pattern: StressPattern = line
            .parse()
            .unwrap_or_else(|e| panic!("Fixture {} line {}: {}", name, n, e));

        if let Some(expected) = verse.foot {
            let detected = detect_foot(&pattern).map(|d| d.foot);
            assert_eq!(detected, Some(expected), "Fixture {} line {} foot", name, n);
        }

        let rhythm = render_line(line, &options);
        assert!(
            rhythm.validation.valid,
            "Fixture {} line {} invalid: {:?}",
            name, n, rhythm.validation.issues
        );
        assert_eq!(
            rhythm.total_beats % beats_per_measure,
            0.0,
            "Fixture {} line {} does not fill whole measures: {}",
            name,
            n,
            rhythm.total_beats
        );
        assert!(validate_syllable_order(&rhythm.durations).valid);

        // Every syllable is sung, split parts included
        let mut sung: Vec<i32> = rhythm
            .durations
            .iter()
            .filter(|d| !d.is_rest)
            .map(|d| d.syllable_index)
            .collect();
        sung.dedup();
        assert_eq!(sung.len(), pattern.len(), "Fixture {} line {}", name, n);

        let breaths = verse
            .breath_points
            .iter()
            .filter(|&&p| p >= 0 && (p as usize) < pattern.len())
            .count();
        let rests = rhythm.durations.iter().filter(|d| d.is_rest).count();
        assert!(rests >= breaths, "Fixture {} line {} lost a breath", name, n);
    }

    println!(
        "Fixture {} ({}): {} lines in {}",
        name,
        verse.description,
        verse.lines.len(),
        verse.time_signature
    );
}

#[test]
fn test_fixture_iambic_tetrameter() {
    test_fixture("iambic_tetrameter");
}

#[test]
fn test_fixture_common_meter() {
    test_fixture("common_meter");
}

#[test]
fn test_fixture_waltz_dactyls() {
    test_fixture("waltz_dactyls");
}

#[test]
fn test_fixture_six_eight_anapests() {
    test_fixture("six_eight_anapests");
}

#[test]
fn test_fixture_trochaic_march() {
    test_fixture("trochaic_march");
}

#[test]
fn test_fixture_secondary_stress() {
    test_fixture("secondary_stress");
}

#[test]
fn test_fixture_irregular_speech() {
    test_fixture("irregular_speech");
}

#[test]
fn test_stress_alignment_keeps_measures_whole() {
    let verse = load_fixture("iambic_tetrameter");
    let mut options = LineOptions {
        time_signature: verse.time_signature,
        tempo: verse.tempo,
        ..LineOptions::default()
    };
    options.fit.preserve_stress_alignment = true;

    for line in &verse.lines {
        let rhythm = render_line(line, &options);
        assert!(rhythm.validation.valid);
        assert_eq!(rhythm.total_beats % 4.0, 0.0);
    }
}

/// Test that all fixtures in the directory are covered by tests
#[test]
fn test_all_fixtures_have_tests() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    let fixture_names: Vec<_> = fs::read_dir(&fixtures_dir)
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension()? == "toml" {
                path.file_stem()?.to_str().map(|s| s.to_string())
            } else {
                None
            }
        })
        .collect();

    let tested = [
        "iambic_tetrameter",
        "common_meter",
        "waltz_dactyls",
        "six_eight_anapests",
        "trochaic_march",
        "secondary_stress",
        "irregular_speech",
    ];

    for name in &fixture_names {
        assert!(
            tested.contains(&name.as_str()),
            "Fixture {} exists but has no test",
            name
        );
    }
}
