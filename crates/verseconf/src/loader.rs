//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, RhythmConfig};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with an explicit override path.
///
/// If `override_path` is provided and exists, it replaces the local override.
/// Returns paths in load order (system, user, local/override).
pub fn discover_config_files_with_override(override_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/versebeat/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("versebeat/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = override_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
        warn!(path = %path.display(), "config override path does not exist");
    }

    let local = PathBuf::from("versebeat.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file and overlay its values onto `config`.
pub fn overlay_file(config: &mut RhythmConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    overlay_toml(config, &contents, path)?;
    info!(path = %path.display(), "loaded versebeat config");
    Ok(())
}

/// Load config from a TOML file on top of compiled defaults.
pub fn load_from_file(path: &Path) -> Result<RhythmConfig, ConfigError> {
    let mut config = RhythmConfig::default();
    overlay_file(&mut config, path)?;
    Ok(config)
}

/// Overlay the keys present in a TOML document; absent keys keep their value.
fn overlay_toml(config: &mut RhythmConfig, contents: &str, path: &Path) -> Result<(), ConfigError> {
    // Raw table so that later files only override the keys they mention
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(defaults) = table.get("defaults").and_then(|v| v.as_table()) {
        if let Some(v) = defaults.get("time_signature").and_then(|v| v.as_str()) {
            config.defaults.time_signature = v.to_string();
        }
        if let Some(v) = defaults.get("tempo").and_then(as_number) {
            config.defaults.tempo = v;
        }
        if let Some(v) = defaults.get("breath_rest_beats").and_then(as_number) {
            config.defaults.breath_rest_beats = v;
        }
    }

    if let Some(policy) = table.get("policy").and_then(|v| v.as_table()) {
        let p = &mut config.policy;
        let fields: [(&str, &mut f64); 9] = [
            ("unstressed_beats", &mut p.unstressed_beats),
            ("secondary_beats", &mut p.secondary_beats),
            ("primary_beats", &mut p.primary_beats),
            ("compound_unstressed_scale", &mut p.compound_unstressed_scale),
            ("strong_beat_bonus", &mut p.strong_beat_bonus),
            ("reference_tempo", &mut p.reference_tempo),
            ("min_tempo_scale", &mut p.min_tempo_scale),
            ("max_tempo_scale", &mut p.max_tempo_scale),
            ("quantum", &mut p.quantum),
        ];
        for (key, slot) in fields {
            if let Some(v) = policy.get(key).and_then(as_number) {
                *slot = v;
            }
        }
    }

    if let Some(fit) = table.get("fit").and_then(|v| v.as_table()) {
        if let Some(v) = fit.get("enabled").and_then(|v| v.as_bool()) {
            config.fit.enabled = v;
        }
        if let Some(v) = fit.get("pad_with_rests").and_then(|v| v.as_bool()) {
            config.fit.pad_with_rests = v;
        }
        if let Some(v) = fit.get("allow_split_notes").and_then(|v| v.as_bool()) {
            config.fit.allow_split_notes = v;
        }
        if let Some(v) = fit.get("preserve_stress_alignment").and_then(|v| v.as_bool()) {
            config.fit.preserve_stress_alignment = v;
        }
    }

    Ok(())
}

/// TOML integers and floats are both accepted for numeric settings.
fn as_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut RhythmConfig, sources: &mut ConfigSources) {
    apply_env_overrides_from(config, sources, env::vars());
}

/// Apply overrides from an explicit set of variables.
///
/// Values that fail to parse are skipped with a warning.
pub fn apply_env_overrides_from<I>(config: &mut RhythmConfig, sources: &mut ConfigSources, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(name) = key.strip_prefix("VERSEBEAT_") else {
            continue;
        };

        let applied = match name {
            "TIME_SIGNATURE" => {
                config.defaults.time_signature = value.clone();
                true
            }
            "TEMPO" => set_number(&mut config.defaults.tempo, &value),
            "BREATH_REST_BEATS" => set_number(&mut config.defaults.breath_rest_beats, &value),
            "STRONG_BEAT_BONUS" => set_number(&mut config.policy.strong_beat_bonus, &value),
            "REFERENCE_TEMPO" => set_number(&mut config.policy.reference_tempo, &value),
            "QUANTUM" => set_number(&mut config.policy.quantum, &value),
            "FIT_ENABLED" => set_flag(&mut config.fit.enabled, &value),
            "PAD_WITH_RESTS" => set_flag(&mut config.fit.pad_with_rests, &value),
            "ALLOW_SPLIT_NOTES" => set_flag(&mut config.fit.allow_split_notes, &value),
            "PRESERVE_STRESS_ALIGNMENT" => {
                set_flag(&mut config.fit.preserve_stress_alignment, &value)
            }
            _ => continue,
        };

        if applied {
            sources.env_overrides.push(key);
        } else {
            warn!(var = %key, value = %value, "ignoring unparseable environment override");
        }
    }
}

fn set_number(slot: &mut f64, value: &str) -> bool {
    match value.trim().parse::<f64>() {
        Ok(v) => {
            *slot = v;
            true
        }
        Err(_) => false,
    }
}

fn set_flag(slot: &mut bool, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => {
            *slot = true;
            true
        }
        "0" | "false" | "no" | "off" => {
            *slot = false;
            true
        }
        _ => false,
    }
}
