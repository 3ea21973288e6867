//! Configuration loading for the versebeat rhythm engine.
//!
//! The engine itself is pure and never reads configuration. Callers load a
//! [`RhythmConfig`] once and hand the relevant pieces to the engine.
//!
//! # Configuration Layout
//!
//! - **Defaults** (`DefaultsConfig`): time signature, tempo and breath rest
//!   length used when a line doesn't carry its own.
//! - **Policy** (`PolicyConfig`): heuristic constants for the duration mapper.
//! - **Fit** (`FitConfig`): how lines are packed into measures.
//!
//! # Usage
//!
//! ```rust,no_run
//! use verseconf::RhythmConfig;
//!
//! let config = RhythmConfig::load().expect("Failed to load config");
//! println!("Tempo: {}", config.defaults.tempo);
//! println!("Strong beat bonus: {}", config.policy.strong_beat_bonus);
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/versebeat/config.toml` (system)
//! 2. `~/.config/versebeat/config.toml` (user)
//! 3. `./versebeat.toml` (local override)
//! 4. Environment variables (`VERSEBEAT_*`)
//!
//! # Example Config
//!
//! ```toml
//! [defaults]
//! time_signature = "3/4"
//! tempo = 96
//! breath_rest_beats = 0.5
//!
//! [policy]
//! strong_beat_bonus = 1.5
//! reference_tempo = 100
//!
//! [fit]
//! allow_split_notes = false
//! ```

pub mod line;
pub mod loader;
pub mod policy;

pub use line::{DefaultsConfig, FitConfig};
pub use loader::{discover_config_files_with_override, ConfigSources};
pub use policy::PolicyConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Complete versebeat configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RhythmConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub fit: FitConfig,
}

impl RhythmConfig {
    /// Load configuration from all sources.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/versebeat/config.toml`
    /// 3. `~/.config/versebeat/config.toml`
    /// 4. `./versebeat.toml`
    /// 5. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply env overrides.
    ///
    /// If `config_path` is provided, it takes precedence over the local
    /// `./versebeat.toml` override. System and user configs still load first.
    pub fn load_from(config_path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and return information about sources.
    pub fn load_with_sources() -> Result<(Self, ConfigSources), ConfigError> {
        Self::load_with_sources_from(None)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&std::path::Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = RhythmConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            loader::overlay_file(&mut config, &path)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        config.validate()?;

        Ok((config, sources))
    }

    /// Check that the loaded values are usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy
            .check()
            .map_err(|message| ConfigError::InvalidValue {
                key: "policy".to_string(),
                message,
            })?;

        let defaults = &self.defaults;
        if !(defaults.tempo.is_finite() && defaults.tempo > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "defaults.tempo".to_string(),
                message: format!("tempo must be positive, got {}", defaults.tempo),
            });
        }
        if !(defaults.breath_rest_beats.is_finite() && defaults.breath_rest_beats > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "defaults.breath_rest_beats".to_string(),
                message: format!(
                    "breath rests must be positive, got {}",
                    defaults.breath_rest_beats
                ),
            });
        }

        Ok(())
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# versebeat configuration\n\n");

        output.push_str("[defaults]\n");
        output.push_str(&format!(
            "time_signature = \"{}\"\n",
            self.defaults.time_signature
        ));
        output.push_str(&format!("tempo = {:?}\n", self.defaults.tempo));
        output.push_str(&format!(
            "breath_rest_beats = {:?}\n",
            self.defaults.breath_rest_beats
        ));

        let policy = &self.policy;
        output.push_str("\n[policy]\n");
        output.push_str(&format!("unstressed_beats = {:?}\n", policy.unstressed_beats));
        output.push_str(&format!("secondary_beats = {:?}\n", policy.secondary_beats));
        output.push_str(&format!("primary_beats = {:?}\n", policy.primary_beats));
        output.push_str(&format!(
            "compound_unstressed_scale = {:?}\n",
            policy.compound_unstressed_scale
        ));
        output.push_str(&format!("strong_beat_bonus = {:?}\n", policy.strong_beat_bonus));
        output.push_str(&format!("reference_tempo = {:?}\n", policy.reference_tempo));
        output.push_str(&format!("min_tempo_scale = {:?}\n", policy.min_tempo_scale));
        output.push_str(&format!("max_tempo_scale = {:?}\n", policy.max_tempo_scale));
        output.push_str(&format!("quantum = {:?}\n", policy.quantum));

        output.push_str("\n[fit]\n");
        output.push_str(&format!("enabled = {}\n", self.fit.enabled));
        output.push_str(&format!("pad_with_rests = {}\n", self.fit.pad_with_rests));
        output.push_str(&format!(
            "allow_split_notes = {}\n",
            self.fit.allow_split_notes
        ));
        output.push_str(&format!(
            "preserve_stress_alignment = {}\n",
            self.fit.preserve_stress_alignment
        ));

        output
    }
}
