use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::{EngineConfig, WeightClassCapacities};
use crate::error::{EngineConfigError, WeightsError};
use crate::models::ScoringWeights;

/// Name of the profile used when none is requested
pub const DEFAULT_PROFILE: &str = "default";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_margin_cm")]
    pub margin_cm: f64,
    #[serde(default = "crate::core::scoring::default_fragile_categories")]
    pub fragile_categories: Vec<String>,
    #[serde(default)]
    pub weight_classes: WeightClassSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            margin_cm: default_margin_cm(),
            fragile_categories: crate::core::scoring::default_fragile_categories(),
            weight_classes: WeightClassSettings::default(),
        }
    }
}

fn default_margin_cm() -> f64 { crate::core::feasibility::DEFAULT_MARGIN_CM }

/// Capacities (kg) for cases that only declare a weight class
#[derive(Debug, Clone, Deserialize)]
pub struct WeightClassSettings {
    #[serde(default = "default_light_kg")]
    pub light: f64,
    #[serde(default = "default_medium_kg")]
    pub medium: f64,
    #[serde(default = "default_heavy_kg")]
    pub heavy: f64,
}

impl Default for WeightClassSettings {
    fn default() -> Self {
        Self {
            light: default_light_kg(),
            medium: default_medium_kg(),
            heavy: default_heavy_kg(),
        }
    }
}

fn default_light_kg() -> f64 { 5.0 }
fn default_medium_kg() -> f64 { 15.0 }
fn default_heavy_kg() -> f64 { 40.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_profile_name")]
    pub default_profile: String,
    /// Named weight sets, e.g. `[scoring.profiles.fit_first]`
    #[serde(default)]
    pub profiles: HashMap<String, WeightsConfig>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            default_profile: default_profile_name(),
            profiles: HashMap::new(),
        }
    }
}

fn default_profile_name() -> String { DEFAULT_PROFILE.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_dimension_weight")]
    pub dimension: f64,
    #[serde(default = "default_protection_weight")]
    pub protection: f64,
    #[serde(default = "default_brand_weight")]
    pub brand: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension_weight(),
            protection: default_protection_weight(),
            brand: default_brand_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        ScoringWeights {
            dimension: config.dimension,
            protection: config.protection,
            brand: config.brand,
        }
    }
}

fn default_dimension_weight() -> f64 { 0.6 }
fn default_protection_weight() -> f64 { 0.3 }
fn default_brand_weight() -> f64 { 0.1 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

/// Errors turning settings into an engine configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown scoring profile `{0}`")]
    UnknownProfile(String),

    #[error("invalid scoring profile `{profile}`: {source}")]
    InvalidWeights {
        profile: String,
        #[source]
        source: WeightsError,
    },

    #[error("invalid engine settings: {0}")]
    InvalidEngine(#[from] EngineConfigError),
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GEARCASE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GEARCASE__ENGINE__MARGIN_CM -> engine.margin_cm
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Weights for a named profile, falling back to the configured default
    ///
    /// The `default` profile always exists; an explicit entry in the settings
    /// overrides the built-in 0.6 / 0.3 / 0.1 split.
    pub fn weights_for(&self, profile: Option<&str>) -> Result<ScoringWeights, SettingsError> {
        let name = profile.unwrap_or(self.scoring.default_profile.as_str());

        let weights = match self.scoring.profiles.get(name) {
            Some(config) => ScoringWeights::from(config),
            None if name == DEFAULT_PROFILE => ScoringWeights::default(),
            None => return Err(SettingsError::UnknownProfile(name.to_string())),
        };

        weights.validate().map_err(|source| SettingsError::InvalidWeights {
            profile: name.to_string(),
            source,
        })?;

        Ok(weights)
    }

    /// Engine configuration using the given weight profile
    pub fn engine_config(&self, profile: Option<&str>) -> Result<EngineConfig, SettingsError> {
        let classes = &self.engine.weight_classes;
        let config = EngineConfig {
            margin_cm: self.engine.margin_cm,
            fragile_categories: self.engine.fragile_categories.clone(),
            weight_classes: WeightClassCapacities {
                light: classes.light,
                medium: classes.medium,
                heavy: classes.heavy,
            },
            weights: self.weights_for(profile)?,
        };

        config.validate()?;
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GEARCASE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("engine.fragile_categories")
}
