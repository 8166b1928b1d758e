//! House price estimation from a pre-trained regression model
//!
//! An interactive form collects property attributes, assembles them into a
//! fixed-order feature record and asks the loaded model for a sale price.

pub mod features;
pub mod form;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use features::{FeatureFrame, FeatureRecord, PropertyInputs};
pub use model::Model;
pub use predict::{PricePrediction, Predictor};

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HousePriceError {
    #[error("Model file not found: {0} - check [model] path in the config")]
    ModelNotFound(String),

    #[error("Failed to parse model {path}: {source}")]
    ModelParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Schema mismatch: model expects {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Model returned no prediction")]
    EmptyPrediction,

    #[error("Model returned a non-finite prediction: {0}")]
    NonFinitePrediction(f64),

    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field}: invalid value '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, HousePriceError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            path: "model.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: "$".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HousePriceError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HousePriceError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HousePriceError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
