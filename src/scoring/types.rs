//! Data types flowing through the scoring pipeline.

use serde::{Deserialize, Serialize};

/// Number of normalized input features.
pub const INPUT_SIZE: usize = 6;
/// Width of the single hidden layer.
pub const HIDDEN_SIZE: usize = 16;
/// Number of output scalars (severity, delay type, day, time).
pub const OUTPUT_SIZE: usize = 4;

/// Normalized feature vector fed to the engine.
pub type FeatureVector = [f64; INPUT_SIZE];

/// A raw traffic observation submitted for scoring.
///
/// `severity_level` is expected in 0..=5 but is not clamped anywhere in the
/// pipeline, so values outside that range push feature 3 outside [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficObservation {
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    pub severity_level: i32,
    pub weather: String,
}

impl TrafficObservation {
    pub fn new(
        latitude: f64,
        longitude: f64,
        category: impl Into<String>,
        severity_level: i32,
        weather: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            category: category.into(),
            severity_level,
            weather: weather.into(),
        }
    }
}

/// A decoded label together with its confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub label: String,
    pub confidence: f64,
}

/// Structured output for a single observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub severity: String,
    pub delay_type: String,
    pub day_of_week: String,
    pub time_of_day: String,
    pub severity_confidence: f64,
    pub delay_type_confidence: f64,
    pub day_confidence: f64,
    pub time_confidence: f64,
    pub location: String,
    pub weather: String,
}
