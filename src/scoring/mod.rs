//! Delay prediction pipeline.
//!
//! A [`TrafficObservation`] is normalized into six features, passed through a
//! randomly initialized 6-16-4 [`ScoringEngine`], and each of the four outputs
//! is decoded into a label with a confidence.

pub mod decode;
pub mod encoders;
pub mod engine;
pub mod normalize;
pub mod predictor;
pub mod types;

pub use engine::{ScoringEngine, Weights};
pub use predictor::Predictor;
pub use types::{Decoded, FeatureVector, PredictionResult, TrafficObservation};
