use chrono::{Local, NaiveTime};
use std::sync::Arc;
use tracing::debug;

use super::decode::{decode_day, decode_delay_type, decode_severity, decode_time};
use super::encoders::{location_description, weather_description};
use super::engine::ScoringEngine;
use super::normalize::normalize;
use super::types::{PredictionResult, TrafficObservation};

/// Normalizer, engine and decoders wired together.
///
/// The engine is shared through an [`Arc`] so clones of a predictor, and the
/// tasks spawned by [`Predictor::predict_batch_parallel`], score with the same
/// weights.
#[derive(Debug, Clone)]
pub struct Predictor {
    engine: Arc<ScoringEngine>,
}

impl Predictor {
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Scores `obs` using the local wall-clock time for the time-of-day feature.
    pub fn predict(&self, obs: &TrafficObservation) -> PredictionResult {
        self.predict_at(obs, Local::now().time())
    }

    pub fn predict_at(&self, obs: &TrafficObservation, now: NaiveTime) -> PredictionResult {
        let features = normalize(obs, now);
        let [severity_out, type_out, day_out, time_out] = self.engine.forward(&features);
        debug!(?features, severity_out, type_out, day_out, time_out, "Engine forward pass");

        let severity = decode_severity(severity_out);
        let delay_type = decode_delay_type(type_out);
        let day = decode_day(day_out);
        let time = decode_time(time_out);

        PredictionResult {
            severity: severity.label,
            delay_type: delay_type.label,
            day_of_week: day.label,
            time_of_day: time.label,
            severity_confidence: severity.confidence,
            delay_type_confidence: delay_type.confidence,
            day_confidence: day.confidence,
            time_confidence: time.confidence,
            location: location_description(obs.latitude, obs.longitude),
            weather: weather_description(&obs.weather),
        }
    }

    /// Scores every observation in order. The clock is read once for the batch.
    pub fn predict_batch(&self, observations: &[TrafficObservation]) -> Vec<PredictionResult> {
        self.predict_batch_at(observations, Local::now().time())
    }

    pub fn predict_batch_at(
        &self,
        observations: &[TrafficObservation],
        now: NaiveTime,
    ) -> Vec<PredictionResult> {
        observations
            .iter()
            .map(|obs| self.predict_at(obs, now))
            .collect()
    }

    /// Fans the batch out over blocking tasks and reassembles results in input
    /// order.
    pub async fn predict_batch_parallel(
        &self,
        observations: Vec<TrafficObservation>,
    ) -> crate::Result<Vec<PredictionResult>> {
        self.predict_batch_parallel_at(observations, Local::now().time())
            .await
    }

    #[tracing::instrument(skip(self, observations), fields(count = observations.len()))]
    pub async fn predict_batch_parallel_at(
        &self,
        observations: Vec<TrafficObservation>,
        now: NaiveTime,
    ) -> crate::Result<Vec<PredictionResult>> {
        let tasks: Vec<_> = observations
            .into_iter()
            .map(|obs| {
                let predictor = self.clone();
                tokio::task::spawn_blocking(move || predictor.predict_at(&obs, now))
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            results.push(task.await?);
        }
        Ok(results)
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(ScoringEngine::new())
    }
}
