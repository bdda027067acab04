//! Converts a [`TrafficObservation`] into the engine's input vector.

use chrono::{NaiveTime, Timelike};

use super::encoders::{category_scalar, weather_scalar};
use super::types::{FeatureVector, TrafficObservation};

pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const MAX_SEVERITY_LEVEL: f64 = 5.0;

/// Minutes elapsed since midnight for `now`, ignoring seconds.
pub fn minutes_since_midnight(now: NaiveTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Builds the six-component feature vector.
///
/// Component order: latitude, longitude, severity, weather, time of day,
/// category. The time-of-day component comes from `now`, the moment the
/// prediction is made, not from when the observation was recorded; the same
/// observation scored at different times yields different vectors.
///
/// Severity is divided by five without clamping, so out-of-range levels
/// produce a component outside [0, 1].
pub fn normalize(obs: &TrafficObservation, now: NaiveTime) -> FeatureVector {
    [
        (obs.latitude + 90.0) / 180.0,
        (obs.longitude + 180.0) / 360.0,
        f64::from(obs.severity_level) / MAX_SEVERITY_LEVEL,
        weather_scalar(&obs.weather),
        f64::from(minutes_since_midnight(now)) / MINUTES_PER_DAY,
        category_scalar(&obs.category),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight() -> NaiveTime {
        NaiveTime::from_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_origin_maps_to_half() {
        let obs = TrafficObservation::new(0.0, 0.0, "delay", 0, "clear");
        let v = normalize(&obs, midnight());
        assert_eq!(v[0], 0.5);
        assert_eq!(v[1], 0.5);
    }

    #[test]
    fn test_max_severity_is_one() {
        let obs = TrafficObservation::new(0.0, 0.0, "delay", 5, "clear");
        assert_eq!(normalize(&obs, midnight())[2], 1.0);
    }

    #[test]
    fn test_out_of_range_severity_is_not_clamped() {
        let obs = TrafficObservation::new(0.0, 0.0, "delay", 10, "clear");
        assert_eq!(normalize(&obs, midnight())[2], 2.0);

        let obs = TrafficObservation::new(0.0, 0.0, "delay", -5, "clear");
        assert_eq!(normalize(&obs, midnight())[2], -1.0);
    }

    #[test]
    fn test_unknown_weather_and_category() {
        let obs = TrafficObservation::new(0.0, 0.0, "gridlock", 1, "volcanic ash");
        let v = normalize(&obs, midnight());
        assert_eq!(v[3], 0.5);
        assert_eq!(v[5], 0.5);
    }

    #[test]
    fn test_time_of_day_uses_supplied_clock() {
        let obs = TrafficObservation::new(0.0, 0.0, "delay", 1, "clear");
        let noon = NaiveTime::from_hms_opt(12, 0, 59).unwrap();
        assert_eq!(minutes_since_midnight(noon), 720);
        assert_eq!(normalize(&obs, noon)[4], 0.5);
        assert_eq!(normalize(&obs, midnight())[4], 0.0);
    }

    #[test]
    fn test_extreme_coordinates() {
        let obs = TrafficObservation::new(90.0, 180.0, "congestion", 3, "storm");
        let v = normalize(&obs, midnight());
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 1.0);
        assert_eq!(v[5], 0.8);
    }
}
