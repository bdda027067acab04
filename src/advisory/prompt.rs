use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// A latitude/longitude pair in degrees. Ranges are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Parses `"LAT,LON"`.
impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Config(format!("expected LAT,LON but got '{s}'"));
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            latitude: lat.trim().parse().map_err(|_| invalid())?,
            longitude: lon.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Builds the alternative-route request for the text-generation service.
///
/// The six coordinates fill fixed slots in one template sentence.
pub fn advisory_prompt(delay: Coordinate, start: Coordinate, destination: Coordinate) -> String {
    format!(
        "There is a transit delay reported at latitude {}, longitude {}. \
         I am travelling from latitude {}, longitude {} to latitude {}, longitude {}. \
         Suggest alternative routes that avoid the delay, with an estimated travel time for each.",
        delay.latitude,
        delay.longitude,
        start.latitude,
        start.longitude,
        destination.latitude,
        destination.longitude,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fills_every_slot() {
        let prompt = advisory_prompt(
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(3.0, 3.0),
        );
        assert!(prompt.contains("delay reported at latitude 1, longitude 1."));
        assert!(prompt.contains("from latitude 2, longitude 2 to"));
        assert!(prompt.contains("to latitude 3, longitude 3."));
    }

    #[test]
    fn test_prompt_keeps_full_precision() {
        let prompt = advisory_prompt(
            Coordinate::new(41.878113, -87.629799),
            Coordinate::new(41.9, -87.65),
            Coordinate::new(41.79, -87.6),
        );
        assert!(prompt.contains("latitude 41.878113, longitude -87.629799"));
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!("41.5, -87.25".parse::<Coordinate>().unwrap(), Coordinate::new(41.5, -87.25));
        assert!("41.5".parse::<Coordinate>().is_err());
        assert!("north,west".parse::<Coordinate>().is_err());
    }
}
