//! Lookup tables mapping categorical labels to scalars and display strings.
//!
//! Every lookup lowercases its input and falls back to a fixed value when the
//! label is unknown; none of them can fail.

/// Weather label, encoded scalar, display description.
static WEATHER: &[(&str, f64, &str)] = &[
    ("clear", 0.1, "Clear skies"),
    ("cloudy", 0.3, "Cloudy"),
    ("rain", 0.6, "Rainy conditions"),
    ("fog", 0.7, "Foggy conditions"),
    ("snow", 0.8, "Snowy conditions"),
    ("storm", 0.9, "Stormy conditions"),
];

static CATEGORIES: &[(&str, f64)] = &[("minor delay", 0.2), ("delay", 0.5), ("congestion", 0.8)];

/// Label, latitude range, longitude range. Bounds are inclusive.
static AREAS: &[(&str, (f64, f64), (f64, f64))] = &[
    ("Chicago Area", (41.60, 42.10), (-87.95, -87.50)),
    ("New York City Area", (40.45, 40.95), (-74.30, -73.70)),
    ("London Area", (51.25, 51.75), (-0.55, 0.35)),
];

pub const UNKNOWN_SCALAR: f64 = 0.5;
pub const UNKNOWN_WEATHER: &str = "Unknown weather";

pub fn weather_scalar(label: &str) -> f64 {
    let label = label.to_lowercase();
    WEATHER
        .iter()
        .find(|(name, _, _)| *name == label)
        .map(|(_, scalar, _)| *scalar)
        .unwrap_or(UNKNOWN_SCALAR)
}

pub fn category_scalar(label: &str) -> f64 {
    let label = label.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, scalar)| *scalar)
        .unwrap_or(UNKNOWN_SCALAR)
}

pub fn weather_description(label: &str) -> String {
    let label = label.to_lowercase();
    WEATHER
        .iter()
        .find(|(name, _, _)| *name == label)
        .map(|(_, _, description)| *description)
        .unwrap_or(UNKNOWN_WEATHER)
        .to_string()
}

/// Names the hard-coded city area containing the point, or formats the raw
/// coordinates with four decimals.
pub fn location_description(latitude: f64, longitude: f64) -> String {
    AREAS
        .iter()
        .find(|(_, (lat_min, lat_max), (lon_min, lon_max))| {
            (*lat_min..=*lat_max).contains(&latitude) && (*lon_min..=*lon_max).contains(&longitude)
        })
        .map(|(name, _, _)| name.to_string())
        .unwrap_or_else(|| format!("({:.4}, {:.4})", latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_lookup_is_case_insensitive() {
        assert_eq!(weather_scalar("RAIN"), 0.6);
        assert_eq!(weather_scalar("Snow"), 0.8);
        assert_eq!(weather_description("Clear"), "Clear skies");
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        assert_eq!(weather_scalar("hail"), UNKNOWN_SCALAR);
        assert_eq!(category_scalar("accident"), UNKNOWN_SCALAR);
        assert_eq!(weather_description(""), "Unknown weather");
    }

    #[test]
    fn test_category_table() {
        assert_eq!(category_scalar("Minor Delay"), 0.2);
        assert_eq!(category_scalar("delay"), 0.5);
        assert_eq!(category_scalar("CONGESTION"), 0.8);
    }

    #[test]
    fn test_location_boxes() {
        assert_eq!(location_description(41.8781, -87.6298), "Chicago Area");
        assert_eq!(location_description(40.7128, -74.0060), "New York City Area");
        assert_eq!(location_description(51.5074, -0.1278), "London Area");
    }

    #[test]
    fn test_location_fallback_formats_coordinates() {
        assert_eq!(location_description(0.0, 0.0), "(0.0000, 0.0000)");
        assert_eq!(location_description(-33.86881, 151.20929), "(-33.8688, 151.2093)");
    }
}
