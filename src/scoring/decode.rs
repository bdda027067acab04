//! Decoders turning each engine output in [0, 1] into a label and confidence.

use super::types::Decoded;

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const LOW_CUTOFF: f64 = 0.33;
const HIGH_CUTOFF: f64 = 0.66;

/// Three-way bucket decode shared by severity and delay type.
///
/// Confidence is `1 - o` for the low bucket, `1 - 2|o - 0.5|` for the middle
/// bucket and `o` for the high bucket.
fn three_way(o: f64, labels: [&str; 3]) -> Decoded {
    let (label, confidence) = if o < LOW_CUTOFF {
        (labels[0], 1.0 - o)
    } else if o < HIGH_CUTOFF {
        (labels[1], 1.0 - 2.0 * (o - 0.5).abs())
    } else {
        (labels[2], o)
    };

    Decoded {
        label: label.to_string(),
        confidence: confidence.clamp(0.0, 1.0),
    }
}

pub fn decode_severity(o: f64) -> Decoded {
    three_way(o, ["Low severity", "Medium severity", "High severity"])
}

pub fn decode_delay_type(o: f64) -> Decoded {
    three_way(o, ["Minor delay", "Delay", "Congestion"])
}

/// Maps `o` onto Monday..Sunday; confidence peaks at each bucket center `i/6`.
pub fn decode_day(o: f64) -> Decoded {
    let index = (o * 6.0).round().clamp(0.0, 6.0) as usize;
    let center = index as f64 / 6.0;

    Decoded {
        label: DAYS[index].to_string(),
        confidence: (1.0 - 2.0 * (o - center).abs()).clamp(0.0, 1.0),
    }
}

/// Maps `o` onto a zero-padded `HH:MM` clock string with confidence 1.0.
///
/// `o = 1.0` yields `"24:00"`.
pub fn decode_time(o: f64) -> Decoded {
    let minutes = (o * 1440.0).round() as u32;

    Decoded {
        label: format!("{:02}:{:02}", minutes / 60, minutes % 60),
        confidence: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_endpoints() {
        let low = decode_severity(0.0);
        assert_eq!(low.label, "Low severity");
        assert_eq!(low.confidence, 1.0);

        let mid = decode_severity(0.5);
        assert_eq!(mid.label, "Medium severity");
        assert_eq!(mid.confidence, 1.0);

        let high = decode_severity(1.0);
        assert_eq!(high.label, "High severity");
        assert_eq!(high.confidence, 1.0);
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(decode_severity(0.3299).label, "Low severity");
        assert_eq!(decode_severity(0.33).label, "Medium severity");
        assert_eq!(decode_severity(0.6599).label, "Medium severity");
        assert_eq!(decode_severity(0.66).label, "High severity");
    }

    #[test]
    fn test_medium_confidence_falls_off_from_center() {
        let c = decode_severity(0.4).confidence;
        assert!((c - 0.8).abs() < 1e-9);
        assert!(decode_severity(0.65).confidence < c);
    }

    #[test]
    fn test_delay_type_labels() {
        assert_eq!(decode_delay_type(0.1).label, "Minor delay");
        assert_eq!(decode_delay_type(0.5).label, "Delay");
        assert_eq!(decode_delay_type(0.9).label, "Congestion");
        assert!((decode_delay_type(0.9).confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_day_endpoints() {
        assert_eq!(decode_day(0.0).label, "Monday");
        assert_eq!(decode_day(1.0).label, "Sunday");
    }

    #[test]
    fn test_day_bucket_centers_have_full_confidence() {
        for (i, day) in DAYS.iter().enumerate() {
            let decoded = decode_day(i as f64 / 6.0);
            assert_eq!(decoded.label, *day);
            assert!((decoded.confidence - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_day_out_of_range_is_clamped() {
        assert_eq!(decode_day(-0.5).label, "Monday");
        assert_eq!(decode_day(1.5).label, "Sunday");
        assert_eq!(decode_day(1.5).confidence, 0.0);
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(decode_time(0.0).label, "00:00");
        assert_eq!(decode_time(0.5).label, "12:00");
        assert_eq!(decode_time(0.75).label, "18:00");
        assert_eq!(decode_time(1.0).label, "24:00");
        assert_eq!(decode_time(0.5).confidence, 1.0);
    }

    #[test]
    fn test_time_rounds_to_nearest_minute() {
        // 0.3 * 1440 = 432 minutes
        assert_eq!(decode_time(0.3).label, "07:12");
    }
}
