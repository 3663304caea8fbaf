//! Grammars for the raw strings printed by the wearable's instruments.
//!
//! Only the first occurrence of an instrument label is read. The number after
//! it must end at whitespace, `*`, `,` or the end of the input, otherwise the
//! whole input is garbled and rejected.

use std::sync::LazyLock;

use regex::Regex;
use vitalwatch_api::models::HeartRateFormat;

use crate::errors::{DecodeError, SensorKind};

const TEMPERATURE_LABEL: &str = "Object = ";
const HEART_RATE_COMPACT_LABEL: &str = "Avg BPM=";
const HEART_RATE_SPACED_LABEL: &str = "Avg BPM = ";
const LOCATION_LABEL: &str = "Location: ";
const ACCELERATION_LABEL: &str = "Acceleration X: ";

static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-+]?\d+(?:\.\d+)?)(?:[\s*,]|$)").unwrap());

static HEART_RATE_COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:[\s*,]|$)").unwrap());

static HEART_RATE_SPACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(?:[\s*,]|$)").unwrap());

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?\d+(?:\.\d+)?,[-+]?\d+(?:\.\d+)?)(?:[\s*,]|$)").unwrap()
});

static ACCELERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([-+]?\d+(?:\.\d+)?), Y: ([-+]?\d+(?:\.\d+)?), Z: ([-+]?\d+(?:\.\d+)?)(?:[\s*,]|$)",
    )
    .unwrap()
});

/// Triaxial acceleration, axes kept as the instrument printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceleration {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// Match `pattern` against the text right after the first `label` in `input`.
fn capture<'a>(
    label: &str,
    pattern: &Regex,
    sensor: SensorKind,
    input: &'a str,
) -> Result<regex::Captures<'a>, DecodeError> {
    let start = input
        .find(label)
        .ok_or_else(|| DecodeError::new(sensor, input))?;

    pattern
        .captures(&input[start + label.len()..])
        .ok_or_else(|| DecodeError::new(sensor, input))
}

fn parse_number(text: &str, sensor: SensorKind, input: &str) -> Result<f64, DecodeError> {
    text.parse::<f64>()
        .map_err(|_| DecodeError::new(sensor, input))
}

/// `Object = <float>`
pub fn decode_temperature(input: &str) -> Result<f64, DecodeError> {
    let captures = capture(TEMPERATURE_LABEL, &TEMPERATURE, SensorKind::Temperature, input)?;

    parse_number(&captures[1], SensorKind::Temperature, input)
}

/// `Avg BPM=<int>`
pub fn decode_heart_rate_compact(input: &str) -> Result<f64, DecodeError> {
    let captures = capture(
        HEART_RATE_COMPACT_LABEL,
        &HEART_RATE_COMPACT,
        SensorKind::HeartRate,
        input,
    )?;

    parse_number(&captures[1], SensorKind::HeartRate, input)
}

/// `Avg BPM = <float>`
pub fn decode_heart_rate_spaced(input: &str) -> Result<f64, DecodeError> {
    let captures = capture(
        HEART_RATE_SPACED_LABEL,
        &HEART_RATE_SPACED,
        SensorKind::HeartRate,
        input,
    )?;

    parse_number(&captures[1], SensorKind::HeartRate, input)
}

/// `Location: <float>,<float>`, returned as the raw `"lat,lon"` text.
pub fn decode_location(input: &str) -> Result<String, DecodeError> {
    let captures = capture(LOCATION_LABEL, &LOCATION, SensorKind::Location, input)?;

    Ok(captures[1].to_string())
}

/// `Acceleration X: <float>, Y: <float>, Z: <float>`
pub fn decode_acceleration(input: &str) -> Result<Acceleration, DecodeError> {
    let captures = capture(
        ACCELERATION_LABEL,
        &ACCELERATION,
        SensorKind::Acceleration,
        input,
    )?;

    Ok(Acceleration {
        x: captures[1].to_string(),
        y: captures[2].to_string(),
        z: captures[3].to_string(),
    })
}

/// Picks the heart rate entry point for a deployment. The two grammars are
/// never tried one after the other.
pub trait HeartRateDecoder {
    fn decode(&self, input: &str) -> Result<f64, DecodeError>;
}

impl HeartRateDecoder for HeartRateFormat {
    fn decode(&self, input: &str) -> Result<f64, DecodeError> {
        match self {
            HeartRateFormat::Compact => decode_heart_rate_compact(input),
            HeartRateFormat::Spaced => decode_heart_rate_spaced(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_temperature() {
        for value in [36.6, 0.0, -12.25, 41.0, 37.125] {
            let input = format!("Ambient = 24.31*C\tObject = {value}*C");
            assert_eq!(decode_temperature(&input).unwrap(), value);
        }
        assert_eq!(decode_temperature("Object = 37").unwrap(), 37.0);
        assert_eq!(decode_temperature("Object = 36.5\nObject = 39.0").unwrap(), 36.5);
        assert_eq!(decode_temperature("Object = 36.5, Ambient = 24.0").unwrap(), 36.5);
    }

    #[test]
    fn test_decode_temperature_rejects_malformed() {
        for input in [
            "",
            "Object=36.6",
            "Object = ",
            "Object = abc",
            "Object = 36.6.1",
            "Ambient = 24.3",
            "Object = 3e7*C",
            "Object = 36.6.1*C Object = 37.0*C",
            "Object = 37.0C",
        ] {
            let error = decode_temperature(input).unwrap_err();
            assert_eq!(error.sensor, SensorKind::Temperature);
            assert_eq!(error.input, input);
        }
    }

    #[test]
    fn test_decode_heart_rate_compact() {
        assert_eq!(decode_heart_rate_compact("Avg BPM=72").unwrap(), 72.0);
        assert_eq!(decode_heart_rate_compact("IR=51234, BPM=70.12, Avg BPM=68").unwrap(), 68.0);

        assert!(decode_heart_rate_compact("Avg BPM = 72").is_err());
        assert!(decode_heart_rate_compact("Avg BPM=72.5").is_err());
        assert!(decode_heart_rate_compact("Avg BPM=").is_err());
        assert!(decode_heart_rate_compact("Avg BPM=7e1").is_err());
        assert!(decode_heart_rate_compact("Avg BPM=x Avg BPM=72").is_err());
    }

    #[test]
    fn test_decode_heart_rate_spaced() {
        assert_eq!(decode_heart_rate_spaced("Avg BPM = 72.5").unwrap(), 72.5);
        assert_eq!(decode_heart_rate_spaced("Avg BPM = 80").unwrap(), 80.0);

        assert!(decode_heart_rate_spaced("Avg BPM=72").is_err());
        assert!(decode_heart_rate_spaced("Avg BPM = x").is_err());
        assert!(decode_heart_rate_spaced("Avg BPM = 72.5E2").is_err());
    }

    #[test]
    fn test_heart_rate_format_selects_grammar() {
        assert_eq!(HeartRateFormat::Compact.decode("Avg BPM=90").unwrap(), 90.0);
        assert!(HeartRateFormat::Compact.decode("Avg BPM = 90.0").is_err());
        assert_eq!(HeartRateFormat::Spaced.decode("Avg BPM = 90.0").unwrap(), 90.0);
        assert!(HeartRateFormat::Spaced.decode("Avg BPM=90").is_err());
    }

    #[test]
    fn test_decode_location() {
        assert_eq!(decode_location("Location: 6.9271,79.8612").unwrap(), "6.9271,79.8612");
        assert_eq!(decode_location("GPS fix Location: -33.8688,151.2093").unwrap(), "-33.8688,151.2093");

        assert!(decode_location("Location: 6.9271, 79.8612").is_err());
        assert!(decode_location("Location:6.9271,79.8612").is_err());
        assert!(decode_location("Location: 6.9271").is_err());
        assert!(decode_location("Location: 6.9271,79.86e1").is_err());
        assert!(decode_location("Location: ?,? Location: 6.9271,79.8612").is_err());
    }

    #[test]
    fn test_decode_acceleration_keeps_axis_text() {
        let acceleration = decode_acceleration("Acceleration X: -0.50, Y: +9.81, Z: 0.030").unwrap();

        assert_eq!(
            acceleration,
            Acceleration {
                x: "-0.50".to_string(),
                y: "+9.81".to_string(),
                z: "0.030".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_acceleration_rejects_malformed() {
        for input in [
            "Acceleration X: 1.0, Y: 2.0",
            "Acceleration X: 1.0,Y: 2.0,Z: 3.0",
            "Acceleration X: a, Y: 2.0, Z: 3.0",
            "X: 1.0, Y: 2.0, Z: 3.0",
            "Acceleration X: 1.0, Y: 2.0, Z: 3.0e5",
            "Acceleration X: 1e1, Y: 2.0, Z: 3.0",
            "Acceleration X: -, Y: 2.0, Z: 3.0 Acceleration X: 1.0, Y: 2.0, Z: 3.0",
        ] {
            assert_eq!(
                decode_acceleration(input).unwrap_err().sensor,
                SensorKind::Acceleration
            );
        }
    }
}
