use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    HeartRate,
    Location,
    Acceleration,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::HeartRate => write!(f, "heart rate"),
            SensorKind::Location => write!(f, "location"),
            SensorKind::Acceleration => write!(f, "acceleration"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed {sensor} telemetry: {input:?}")]
pub struct DecodeError {
    pub sensor: SensorKind,
    pub input: String,
}

impl DecodeError {
    pub fn new(sensor: SensorKind, input: &str) -> Self {
        Self {
            sensor,
            input: input.to_string(),
        }
    }
}
