use std::f64::consts::PI;

use vitalwatch_api::models::HeartRateFormat;

/// Core body temperature over a day, lowest before dawn and highest in the late afternoon.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    const BASELINE: f64 = 36.6;
    const AMPLITUDE: f64 = 0.4;
    // Peak around 17:00
    const PEAK: f64 = 0.71;

    let radians = (day_fraction - PEAK) * 2.0 * PI;
    ((radians.cos() * AMPLITUDE + BASELINE) * 100.0).round() / 100.0
}

pub fn simulated_heart_rate(day_fraction: f64) -> f64 {
    const RESTING_BPM: f64 = 58.0;
    const ACTIVE_BPM: f64 = 82.0;

    if (0.3..=0.9).contains(&day_fraction) {
        let radians = (day_fraction - 0.3) / 0.6 * PI;
        (radians.sin() * (ACTIVE_BPM - RESTING_BPM) + RESTING_BPM).round()
    } else {
        RESTING_BPM
    }
}

pub fn temperature_reading(ambient: f64, object: f64) -> String {
    format!("Ambient = {ambient:.2}*C\tObject = {object:.2}*C")
}

pub fn heart_rate_reading(bpm: f64, format: HeartRateFormat) -> String {
    match format {
        HeartRateFormat::Compact => format!("Avg BPM={}", bpm.round() as u32),
        HeartRateFormat::Spaced => format!("Avg BPM = {bpm:.1}"),
    }
}

pub fn location_reading(latitude: f64, longitude: f64) -> String {
    format!("Location: {latitude:.4},{longitude:.4}")
}

pub fn acceleration_reading(x: f64, y: f64, z: f64) -> String {
    format!("Acceleration X: {x:.2}, Y: {y:.2}, Z: {z:.2}")
}
