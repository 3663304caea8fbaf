use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde_json::{Value, json};
use tokio::time;

use crate::settings::{Settings, Wearable};
use crate::simulate::{
    acceleration_reading, heart_rate_reading, location_reading, simulated_heart_rate,
    simulated_temperature, temperature_reading,
};

pub mod settings;
mod simulate;

// Colombo, with a little drift per device
const HOME_LATITUDE: f64 = 6.9271;
const HOME_LONGITUDE: f64 = 79.8612;

pub async fn run(settings: &Arc<Settings>) {
    let client = reqwest::Client::new();
    let wearable = &settings.wearable;

    let mut interval = time::interval(Duration::from_secs(wearable.interval_secs.max(1)));
    loop {
        interval.tick().await;

        let day_fraction = day_fraction();
        for device_id in &wearable.device_ids {
            let payload = build_payload(device_id, &settings.target.secret_key, wearable, day_fraction);
            tracing::debug!("Send: {}", payload);

            match client.post(&settings.target.url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("{} accepted", device_id);
                }
                Ok(response) => {
                    tracing::warn!("{} rejected with {}", device_id, response.status());
                }
                Err(e) => tracing::error!("Failed to reach {}: {}", settings.target.url, e),
            }
        }
    }
}

fn day_fraction() -> f64 {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() % 86400)
        .unwrap_or_default();

    seconds as f64 / 86400.0
}

fn build_payload(device_id: &str, secret_key: &str, wearable: &Wearable, day_fraction: f64) -> Value {
    let mut rng = rand::rng();
    let roll: f64 = rng.random();

    if roll < wearable.sos_probability {
        return json!({
            "deviceId": device_id,
            "secretKey": secret_key,
            "SOS": true,
        });
    }

    if roll < wearable.sos_probability + wearable.fall_probability {
        return json!({
            "deviceId": device_id,
            "secretKey": secret_key,
            "acceleration": acceleration_reading(
                rng.random_range(-15.0..15.0),
                rng.random_range(-15.0..15.0),
                rng.random_range(-15.0..15.0),
            ),
        });
    }

    let temperature = simulated_temperature(day_fraction) + rng.random_range(-0.1..0.1);
    let heart_rate = simulated_heart_rate(day_fraction) + rng.random_range(-3.0..3.0);

    json!({
        "deviceId": device_id,
        "secretKey": secret_key,
        "temperature": temperature_reading(24.0 + rng.random_range(-1.0..1.0), temperature),
        "heartRate": heart_rate_reading(heart_rate, wearable.heart_rate_format),
        "location": location_reading(
            HOME_LATITUDE + rng.random_range(-0.01..0.01),
            HOME_LONGITUDE + rng.random_range(-0.01..0.01),
        ),
    })
}
