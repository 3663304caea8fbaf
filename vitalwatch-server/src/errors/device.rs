#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Device {0} not found")]
    DeviceNotFound(String),
}
