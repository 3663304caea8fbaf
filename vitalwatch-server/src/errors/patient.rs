#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("No patient found for device {0}")]
    PatientNotFound(String),
}
