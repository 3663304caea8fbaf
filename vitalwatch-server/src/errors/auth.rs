use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing device id or secret key")]
    MissingCredentials,

    #[error("Invalid secret key")]
    InvalidSecret,

    #[error("Device {0} is not registered")]
    DeviceNotRegistered(String),

    #[error("Registry lookup failed: {0}")]
    RegistryUnavailable(#[from] sqlx::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidSecret => StatusCode::UNAUTHORIZED,
            AuthError::DeviceNotRegistered(_) => StatusCode::UNAUTHORIZED,
            AuthError::RegistryUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
