use std::sync::Arc;

use crate::configs::Auth;
use crate::errors::AuthError;
use crate::repositories::DeviceRepository;

/// Shared secret plus device registration check in front of the pipeline.
pub struct AuthService {
    secret: String,
    device_repository: Arc<DeviceRepository>,
}

impl AuthService {
    pub fn new(auth: Auth, device_repository: Arc<DeviceRepository>) -> Self {
        Self {
            secret: auth.secret,
            device_repository,
        }
    }

    pub fn verify_secret(&self, secret_key: Option<&str>) -> Result<(), AuthError> {
        match secret_key {
            None | Some("") => Err(AuthError::MissingCredentials),
            Some(key) if key == self.secret => Ok(()),
            Some(_) => Err(AuthError::InvalidSecret),
        }
    }

    pub async fn authenticate(
        &self,
        device_id: Option<&str>,
        secret_key: Option<&str>,
    ) -> Result<(), AuthError> {
        let device_id = device_id
            .filter(|id| !id.is_empty())
            .ok_or(AuthError::MissingCredentials)?;
        self.verify_secret(secret_key)?;

        if !self.device_repository.exists(device_id).await? {
            return Err(AuthError::DeviceNotRegistered(device_id.to_string()));
        }

        Ok(())
    }
}
