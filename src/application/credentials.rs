use crate::domain::errors::AuthError;
use crate::domain::ports::{ConfigLoadResult, CredentialSource, Credentials};
use tracing::{error, info, warn};

/// Two-tier credential acquisition: primary source, then fallback.
///
/// Only a `NotFound` from the primary moves on to the fallback. Any other
/// primary failure, or any fallback failure, is returned as an error.
pub struct CredentialResolver {
    primary: Box<dyn CredentialSource>,
    fallback: Box<dyn CredentialSource>,
}

impl CredentialResolver {
    pub fn new(primary: Box<dyn CredentialSource>, fallback: Box<dyn CredentialSource>) -> Self {
        Self { primary, fallback }
    }

    pub async fn resolve(&self) -> Result<Credentials, AuthError> {
        let primary_reason = match self.primary.load().await {
            ConfigLoadResult::Success(credentials) => {
                info!(source = self.primary.name(), "Loaded cluster credentials");
                return Ok(credentials);
            }
            ConfigLoadResult::OtherFailure(reason) => {
                error!(source = self.primary.name(), "Failed to load credentials: {}", reason);
                return Err(AuthError::Primary {
                    source_name: self.primary.name().to_string(),
                    reason,
                });
            }
            ConfigLoadResult::NotFound(reason) => reason,
        };

        warn!("Failed to load {}: {}", self.primary.name(), primary_reason);
        info!("Trying to load {}", self.fallback.name());

        match self.fallback.load().await {
            ConfigLoadResult::Success(credentials) => {
                info!(source = self.fallback.name(), "Loaded cluster credentials");
                Ok(credentials)
            }
            ConfigLoadResult::NotFound(reason) | ConfigLoadResult::OtherFailure(reason) => {
                error!("Failed to load {}: {}", self.fallback.name(), reason);
                Err(AuthError::Fallback {
                    source_name: self.fallback.name().to_string(),
                    primary_reason,
                    reason,
                })
            }
        }
    }
}
