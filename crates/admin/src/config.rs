//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUPABASE_URL` - Project URL (e.g., `https://xyz.supabase.co`)
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role API key. This key
//!   bypasses row-level security; it must never reach a shopper-facing
//!   build.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Clone)]
pub struct AdminConfig {
    /// Backend project URL.
    pub supabase_url: String,
    /// Service-role API key.
    pub service_role_key: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_role_key", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or the
    /// URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let supabase_url = required("SUPABASE_URL")?;
        Url::parse(&supabase_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SUPABASE_URL".to_owned(), e.to_string()))?;

        let service_role_key = SecretString::from(required("SUPABASE_SERVICE_ROLE_KEY")?);

        Ok(Self {
            supabase_url,
            service_role_key,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}
