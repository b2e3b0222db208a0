//! Sign-in and sign-out flows.
//!
//! Credential verification happens in the backend; this service only
//! moves sessions in and out of the shared [`confeito_supabase::SessionStore`],
//! whose subscribers (navigation chrome, cart badge) react to the change.

use tracing::instrument;

use confeito_core::types::Email;
use confeito_supabase::{AuthUser, Session};

use crate::error::{AppError, Result};
use crate::services::register::ValidationError;
use crate::state::AppState;

/// Authentication service.
pub struct AuthService {
    state: AppState,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Sign in with email and password and publish the session.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] when the email is not structurally valid
    /// - [`AppError::Backend`] on wrong credentials or transport failure
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = Email::parse(email).map_err(|_| {
            AppError::Validation(vec![ValidationError {
                field: "email",
                message: "Email inválido".to_owned(),
            }])
        })?;

        let session = self.state.supabase().sign_in(&email, password).await?;
        self.state.session().set(Some(session.clone()));
        Ok(session)
    }

    /// Revoke the current session and publish the sign-out.
    ///
    /// Signed-out already is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] when revocation fails; the local
    /// session is kept in that case so the user can retry.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        let Some(token) = self.state.access_token() else {
            return Ok(());
        };

        self.state.supabase().sign_out(&token).await?;
        self.state.session().clear();
        Ok(())
    }

    /// Exchange a refresh token for a fresh session and publish it.
    ///
    /// Used to restore a session after the access token expires.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] when the refresh token was revoked.
    #[instrument(skip(self, refresh_token))]
    pub async fn restore(&self, refresh_token: &str) -> Result<Session> {
        let session = self.state.supabase().refresh(refresh_token).await?;
        self.state.session().set(Some(session.clone()));
        Ok(session)
    }

    /// The signed-in user, if any, from the local session.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.session().current().map(|session| session.user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use secrecy::SecretString;

    fn state() -> AppState {
        AppState::new(StorefrontConfig {
            supabase_url: "https://example.invalid".to_owned(),
            supabase_anon_key: SecretString::from("test-key"),
            viacep_base_url: "https://viacep.com.br".to_owned(),
        })
    }

    #[tokio::test]
    async fn test_sign_in_rejects_malformed_email_before_any_call() {
        let service = AuthService::new(state());
        let err = service.sign_in("not-an-email", "Senha@123").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.user_message(), "Email inválido");
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let service = AuthService::new(state());
        service.sign_out().await.unwrap();
        assert!(service.current_user().is_none());
    }
}
