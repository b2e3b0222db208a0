//! The account page: profile, address and account deletion.

use tracing::instrument;

use confeito_supabase::{ProfilePatch, ProfileRow, Query, SupabaseError, tables};

use crate::error::{AppError, Result};
use crate::services::cep::{CepAddress, CepError, ViaCepClient};
use crate::state::AppState;

/// The address section of the account form.
#[derive(Debug, Clone, Default)]
pub struct AddressForm {
    pub cep: String,
    pub address: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
}

/// Account service for the signed-in user's own profile row.
pub struct AccountService {
    state: AppState,
    cep: ViaCepClient,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let cep = ViaCepClient::new(&state.config().viacep_base_url);
        Self { state, cep }
    }

    /// Load the signed-in user's profile row.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotAuthenticated`] with no session (the view
    ///   redirects to login)
    /// - [`AppError::Backend`] when the row is missing or the select
    ///   fails
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<ProfileRow> {
        let session = self
            .state
            .session()
            .current()
            .ok_or(AppError::NotAuthenticated)?;

        self.state
            .supabase()
            .select_one(
                tables::PROFILES,
                Query::new().eq("id", session.user.id),
                Some(&session.access_token),
            )
            .await?
            .ok_or_else(|| AppError::Backend(SupabaseError::NotFound("profile".to_owned())))
    }

    /// Prefill street/neighborhood/city for a postal code.
    ///
    /// # Errors
    ///
    /// Propagates [`CepError`]; the caller shows
    /// [`CepError::user_message`] and leaves the fields editable.
    pub async fn lookup_address(&self, code: &str) -> std::result::Result<CepAddress, CepError> {
        self.cep.lookup(code).await
    }

    /// Save the address section.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotAuthenticated`] with no session
    /// - [`AppError::Backend`] when the update fails
    #[instrument(skip(self, form))]
    pub async fn update_address(&self, form: &AddressForm) -> Result<()> {
        let session = self
            .state
            .session()
            .current()
            .ok_or(AppError::NotAuthenticated)?;

        let patch = ProfilePatch {
            cep: Some(form.cep.clone()),
            address: Some(form.address.clone()),
            number: Some(form.number.clone()),
            complement: Some(form.complement.clone()),
            neighborhood: Some(form.neighborhood.clone()),
            city: Some(form.city.clone()),
            additional_info: None,
        };

        self.state
            .supabase()
            .update(
                tables::PROFILES,
                Query::new().eq("id", session.user.id),
                &patch,
                Some(&session.access_token),
            )
            .await?;
        Ok(())
    }

    /// Save the free-text additional info section.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AccountService::update_address`].
    #[instrument(skip(self, additional_info))]
    pub async fn update_additional_info(&self, additional_info: &str) -> Result<()> {
        let session = self
            .state
            .session()
            .current()
            .ok_or(AppError::NotAuthenticated)?;

        let patch = ProfilePatch {
            additional_info: Some(additional_info.to_owned()),
            ..ProfilePatch::default()
        };

        self.state
            .supabase()
            .update(
                tables::PROFILES,
                Query::new().eq("id", session.user.id),
                &patch,
                Some(&session.access_token),
            )
            .await?;
        Ok(())
    }

    /// Delete the signed-in user's account and drop the session.
    ///
    /// Calls the backend's admin deletion endpoint, as the shop's
    /// delete-account section does; it only succeeds when the configured
    /// key carries that privilege.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotAuthenticated`] with no session
    /// - [`AppError::Backend`] when the deletion is refused
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<()> {
        let session = self
            .state
            .session()
            .current()
            .ok_or(AppError::NotAuthenticated)?;

        self.state
            .supabase()
            .admin_delete_user(session.user.id)
            .await?;

        self.state.session().clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use secrecy::SecretString;

    fn service() -> AccountService {
        AccountService::new(AppState::new(StorefrontConfig {
            supabase_url: "https://example.invalid".to_owned(),
            supabase_anon_key: SecretString::from("test-key"),
            viacep_base_url: "https://viacep.com.br".to_owned(),
        }))
    }

    #[tokio::test]
    async fn test_profile_requires_session() {
        let err = service().profile().await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_updates_require_session() {
        let service = service();

        let err = service
            .update_address(&AddressForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));

        let err = service.update_additional_info("casa dos fundos").await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));

        let err = service.delete_account().await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
    }
}
