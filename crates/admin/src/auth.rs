//! The admin gate.
//!
//! Admin status lives on the user's own `profiles` row (`is_admin`).
//! Every back-office entry point calls [`require_admin`] first; a
//! missing profile row or an unreadable flag means not an admin, never
//! an escalation.

use tracing::{instrument, warn};
use uuid::Uuid;

use confeito_core::Email;
use confeito_supabase::{AdminFlagRow, Query, Session, tables};

use crate::error::{AdminError, Result};
use crate::state::AdminState;

/// Sign in a staff member and publish the session.
///
/// # Errors
///
/// Returns [`AdminError::Backend`] on bad credentials; admin status is
/// checked separately by [`require_admin`].
#[instrument(skip(state, password), fields(email = %email))]
pub async fn sign_in(state: &AdminState, email: &Email, password: &str) -> Result<Session> {
    let session = state.supabase().sign_in(email, password).await?;
    state.session().set(Some(session.clone()));
    Ok(session)
}

/// Check whether the signed-in user is an administrator, returning their
/// user id for audit rows.
///
/// # Errors
///
/// - [`AdminError::NotAuthenticated`] with no session
/// - [`AdminError::NotAuthorized`] when the profile row is missing or
///   `is_admin` is not true
pub async fn require_admin(state: &AdminState) -> Result<Uuid> {
    let session = state
        .session()
        .current()
        .ok_or(AdminError::NotAuthenticated)?;

    if is_admin(state, session.user.id).await? {
        Ok(session.user.id)
    } else {
        Err(AdminError::NotAuthorized)
    }
}

/// Read the `is_admin` flag from the user's profile row.
///
/// # Errors
///
/// Returns [`AdminError::Backend`] when the select itself fails.
#[instrument(skip(state))]
pub async fn is_admin(state: &AdminState, user_id: Uuid) -> Result<bool> {
    let flag: Option<AdminFlagRow> = state
        .supabase()
        .select_one(
            tables::PROFILES,
            Query::new().select("is_admin").eq("id", user_id),
            None,
        )
        .await?;

    let Some(flag) = flag else {
        warn!(%user_id, "no profile row while checking admin status");
        return Ok(false);
    };

    Ok(flag.is_admin.unwrap_or(false))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use secrecy::SecretString;

    fn state() -> AdminState {
        AdminState::new(AdminConfig {
            supabase_url: "https://example.invalid".to_owned(),
            service_role_key: SecretString::from("service-key"),
        })
    }

    #[tokio::test]
    async fn test_require_admin_without_session() {
        let err = require_admin(&state()).await.unwrap_err();
        assert!(matches!(err, AdminError::NotAuthenticated));
    }
}
