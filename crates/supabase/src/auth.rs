//! GoTrue authentication operations.
//!
//! The backend owns credential storage, password verification and token
//! issuance; this module only speaks the endpoints the shop uses:
//! sign-up (with profile metadata), password sign-in, sign-out, token
//! refresh, current-user lookup and the admin user-deletion call.

use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use confeito_core::Email;

use crate::SupabaseError;
use crate::client::{SupabaseClient, check_status};

/// The authenticated user as GoTrue reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Backend-issued user id.
    pub id: Uuid,
    /// Email, absent for anonymous users.
    pub email: Option<String>,
    /// Free-form metadata attached at sign-up (names, CPF).
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// An authenticated session: the bearer token pair plus its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// JWT sent as the bearer token on row operations.
    pub access_token: String,
    /// Opaque token used to obtain a fresh access token.
    pub refresh_token: String,
    /// Access-token lifetime in seconds, from issuance.
    pub expires_in: i64,
    /// The session's user.
    pub user: AuthUser,
}

impl Session {
    /// Earliest instant at which the access token may have expired,
    /// assuming it was issued `expires_in` seconds before `now`.
    #[must_use]
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.expires_in)
    }
}

/// Profile fields attached to the sign-up request.
///
/// Serialized with the camelCase keys the profile trigger expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpMetadata {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email, duplicated into the profile row.
    pub email: String,
    /// Validated CPF digits.
    pub cpf: String,
}

impl SupabaseClient {
    fn auth_request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let inner = self.inner();
        let url = format!("{}/{path}", inner.auth_base);
        let key = inner.api_key.expose_secret();

        inner
            .http
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(token.unwrap_or(key))
    }

    /// Register a new user with email, password and profile metadata.
    ///
    /// Returns the created user. Whether a session is issued immediately
    /// depends on the project's email-confirmation setting; callers send
    /// the user to the login page either way, as the shop does.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] when the backend refuses the
    /// sign-up (duplicate email, weak password per backend policy).
    #[instrument(skip(self, password, metadata), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &Email,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<AuthUser, SupabaseError> {
        let response = self
            .auth_request(Method::POST, "signup", None)
            .json(&json!({
                "email": email.as_str(),
                "password": password,
                "data": metadata,
            }))
            .send()
            .await?;

        let body = check_status(response).await?;

        // With auto-confirm enabled the body is a session wrapping the
        // user; otherwise it is the user itself.
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let user_value = match value {
            serde_json::Value::Object(mut fields) if fields.contains_key("user") => fields
                .remove("user")
                .unwrap_or(serde_json::Value::Null),
            other => other,
        };
        Ok(serde_json::from_value(user_value)?)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] on invalid credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &Email, password: &str) -> Result<Session, SupabaseError> {
        let response = self
            .auth_request(Method::POST, "token?grant_type=password", None)
            .json(&json!({
                "email": email.as_str(),
                "password": password,
            }))
            .send()
            .await?;

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Exchange a refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] when the refresh token was revoked
    /// or already rotated.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, SupabaseError> {
        let response = self
            .auth_request(Method::POST, "token?grant_type=refresh_token", None)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Revoke the session behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] when the token is already invalid.
    #[instrument(skip(self, access_token))]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let response = self
            .auth_request(Method::POST, "logout", Some(access_token))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Fetch the user behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] when the token is expired or
    /// revoked.
    #[instrument(skip(self, access_token))]
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let response = self
            .auth_request(Method::GET, "user", Some(access_token))
            .send()
            .await?;

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Delete a user by id.
    ///
    /// Only succeeds when this client's key carries the admin privilege;
    /// the account-deletion flow is configured that way deliberately.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] when the key lacks the privilege or
    /// the user does not exist.
    #[instrument(skip(self))]
    pub async fn admin_delete_user(&self, user_id: Uuid) -> Result<(), SupabaseError> {
        let response = self
            .auth_request(Method::DELETE, &format!("admin/users/{user_id}"), None)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
