//! PostgREST row operations.
//!
//! One [`SupabaseClient`] is shared by every service; it is cheaply
//! cloneable via `Arc`. Row-level security runs on the backend, keyed by
//! the bearer token: operations take an optional user access token and
//! fall back to the API key alone for anonymous reads.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::SupabaseError;
use crate::query::Query;

/// Hard per-request timeout. In-flight calls are also cancelled whenever
/// the caller's future is dropped; nothing outlives its initiator.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the hosted backend's REST and auth endpoints.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

pub(crate) struct SupabaseClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) rest_base: String,
    pub(crate) auth_base: String,
    pub(crate) api_key: SecretString,
}

impl SupabaseClient {
    /// Create a new client for a project URL (e.g.
    /// `https://xyz.supabase.co`) and an API key (anon key for the
    /// storefront, service-role key for the back office).
    #[must_use]
    pub fn new(project_url: &str, api_key: SecretString) -> Self {
        let base = project_url.trim_end_matches('/');

        Self {
            inner: Arc::new(SupabaseClientInner {
                http: reqwest::Client::builder()
                    .timeout(REQUEST_TIMEOUT)
                    .build()
                    .unwrap_or_default(),
                rest_base: format!("{base}/rest/v1"),
                auth_base: format!("{base}/auth/v1"),
                api_key,
            }),
        }
    }

    pub(crate) fn inner(&self) -> &SupabaseClientInner {
        &self.inner
    }

    /// Build a REST request with auth headers applied.
    ///
    /// The `apikey` header always carries the configured key; the bearer
    /// token is the user's access token when one is given, enabling
    /// row-level security, and the key itself otherwise.
    fn rest_request(&self, method: Method, table: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}/{table}", self.inner.rest_base);
        let key = self.inner.api_key.expose_secret();

        self.inner
            .http
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(token.unwrap_or(key))
    }

    /// Select rows matching `query`, decoded into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] on a non-success status and
    /// [`SupabaseError::Decode`] when the rows do not match `T`.
    #[instrument(skip(self, token), fields(table = %table))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
        token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self
            .rest_request(Method::GET, table, token)
            .query(&query.to_params())
            .send()
            .await?;

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Select at most one row matching `query`.
    ///
    /// Returns `None` when nothing matches; a multi-row match returns the
    /// first row in the backend's order.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SupabaseClient::select`].
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
        token: Option<&str>,
    ) -> Result<Option<T>, SupabaseError> {
        let mut rows = self.select::<T>(table, query.limit(1), token).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Insert one row.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] when the backend refuses the row
    /// (constraint violations surface here, including stock shortage).
    #[instrument(skip(self, row, token), fields(table = %table))]
    pub async fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
        token: Option<&str>,
    ) -> Result<(), SupabaseError> {
        let response = self
            .rest_request(Method::POST, table, token)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Update all rows matching `query` with the sparse `patch`.
    ///
    /// The patch serializes only its present fields; absent fields are
    /// left untouched on the backend.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] on a non-success status.
    #[instrument(skip(self, patch, token), fields(table = %table))]
    pub async fn update<P: Serialize + Sync>(
        &self,
        table: &str,
        query: Query,
        patch: &P,
        token: Option<&str>,
    ) -> Result<(), SupabaseError> {
        let response = self
            .rest_request(Method::PATCH, table, token)
            .query(&query.to_params())
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Delete all rows matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] on a non-success status.
    #[instrument(skip(self, token), fields(table = %table))]
    pub async fn delete(
        &self,
        table: &str,
        query: Query,
        token: Option<&str>,
    ) -> Result<(), SupabaseError> {
        let response = self
            .rest_request(Method::DELETE, table, token)
            .query(&query.to_params())
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Count rows matching `query` without fetching them.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] on a non-success status, or a
    /// decode error when the backend omits the count header.
    #[instrument(skip(self, token), fields(table = %table))]
    pub async fn count(
        &self,
        table: &str,
        query: Query,
        token: Option<&str>,
    ) -> Result<u64, SupabaseError> {
        let response = self
            .rest_request(Method::HEAD, table, token)
            .query(&query.to_params())
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = response.status();
        let content_range = response
            .headers()
            .get("Content-Range")
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        if !status.is_success() {
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message: String::new(),
            });
        }

        content_range
            .as_deref()
            .and_then(parse_content_range_total)
            .ok_or(SupabaseError::Api {
                status: status.as_u16(),
                message: "missing count in Content-Range".to_owned(),
            })
    }
}

/// Extract the total from a `Content-Range` header ("0-24/3573" or
/// "*/0").
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.parse().ok()
}

/// Read the body and turn a non-success status into an API error carrying
/// the backend's message.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<String, SupabaseError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let message = extract_error_message(&body);
    tracing::warn!(
        status = %status,
        message = %message,
        "backend returned an error"
    );

    Err(SupabaseError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Pull the human-readable message out of an error body.
///
/// PostgREST uses `message`; GoTrue uses `msg` or `error_description`
/// depending on the endpoint. An unparseable body is passed through
/// truncated so diagnostics are never empty.
fn extract_error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        msg: Option<String>,
        error_description: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.message.or(parsed.msg).or(parsed.error_description)
    {
        return message;
    }

    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn test_extract_error_message_postgrest() {
        let body = r#"{"code":"P0001","message":"Not enough stock","details":null}"#;
        assert_eq!(extract_error_message(body), "Not enough stock");
    }

    #[test]
    fn test_extract_error_message_gotrue() {
        let body = r#"{"msg":"Invalid login credentials"}"#;
        assert_eq!(extract_error_message(body), "Invalid login credentials");

        let body = r#"{"error":"invalid_grant","error_description":"Invalid refresh token"}"#;
        assert_eq!(extract_error_message(body), "Invalid refresh token");
    }

    #[test]
    fn test_extract_error_message_falls_back_to_body() {
        assert_eq!(extract_error_message("<html>bad gateway</html>"), "<html>bad gateway</html>");
    }
}
