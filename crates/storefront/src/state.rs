//! Application state shared across services.

use std::sync::Arc;

use confeito_supabase::{SessionStore, SupabaseClient};

use crate::config::StorefrontConfig;

/// Application state shared across all storefront services.
///
/// This struct is cheaply cloneable via `Arc`. It is created once at
/// startup and injected into the services that need it; there is no
/// global to reach for.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    supabase: SupabaseClient,
    session: SessionStore,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let supabase = SupabaseClient::new(&config.supabase_url, config.supabase_anon_key.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                supabase,
                session: SessionStore::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The current access token, if a user is signed in.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.inner.session.access_token()
    }
}
