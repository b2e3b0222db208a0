//! Application state shared across admin services.

use std::sync::Arc;

use confeito_supabase::{SessionStore, SupabaseClient};

use crate::config::AdminConfig;

/// Application state shared across all admin services.
///
/// Cheaply cloneable via `Arc`. The embedded client carries the
/// service-role key; the [`crate::auth::require_admin`] gate is what
/// keeps non-admins out.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

struct AdminStateInner {
    config: AdminConfig,
    supabase: SupabaseClient,
    session: SessionStore,
}

impl AdminState {
    /// Create a new admin state from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let supabase = SupabaseClient::new(&config.supabase_url, config.service_role_key.clone());

        Self {
            inner: Arc::new(AdminStateInner {
                config,
                supabase,
                session: SessionStore::new(),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
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
}
