//! Registered-user directory.

use tracing::instrument;

use confeito_supabase::{Direction, ProfileRow, Query, tables};

use crate::auth::require_admin;
use crate::error::Result;
use crate::state::AdminState;

/// All registered profiles, newest first.
///
/// # Errors
///
/// - [`crate::AdminError::NotAuthenticated`] /
///   [`crate::AdminError::NotAuthorized`] from the admin gate
/// - [`crate::AdminError::Backend`] when the select fails
#[instrument(skip(state))]
pub async fn list(state: &AdminState) -> Result<Vec<ProfileRow>> {
    require_admin(state).await?;

    let rows = state
        .supabase()
        .select(
            tables::PROFILES,
            Query::new().order("created_at", Direction::Desc),
            None,
        )
        .await?;
    Ok(rows)
}
