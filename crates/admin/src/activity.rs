//! The append-only audit trail.
//!
//! Every admin mutation appends one row describing who did what to
//! which entity; the activity view lists the most recent hundred.

use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use confeito_supabase::{ActivityLogRow, Direction, NewActivityLog, Query, tables};

use crate::auth::require_admin;
use crate::error::Result;
use crate::state::AdminState;

/// How many rows the activity view shows.
const LOG_PAGE_LIMIT: u32 = 100;

/// Append one audit row.
///
/// `entity_id` is a string on purpose: batches audit as the joined id
/// list, creates audit by title.
///
/// # Errors
///
/// Returns [`crate::AdminError::Backend`] when the insert fails.
#[instrument(skip(state, details))]
pub async fn append(
    state: &AdminState,
    user_id: Uuid,
    action: &str,
    entity_type: &str,
    entity_id: String,
    details: Option<Value>,
) -> Result<()> {
    let row = NewActivityLog {
        user_id,
        action: action.to_owned(),
        entity_type: entity_type.to_owned(),
        entity_id,
        details,
    };

    state
        .supabase()
        .insert(tables::ACTIVITY_LOGS, &row, None)
        .await?;
    Ok(())
}

/// The most recent audit rows, newest first.
///
/// # Errors
///
/// Admin-gated; backend failures propagate as
/// [`crate::AdminError::Backend`].
#[instrument(skip(state))]
pub async fn list(state: &AdminState) -> Result<Vec<ActivityLogRow>> {
    require_admin(state).await?;

    let rows = state
        .supabase()
        .select(
            tables::ACTIVITY_LOGS,
            Query::new()
                .order("created_at", Direction::Desc)
                .limit(LOG_PAGE_LIMIT),
            None,
        )
        .await?;
    Ok(rows)
}
