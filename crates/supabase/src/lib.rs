//! Typed client for the hosted Supabase backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - Auth goes through GoTrue (`/auth/v1`), rows through PostgREST
//!   (`/rest/v1`)
//! - Every response decodes into an explicit typed record at the boundary;
//!   a shape mismatch is a [`SupabaseError::Decode`], never silently
//!   tolerated
//!
//! # APIs
//!
//! ## Auth
//! - Sign-up with profile metadata, password sign-in, sign-out, refresh
//! - [`SessionStore`] with subscribe/unsubscribe change notification
//!
//! ## Rows
//! - `select`/`insert`/`update`/`delete`/`count` over the shop tables,
//!   driven by a [`Query`] filter spec
//!
//! # Example
//!
//! ```rust,ignore
//! use confeito_supabase::{Query, SupabaseClient, tables, CupcakeRow};
//!
//! let client = SupabaseClient::new("https://xyz.supabase.co", anon_key);
//!
//! // All products
//! let rows: Vec<CupcakeRow> = client.select(tables::CUPCAKES, Query::new(), None).await?;
//!
//! // One user's cart rows
//! let query = Query::new().eq("user_id", user_id);
//! let items: Vec<CartItemRow> = client
//!     .select(tables::CART_ITEMS, query, Some(&access_token))
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod auth;
mod client;
mod error;
mod query;
mod session;
pub mod tables;

pub use auth::{AuthUser, Session, SignUpMetadata};
pub use client::SupabaseClient;
pub use error::SupabaseError;
pub use query::{Direction, Query};
pub use session::{SessionStore, SubscriptionId};
pub use tables::*;
