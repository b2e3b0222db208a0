//! Confeito Storefront - shopper-facing services.
//!
//! This crate is the application layer behind the shop's views: catalog
//! browsing, the session cart, registration, sign-in and the account
//! page. It owns no rendering and no routes; a UI embeds [`AppState`],
//! calls the services and shows whatever they return (including
//! [`error::AppError::user_message`] for failures).
//!
//! # Architecture
//!
//! - All persistence and authentication live in the hosted backend,
//!   reached through `confeito-supabase`
//! - State is explicitly owned: [`AppState`] is created once at startup
//!   and handed down, never reached through a global
//! - Cart mutations serialize through one async mutex inside
//!   [`services::CartService`], so rapid double-submissions cannot
//!   interleave
//!
//! # Example
//!
//! ```rust,ignore
//! use confeito_core::FilterState;
//! use confeito_storefront::{AppState, config::StorefrontConfig, services::CatalogService};
//!
//! let state = AppState::new(StorefrontConfig::from_env()?);
//! let catalog = CatalogService::new(state.clone());
//!
//! let page = catalog.browse(&FilterState::default()).await?;
//! for product in &page.items {
//!     println!("{} - R$ {}", product.title, product.price);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod services;
mod state;

pub use error::AppError;
pub use state::AppState;
