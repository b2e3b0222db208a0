//! Confeito Core - Shared domain library.
//!
//! This crate provides the domain types and the two in-memory cores used
//! across all Confeito components:
//! - `storefront` - Shopper-facing catalog, cart and account services
//! - `admin` - Back-office product, report and audit services
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails and CPFs
//! - [`cart`] - The session-scoped cart store
//! - [`catalog`] - The pure product filter/sort/paginate pipeline

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartItem};
pub use catalog::{CatalogPage, Category, FilterState, Product, SortKey, browse};
pub use types::*;
