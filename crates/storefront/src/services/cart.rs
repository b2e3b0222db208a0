//! The session cart service.
//!
//! Wraps the in-memory cart store with the two concerns the store itself
//! does not have: authentication (adding requires a signed-in user, since
//! the backend mirrors the line into a `cart_items` row) and mutation
//! serialization. All mutations go through one async mutex, so a rapid
//! double-submission becomes two ordered calls instead of a race - the
//! second add merges into the first line.

use tokio::sync::Mutex;
use tracing::{instrument, warn};

use confeito_core::cart::{Cart, CartItem};
use confeito_core::catalog::Product;
use confeito_core::types::{Price, ProductId};
use confeito_supabase::{NewCartItem, Query, tables};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart service owning the session cart.
///
/// Create one per session and keep it alive for the session's duration;
/// the cart is not persisted across reloads.
pub struct CartService {
    state: AppState,
    cart: Mutex<Cart>,
}

impl CartService {
    /// Create a service with an empty cart.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            cart: Mutex::new(Cart::new()),
        }
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// The line is first mirrored into the backend's `cart_items` table
    /// (which enforces the stock constraint), then merged into the local
    /// cart with the discounted unit price snapshotted at this moment.
    ///
    /// `quantity` comes from the card's stepper, which clamps it to 1-99.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotAuthenticated`] when no user is signed in
    /// - [`AppError::StockShortage`] when the backend refuses the insert
    /// - [`AppError::Backend`] for any other backend failure
    #[instrument(skip(self, product), fields(product_id = %product.id, quantity))]
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<()> {
        let session = self
            .state
            .session()
            .current()
            .ok_or(AppError::NotAuthenticated)?;

        // Hold the cart lock across the mirror call: this is the single
        // serialization point for cart mutations.
        let mut cart = self.cart.lock().await;

        let row = NewCartItem {
            cupcake_id: product.id.as_i64(),
            quantity: i32::try_from(quantity).unwrap_or(i32::MAX),
            user_id: session.user.id,
        };
        self.state
            .supabase()
            .insert(tables::CART_ITEMS, &row, Some(&session.access_token))
            .await?;

        cart.add(
            product.id,
            &product.title,
            product.discounted_price(),
            quantity,
        );
        Ok(())
    }

    /// Remove the line for `id`. A missing line is a no-op.
    ///
    /// When a user is signed in the mirrored row is also deleted,
    /// best-effort: a backend failure is logged and the local removal
    /// still happens, matching the operation's always-succeeds contract.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: ProductId) {
        let mut cart = self.cart.lock().await;

        if let Some(session) = self.state.session().current() {
            let query = Query::new()
                .eq("user_id", session.user.id)
                .eq("cupcake_id", id.as_i64());
            if let Err(err) = self
                .state
                .supabase()
                .delete(tables::CART_ITEMS, query, Some(&session.access_token))
                .await
            {
                warn!(%id, error = %err, "failed to delete mirrored cart row");
            }
        }

        cart.remove(id);
    }

    /// Set the quantity for `id` verbatim (no clamping on this path).
    /// A missing line is a no-op.
    pub async fn set_quantity(&self, id: ProductId, quantity: u32) {
        self.cart.lock().await.set_quantity(id, quantity);
    }

    /// Empty the cart.
    pub async fn clear(&self) {
        self.cart.lock().await.clear();
    }

    /// Snapshot of the current lines, in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.cart.lock().await.items().to_vec()
    }

    /// Current total, recomputed from the lines.
    pub async fn total(&self) -> Price {
        self.cart.lock().await.total()
    }

    /// Number of distinct lines.
    pub async fn len(&self) -> usize {
        self.cart.lock().await.len()
    }

    /// Whether the cart is empty.
    pub async fn is_empty(&self) -> bool {
        self.cart.lock().await.is_empty()
    }
}
