//! Catalog fetching and browsing.
//!
//! The raw product list is fetched from the backend and cached for five
//! minutes; the filter/sort/paginate pipeline runs over the cached list
//! on every call, so filter changes never hit the network.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use confeito_core::catalog::{self, CatalogPage, FilterState, Product};
use confeito_core::types::{Price, ProductId};
use confeito_supabase::{CupcakeRow, MenuItemRow, Query, tables};

use crate::error::Result;
use crate::state::AppState;

/// Cache TTL for the raw product list.
const CATALOG_TTL: Duration = Duration::from_secs(300); // 5 minutes

const CATALOG_CACHE_KEY: &str = "catalog";

/// One line of the menu page (id, title, ingredients, price only).
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: ProductId,
    pub title: String,
    pub ingredients: String,
    pub price: Price,
}

/// Catalog service: product list, menu and the browse pipeline.
#[derive(Clone)]
pub struct CatalogService {
    state: AppState,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let cache = Cache::builder()
            .max_capacity(4)
            .time_to_live(CATALOG_TTL)
            .build();

        Self { state, cache }
    }

    /// The full product list, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the list cannot be fetched and no
    /// cached copy exists.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>> {
        if let Some(products) = self.cache.get(CATALOG_CACHE_KEY).await {
            debug!("cache hit for catalog");
            return Ok(products);
        }

        let rows: Vec<CupcakeRow> = self
            .state
            .supabase()
            .select(tables::CUPCAKES, Query::new(), None)
            .await?;

        let products: Arc<Vec<Product>> =
            Arc::new(rows.into_iter().map(Product::from).collect());

        self.cache
            .insert(CATALOG_CACHE_KEY, Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Run the view pipeline over the current catalog.
    ///
    /// # Errors
    ///
    /// Returns a backend error only when the product list itself cannot
    /// be fetched; the pipeline is pure.
    pub async fn browse(&self, filters: &FilterState) -> Result<CatalogPage> {
        let products = self.products().await?;
        Ok(catalog::browse(&products, filters))
    }

    /// The menu page listing: id, title, ingredients and price.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the select fails.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = self
            .state
            .supabase()
            .select(
                tables::CUPCAKES,
                Query::new().select("id, title, ingredients, price"),
                None,
            )
            .await?;

        Ok(rows.into_iter().map(menu_item_from_row).collect())
    }

    /// Drop the cached product list so the next read refetches.
    pub async fn invalidate(&self) {
        self.cache.invalidate(CATALOG_CACHE_KEY).await;
    }
}

fn menu_item_from_row(row: MenuItemRow) -> MenuItem {
    MenuItem {
        id: ProductId::new(row.id),
        title: row.title,
        ingredients: row.ingredients,
        price: Price::new(row.price),
    }
}

/// Format a price range label the way the filter section shows it
/// ("R$ 0 - R$ 100").
#[must_use]
pub fn price_range_label(min: Price, max: Price) -> String {
    format!(
        "R$ {} - R$ {}",
        min.amount().normalize(),
        max.amount().normalize()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_menu_item_from_row() {
        let row = MenuItemRow {
            id: 4,
            title: "Red Velvet".to_owned(),
            ingredients: "Cacau, corante natural, cream cheese".to_owned(),
            price: Decimal::new(95, 1),
        };
        let item = menu_item_from_row(row);

        assert_eq!(item.id, ProductId::new(4));
        assert_eq!(item.price.display(), "9,50");
    }

    #[test]
    fn test_price_range_label() {
        let label = price_range_label(Price::ZERO, Price::from_cents(100_00));
        assert_eq!(label, "R$ 0 - R$ 100");
    }
}
