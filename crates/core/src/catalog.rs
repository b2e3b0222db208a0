//! The catalog view pipeline.
//!
//! A pure, deterministic derivation from (raw product list, filter state)
//! to the ordered page the storefront renders. Safe to re-run on every
//! keystroke; no caching, no mutation of the input.
//!
//! The steps run in a fixed order: free-text search, category flag,
//! price range, stable sort, pagination.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Number of products shown per catalog page.
pub const PAGE_SIZE: usize = 6;

/// A product as the storefront sees it.
///
/// Owned and mutated by the backend; the client treats it as read-only
/// outside the admin flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend row id.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long description shown on the card.
    pub description: String,
    /// Ingredient list text.
    pub ingredients: String,
    /// Current list price.
    pub price: Price,
    /// Image reference (URL or asset path).
    pub image: String,
    /// Featured as a novelty.
    pub is_new: bool,
    /// Part of the Black Friday promotion.
    pub is_black_friday: bool,
    /// Part of the Christmas promotion.
    pub is_christmas: bool,
    /// Discount percentage, 0-100. 0 means no discount.
    pub discount: u8,
    /// Popularity counter maintained by the backend.
    pub order_count: u64,
}

impl Product {
    /// List price with the product's own discount applied.
    #[must_use]
    pub fn discounted_price(&self) -> Price {
        self.price.with_discount(self.discount)
    }
}

/// Category selector for the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// No category filtering.
    #[default]
    All,
    /// Only products flagged `is_new`.
    New,
    /// Only products flagged `is_black_friday`.
    BlackFriday,
    /// Only products flagged `is_christmas`.
    Christmas,
}

/// Sort key for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Descending by popularity counter.
    #[default]
    MostOrdered,
    /// Novelties first. This is a partition on the `is_new` flag, not a
    /// creation-time ordering; within each half the incoming order is
    /// kept.
    Newest,
    /// Ascending by list price.
    LowestPrice,
    /// Descending by discount percentage.
    HighestDiscount,
}

/// The view-owned filter state driving the pipeline.
///
/// Recomputed derivation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search term; empty means no search filtering.
    pub search: String,
    /// Category selector.
    pub category: Category,
    /// Sort key.
    pub sort: SortKey,
    /// Inclusive lower price bound.
    pub min_price: Price,
    /// Inclusive upper price bound.
    pub max_price: Price,
    /// Current page, 1-based.
    pub page: u32,
}

impl Default for FilterState {
    /// The storefront's initial state: everything visible, most-ordered
    /// first, price slider at 0-100, page 1.
    fn default() -> Self {
        Self {
            search: String::new(),
            category: Category::All,
            sort: SortKey::MostOrdered,
            min_price: Price::ZERO,
            max_price: Price::from_cents(100_00),
            page: 1,
        }
    }
}

/// One derived catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Products on the requested page, in display order.
    pub items: Vec<Product>,
    /// Requested page, 1-based.
    pub page: u32,
    /// Number of pages in the filtered result.
    pub total_pages: u32,
    /// Number of products in the filtered result, across all pages.
    pub total_items: usize,
}

/// Run the pipeline: search → category → price range → sort → paginate.
///
/// Pure and idempotent; the same inputs always produce the same page.
#[must_use]
pub fn browse(products: &[Product], filters: &FilterState) -> CatalogPage {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| matches_search(product, &filters.search))
        .filter(|product| matches_category(product, filters.category))
        .filter(|product| {
            product.price >= filters.min_price && product.price <= filters.max_price
        })
        .cloned()
        .collect();

    sort(&mut filtered, filters.sort);

    let total_items = filtered.len();
    let total_pages = u32::try_from(total_items.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX);

    let start = filters.page.saturating_sub(1) as usize * PAGE_SIZE;
    let items = if start >= filtered.len() {
        Vec::new()
    } else {
        let end = usize::min(start + PAGE_SIZE, filtered.len());
        filtered[start..end].to_vec()
    };

    CatalogPage {
        items,
        page: filters.page,
        total_pages,
        total_items,
    }
}

/// Case-insensitive substring match against title or description.
fn matches_search(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    product.title.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term)
}

fn matches_category(product: &Product, category: Category) -> bool {
    match category {
        Category::All => true,
        Category::New => product.is_new,
        Category::BlackFriday => product.is_black_friday,
        Category::Christmas => product.is_christmas,
    }
}

/// Stable sort by the selected key.
fn sort(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::MostOrdered => {
            products.sort_by(|a, b| b.order_count.cmp(&a.order_count));
        }
        SortKey::Newest => {
            // false sorts before true, so negate: is_new first.
            products.sort_by_key(|product| !product.is_new);
        }
        SortKey::LowestPrice => {
            products.sort_by_key(|product| product.price);
        }
        SortKey::HighestDiscount => {
            products.sort_by(|a, b| b.discount.cmp(&a.discount));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, title: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            description: String::new(),
            ingredients: String::new(),
            price: Price::from_cents(price_cents),
            image: String::new(),
            is_new: false,
            is_black_friday: false,
            is_christmas: false,
            discount: 0,
            order_count: 0,
        }
    }

    #[test]
    fn test_empty_search_passes_all() {
        let products = vec![product(1, "Chocolate", 500), product(2, "Baunilha", 300)];
        let page = browse(&products, &FilterState::default());
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let morango = product(1, "Morango Especial", 450);
        let mut chocolate = product(2, "Chocolate", 500);
        chocolate.description = "Cobertura de morango".to_owned();
        let pistache = product(3, "Pistache", 600);

        let filters = FilterState {
            search: "MORANGO".to_owned(),
            ..FilterState::default()
        };
        let page = browse(&[morango, chocolate, pistache], &filters);

        let ids: Vec<i64> = page.items.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_category_filters_on_flags() {
        let mut novelty = product(1, "Novidade", 400);
        novelty.is_new = true;
        let mut seasonal = product(2, "Natalino", 550);
        seasonal.is_christmas = true;
        let plain = product(3, "Clássico", 350);

        let new_only = browse(
            &[novelty.clone(), seasonal.clone(), plain.clone()],
            &FilterState {
                category: Category::New,
                ..FilterState::default()
            },
        );
        assert_eq!(new_only.total_items, 1);
        assert_eq!(new_only.items[0].id.as_i64(), 1);

        let christmas_only = browse(
            &[novelty, seasonal, plain],
            &FilterState {
                category: Category::Christmas,
                ..FilterState::default()
            },
        );
        assert_eq!(christmas_only.total_items, 1);
        assert_eq!(christmas_only.items[0].id.as_i64(), 2);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let products = vec![
            product(1, "Barato", 200),
            product(2, "Meio", 500),
            product(3, "Caro", 900),
        ];
        let filters = FilterState {
            min_price: Price::from_cents(200),
            max_price: Price::from_cents(500),
            ..FilterState::default()
        };
        let page = browse(&products, &filters);

        let ids: Vec<i64> = page.items.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_sort_most_ordered_descending() {
        let mut a = product(1, "A", 100);
        a.order_count = 5;
        let mut b = product(2, "B", 100);
        b.order_count = 20;
        let mut c = product(3, "C", 100);
        c.order_count = 10;

        let page = browse(&[a, b, c], &FilterState::default());
        let ids: Vec<i64> = page.items.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_newest_is_a_stable_partition() {
        let mut a = product(1, "A", 100);
        a.is_new = false;
        let mut b = product(2, "B", 100);
        b.is_new = true;
        let mut c = product(3, "C", 100);
        c.is_new = false;
        let mut d = product(4, "D", 100);
        d.is_new = true;

        let filters = FilterState {
            sort: SortKey::Newest,
            ..FilterState::default()
        };
        let page = browse(&[a, b, c, d], &filters);
        let ids: Vec<i64> = page.items.iter().map(|p| p.id.as_i64()).collect();
        // New items first, incoming order preserved within each half.
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_lowest_price_nondecreasing_across_full_result() {
        let products: Vec<Product> = (0..14)
            .map(|i| product(i, "P", ((i * 7) % 13 + 1) * 100))
            .collect();
        let filters = FilterState {
            sort: SortKey::LowestPrice,
            ..FilterState::default()
        };

        // Check across all pages, not just within one.
        let mut seen = Vec::new();
        for page_number in 1..=3 {
            let page = browse(
                &products,
                &FilterState {
                    page: page_number,
                    ..filters.clone()
                },
            );
            seen.extend(page.items.iter().map(|p| p.price));
        }

        assert_eq!(seen.len(), 14);
        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_sort_example_scenario() {
        let mut choc = product(1, "Choc", 500);
        choc.order_count = 10;
        choc.discount = 0;
        let mut van = product(2, "Van", 300);
        van.order_count = 20;
        van.discount = 50;
        let products = vec![choc, van];

        let by_discount = browse(
            &products,
            &FilterState {
                sort: SortKey::HighestDiscount,
                ..FilterState::default()
            },
        );
        let ids: Vec<i64> = by_discount.items.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);

        let by_price = browse(
            &products,
            &FilterState {
                sort: SortKey::LowestPrice,
                ..FilterState::default()
            },
        );
        let ids: Vec<i64> = by_price.items.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_pagination_fourteen_items() {
        let products: Vec<Product> = (1..=14).map(|i| product(i, "P", 100)).collect();

        let page = |n: u32| {
            browse(
                &products,
                &FilterState {
                    page: n,
                    ..FilterState::default()
                },
            )
        };

        assert_eq!(page(1).items.len(), 6);
        assert_eq!(page(2).items.len(), 6);
        assert_eq!(page(3).items.len(), 2);
        assert!(page(4).items.is_empty());

        assert_eq!(page(1).total_pages, 3);
        assert_eq!(page(1).total_items, 14);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let mut a = product(1, "Morango", 450);
        a.order_count = 3;
        let mut b = product(2, "Chocolate", 500);
        b.order_count = 9;
        let products = vec![a, b];
        let filters = FilterState {
            search: "o".to_owned(),
            ..FilterState::default()
        };

        let first = browse(&products, &filters);
        let second = browse(&products, &filters);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filters_do_not_mutate_input() {
        let products = vec![product(2, "B", 900), product(1, "A", 100)];
        let original = products.clone();
        let _ = browse(
            &products,
            &FilterState {
                sort: SortKey::LowestPrice,
                ..FilterState::default()
            },
        );
        assert_eq!(products, original);
    }

    #[test]
    fn test_discounted_price() {
        let mut p = product(1, "Promo", 1000);
        p.discount = 25;
        assert_eq!(p.discounted_price(), Price::from_cents(750));
    }
}
