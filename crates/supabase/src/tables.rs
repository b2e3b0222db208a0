//! Typed records for the shop tables.
//!
//! Every table the client touches has an explicit record with an
//! exhaustive field list, decoded with serde at the response boundary.
//! Writes use dedicated `New*` / `*Patch` records; patches serialize only
//! their present fields so a backend update never clobbers columns the
//! caller did not mention.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use confeito_core::{Price, Product, ProductId};

/// Product catalog.
pub const CUPCAKES: &str = "cupcakes";
/// Per-user persisted cart rows.
pub const CART_ITEMS: &str = "cart_items";
/// Order headers.
pub const ORDERS: &str = "orders";
/// Order line items.
pub const ORDER_ITEMS: &str = "order_items";
/// User profile rows (address, CPF, admin flag).
pub const PROFILES: &str = "profiles";
/// Append-only audit trail.
pub const ACTIVITY_LOGS: &str = "activity_logs";

// =============================================================================
// cupcakes
// =============================================================================

/// A full `cupcakes` row.
#[derive(Debug, Clone, Deserialize)]
pub struct CupcakeRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub is_new: Option<bool>,
    pub is_black_friday: Option<bool>,
    pub is_christmas: Option<bool>,
    pub discount: Option<i32>,
    pub order_count: Option<i64>,
    pub stock: i64,
    pub promotion_type: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub promotion_value: Option<Decimal>,
    pub promotion_start_date: Option<DateTime<Utc>>,
    pub promotion_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CupcakeRow> for Product {
    /// Nullable backend columns collapse to their display defaults:
    /// absent flags are false, absent discount is 0, absent popularity
    /// is 0.
    fn from(row: CupcakeRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            title: row.title,
            description: row.description,
            ingredients: row.ingredients,
            price: Price::new(row.price),
            image: row.image,
            is_new: row.is_new.unwrap_or(false),
            is_black_friday: row.is_black_friday.unwrap_or(false),
            is_christmas: row.is_christmas.unwrap_or(false),
            discount: row
                .discount
                .map_or(0, |discount| discount.clamp(0, 100))
                .try_into()
                .unwrap_or(0),
            order_count: row.order_count.map_or(0, |count| count.max(0)).unsigned_abs(),
        }
    }
}

/// Insert record for a new cupcake (admin create flow).
#[derive(Debug, Clone, Serialize)]
pub struct NewCupcake {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub promotion_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_end_date: Option<String>,
}

/// Sparse update record for the admin edit flows.
///
/// Only present fields are serialized, so an update touches exactly the
/// columns the form filled in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CupcakePatch {
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub promotion_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_end_date: Option<String>,
}

/// Partial row for the menu page (`select=id,title,ingredients,price`).
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemRow {
    pub id: i64,
    pub title: String,
    pub ingredients: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Partial row for the top-products report
/// (`select=title,order_count`).
#[derive(Debug, Clone, Deserialize)]
pub struct TopProductRow {
    pub title: String,
    pub order_count: Option<i64>,
}

// =============================================================================
// cart_items
// =============================================================================

/// A full `cart_items` row.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRow {
    pub id: i64,
    pub user_id: Uuid,
    pub cupcake_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert record mirroring one cart line for a user.
///
/// The backend enforces the stock constraint on this insert; a refusal
/// surfaces as an API error whose message names the shortage.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartItem {
    pub cupcake_id: i64,
    pub quantity: i32,
    pub user_id: Uuid,
}

// =============================================================================
// orders / order_items
// =============================================================================

/// A full `orders` row. The storefront never writes these; the admin
/// reports read them.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: Uuid,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub payment_id: Option<String>,
    pub payment_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial row for the sales report
/// (`select=created_at,total_amount`).
#[derive(Debug, Clone, Deserialize)]
pub struct SalesRow {
    pub created_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// Partial row for the dashboard's sales total
/// (`select=total_amount`).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTotalRow {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// A full `order_items` row.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRow {
    pub id: i64,
    pub order_id: i64,
    pub cupcake_id: i64,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_at_time: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// profiles
// =============================================================================

/// A full `profiles` row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub cep: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub additional_info: Option<String>,
    pub is_admin: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial row for the admin gate (`select=is_admin`).
#[derive(Debug, Clone, Deserialize)]
pub struct AdminFlagRow {
    pub is_admin: Option<bool>,
}

/// Sparse update record for the account page sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

// =============================================================================
// activity_logs
// =============================================================================

/// A full `activity_logs` row.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityLogRow {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub details: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Insert record for one audit entry.
#[derive(Debug, Clone, Serialize)]
pub struct NewActivityLog {
    pub user_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
