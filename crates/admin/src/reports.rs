//! Sales reports and dashboard stats.
//!
//! The backend hands over plain order rows; all aggregation happens here,
//! in pure functions over the decoded records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use confeito_supabase::{Direction, OrderTotalRow, Query, SalesRow, TopProductRow, tables};

use crate::auth::require_admin;
use crate::error::Result;
use crate::state::AdminState;

/// One point of the sales-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    /// Calendar date (UTC) the orders fell on.
    pub date: NaiveDate,
    /// Sum of order totals that day.
    pub total: Decimal,
    /// Number of orders that day.
    pub count: u64,
}

/// The dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Sum of completed order totals.
    pub total_sales: Decimal,
    /// Number of products in the catalog.
    pub product_count: u64,
    /// Number of orders still pending.
    pub pending_orders: u64,
}

/// Group order rows into one point per calendar date, ascending.
#[must_use]
pub fn group_daily_sales(rows: &[SalesRow]) -> Vec<DailySales> {
    use std::collections::BTreeMap;

    let mut grouped: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();
    for row in rows {
        let entry = grouped
            .entry(row.created_at.date_naive())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += row.total_amount;
        entry.1 += 1;
    }

    grouped
        .into_iter()
        .map(|(date, (total, count))| DailySales { date, total, count })
        .collect()
}

/// Sales grouped by day, for the report chart.
///
/// # Errors
///
/// Admin-gated; backend failures propagate as
/// [`crate::AdminError::Backend`].
#[instrument(skip(state))]
pub async fn daily_sales(state: &AdminState) -> Result<Vec<DailySales>> {
    require_admin(state).await?;

    let rows: Vec<SalesRow> = state
        .supabase()
        .select(
            tables::ORDERS,
            Query::new()
                .select("created_at, total_amount")
                .order("created_at", Direction::Asc),
            None,
        )
        .await?;

    Ok(group_daily_sales(&rows))
}

/// The most-ordered products, for the report chart.
///
/// # Errors
///
/// Admin-gated; backend failures propagate as
/// [`crate::AdminError::Backend`].
#[instrument(skip(state))]
pub async fn top_products(state: &AdminState, limit: u32) -> Result<Vec<TopProductRow>> {
    require_admin(state).await?;

    let rows = state
        .supabase()
        .select(
            tables::CUPCAKES,
            Query::new()
                .select("title, order_count")
                .order("order_count", Direction::Desc)
                .limit(limit),
            None,
        )
        .await?;
    Ok(rows)
}

/// The dashboard stat cards: completed sales total, product count,
/// pending orders.
///
/// # Errors
///
/// Admin-gated; backend failures propagate as
/// [`crate::AdminError::Backend`].
#[instrument(skip(state))]
pub async fn stats(state: &AdminState) -> Result<DashboardStats> {
    require_admin(state).await?;

    let completed: Vec<OrderTotalRow> = state
        .supabase()
        .select(
            tables::ORDERS,
            Query::new()
                .select("total_amount")
                .eq("status", "completed"),
            None,
        )
        .await?;
    let total_sales = completed.iter().map(|row| row.total_amount).sum();

    let product_count = state
        .supabase()
        .count(tables::CUPCAKES, Query::new(), None)
        .await?;

    let pending_orders = state
        .supabase()
        .count(tables::ORDERS, Query::new().eq("status", "pending"), None)
        .await?;

    Ok(DashboardStats {
        total_sales,
        product_count,
        pending_orders,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn row(timestamp: &str, total: Decimal) -> SalesRow {
        SalesRow {
            created_at: timestamp.parse::<DateTime<Utc>>().unwrap(),
            total_amount: total,
        }
    }

    #[test]
    fn test_group_daily_sales_sums_per_day() {
        let rows = vec![
            row("2024-11-01T09:00:00Z", Decimal::new(3000, 2)),
            row("2024-11-01T17:30:00Z", Decimal::new(1550, 2)),
            row("2024-11-03T12:00:00Z", Decimal::new(500, 2)),
        ];

        let daily = group_daily_sales(&rows);
        assert_eq!(daily.len(), 2);

        assert_eq!(daily[0].date, "2024-11-01".parse().unwrap());
        assert_eq!(daily[0].total, Decimal::new(4550, 2));
        assert_eq!(daily[0].count, 2);

        assert_eq!(daily[1].date, "2024-11-03".parse().unwrap());
        assert_eq!(daily[1].count, 1);
    }

    #[test]
    fn test_group_daily_sales_is_date_ordered() {
        let rows = vec![
            row("2024-11-05T10:00:00Z", Decimal::ONE),
            row("2024-11-01T10:00:00Z", Decimal::ONE),
            row("2024-11-03T10:00:00Z", Decimal::ONE),
        ];

        let dates: Vec<NaiveDate> = group_daily_sales(&rows)
            .into_iter()
            .map(|point| point.date)
            .collect();
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_group_daily_sales_empty() {
        assert!(group_daily_sales(&[]).is_empty());
    }
}
