//! Filter spec for row operations.
//!
//! [`Query`] renders to PostgREST query parameters. It covers the handful
//! of operators the shop actually uses (`eq`, `in`, `gte`, `lte`, column
//! selection, ordering, limit) rather than the whole PostgREST grammar.

use std::fmt::Display;

/// Sort direction for [`Query::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A filter spec: which columns to return, which rows to match, and in
/// what order.
///
/// ```rust
/// use confeito_supabase::{Direction, Query};
///
/// let query = Query::new()
///     .select("title, order_count")
///     .order("order_count", Direction::Desc)
///     .limit(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
}

impl Query {
    /// A query matching all rows, returning all columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned columns (PostgREST `select=` projection).
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.replace(' ', ""));
        self
    }

    /// Match rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Match rows where `column` is one of `values`.
    #[must_use]
    pub fn r#in<T: Display>(mut self, column: &str, values: &[T]) -> Self {
        let list = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.filters
            .push((column.to_owned(), format!("in.({list})")));
        self
    }

    /// Match rows where `column` is greater than or equal to `value`.
    #[must_use]
    pub fn gte(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_owned(), format!("gte.{value}")));
        self
    }

    /// Match rows where `column` is less than or equal to `value`.
    #[must_use]
    pub fn lte(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_owned(), format!("lte.{value}")));
        self
    }

    /// Order the result by `column`.
    #[must_use]
    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(format!("{column}.{}", direction.as_str()));
        self
    }

    /// Return at most `n` rows.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Render to query parameters for the request URL.
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);

        if let Some(select) = &self.select {
            params.push(("select".to_owned(), select.clone()));
        }

        params.extend(self.filters.iter().cloned());

        if let Some(order) = &self.order {
            params.push(("order".to_owned(), order.clone()));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_owned(), limit.to_string()));
        }

        params
    }
}
