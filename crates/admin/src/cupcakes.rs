//! Product management: list, create, delete and batch promotion edits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use confeito_core::ProductId;
use confeito_supabase::{CupcakePatch, CupcakeRow, Direction, NewCupcake, Query, tables};

use crate::activity;
use crate::auth::require_admin;
use crate::error::{AdminError, Result};
use crate::state::AdminState;

/// The admin create-cupcake form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCupcakeForm {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub price: Decimal,
    pub image: String,
    pub promotion: Option<PromotionInput>,
}

/// Promotion kind selector on the admin forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionKind {
    Discount,
    BlackFriday,
    Christmas,
}

impl PromotionKind {
    /// The string the backend stores in `promotion_type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::BlackFriday => "blackfriday",
            Self::Christmas => "christmas",
        }
    }
}

/// Promotion fields, which travel together: choosing a promotion type
/// carries its value and date range into the same update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionInput {
    pub kind: PromotionKind,
    pub value: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// The batch edit form: every field optional, only present (non-empty)
/// fields become part of the update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchEditInput {
    pub price: Option<Decimal>,
    pub discount: Option<i32>,
    pub promotion: Option<PromotionInput>,
}

impl BatchEditInput {
    /// Build the sparse patch sent to the backend.
    #[must_use]
    pub fn to_patch(&self) -> CupcakePatch {
        let mut patch = CupcakePatch {
            price: self.price,
            discount: self.discount,
            ..CupcakePatch::default()
        };

        if let Some(promotion) = &self.promotion {
            patch.promotion_type = Some(promotion.kind.as_str().to_owned());
            patch.promotion_value = promotion.value;
            patch.promotion_start_date = promotion.start_date.clone();
            patch.promotion_end_date = promotion.end_date.clone();
        }

        patch
    }
}

/// Render the audited entity id for a batch: the selected ids joined
/// with commas.
fn batch_entity_id(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Product management service.
pub struct CupcakeAdmin {
    state: AdminState,
}

impl CupcakeAdmin {
    /// Create a new product management service.
    #[must_use]
    pub const fn new(state: AdminState) -> Self {
        Self { state }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Admin-gated; backend failures propagate as
    /// [`AdminError::Backend`].
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CupcakeRow>> {
        require_admin(&self.state).await?;

        let rows = self
            .state
            .supabase()
            .select(
                tables::CUPCAKES,
                Query::new().order("created_at", Direction::Desc),
                None,
            )
            .await?;
        Ok(rows)
    }

    /// Create a product. New products are always flagged as novelties.
    ///
    /// Appends one `create` audit row with the inserted fields.
    ///
    /// # Errors
    ///
    /// Admin-gated; backend failures propagate as
    /// [`AdminError::Backend`].
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create(&self, form: &NewCupcakeForm) -> Result<()> {
        let admin_id = require_admin(&self.state).await?;

        let row = NewCupcake {
            title: form.title.clone(),
            description: form.description.clone(),
            ingredients: form.ingredients.clone(),
            price: form.price,
            image: form.image.clone(),
            is_new: true,
            promotion_type: form
                .promotion
                .as_ref()
                .map(|p| p.kind.as_str().to_owned()),
            promotion_value: form.promotion.as_ref().and_then(|p| p.value),
            promotion_start_date: form.promotion.as_ref().and_then(|p| p.start_date.clone()),
            promotion_end_date: form.promotion.as_ref().and_then(|p| p.end_date.clone()),
        };

        self.state
            .supabase()
            .insert(tables::CUPCAKES, &row, None)
            .await?;

        activity::append(
            &self.state,
            admin_id,
            "create",
            "cupcakes",
            form.title.clone(),
            serde_json::to_value(&row).ok(),
        )
        .await?;

        Ok(())
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Admin-gated; backend failures propagate as
    /// [`AdminError::Backend`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        require_admin(&self.state).await?;

        self.state
            .supabase()
            .delete(tables::CUPCAKES, Query::new().eq("id", id), None)
            .await?;
        Ok(())
    }

    /// Apply a sparse update to every selected product in one backend
    /// call, then append one `batch_update` audit row summarizing it.
    ///
    /// No retry and no partial-failure accounting: if the backend call
    /// fails the whole batch failed.
    ///
    /// # Errors
    ///
    /// - [`AdminError::NoSelection`] when `ids` is empty
    /// - Admin-gated; backend failures propagate as
    ///   [`AdminError::Backend`]
    #[instrument(skip(self, input), fields(selected = ids.len()))]
    pub async fn batch_update(&self, ids: &[ProductId], input: &BatchEditInput) -> Result<()> {
        if ids.is_empty() {
            return Err(AdminError::NoSelection);
        }

        let admin_id = require_admin(&self.state).await?;

        let patch = input.to_patch();
        let id_values: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

        self.state
            .supabase()
            .update(
                tables::CUPCAKES,
                Query::new().r#in("id", &id_values),
                &patch,
                None,
            )
            .await?;

        activity::append(
            &self.state,
            admin_id,
            "batch_update",
            "cupcakes",
            batch_entity_id(ids),
            serde_json::to_value(&patch).ok(),
        )
        .await?;

        Ok(())
    }
}
