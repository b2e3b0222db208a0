//! Unified storefront error type.
//!
//! Every service call resolves to `Result<T, AppError>`. Errors are never
//! fatal: the embedding UI shows [`AppError::user_message`] as a transient
//! notification, resets its loading flag and lets the user retry. Nothing
//! is retried automatically.

use thiserror::Error;

use confeito_supabase::SupabaseError;

use crate::services::register::ValidationError;

/// Application-level error taxonomy for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The action requires a signed-in user and there is none.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A form failed validation before any backend call was made.
    #[error("validation failed: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    /// A backend call failed (network, constraint violation, decode).
    #[error("backend call failed: {0}")]
    Backend(SupabaseError),

    /// The backend refused a cart insert for lack of stock.
    #[error("not enough stock")]
    StockShortage,
}

impl From<SupabaseError> for AppError {
    /// The stock-shortage constraint is the one backend failure with its
    /// own user-facing treatment; everything else is a generic backend
    /// failure.
    fn from(err: SupabaseError) -> Self {
        if err.is_stock_shortage() {
            Self::StockShortage
        } else {
            Self::Backend(err)
        }
    }
}

impl AppError {
    /// The transient notification text for this error, in the shop's
    /// language.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => {
                "Por favor, faça login para adicionar itens ao carrinho.".to_owned()
            }
            Self::Validation(errors) => errors
                .first()
                .map_or_else(|| "Dados inválidos.".to_owned(), |e| e.message.clone()),
            Self::Backend(_) => "Erro ao comunicar com o servidor. Tente novamente.".to_owned(),
            Self::StockShortage => {
                "Desculpe, não há estoque suficiente para este item.".to_owned()
            }
        }
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_shortage_is_split_out_of_backend_errors() {
        let shortage = SupabaseError::Api {
            status: 400,
            message: "Not enough stock for cupcake 3".to_owned(),
        };
        assert!(matches!(AppError::from(shortage), AppError::StockShortage));

        let other = SupabaseError::Api {
            status: 500,
            message: "internal".to_owned(),
        };
        assert!(matches!(AppError::from(other), AppError::Backend(_)));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::StockShortage.user_message(),
            "Desculpe, não há estoque suficiente para este item."
        );
        assert_eq!(
            AppError::NotAuthenticated.user_message(),
            "Por favor, faça login para adicionar itens ao carrinho."
        );
    }

    #[test]
    fn test_validation_message_uses_first_field_error() {
        let err = AppError::Validation(vec![
            ValidationError {
                field: "password",
                message: "A senha deve ter pelo menos 8 caracteres".to_owned(),
            },
            ValidationError {
                field: "cpf",
                message: "CPF inválido".to_owned(),
            },
        ]);
        assert_eq!(
            err.user_message(),
            "A senha deve ter pelo menos 8 caracteres"
        );
    }
}
