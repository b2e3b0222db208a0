//! Unified admin error type.

use thiserror::Error;

use confeito_supabase::SupabaseError;

/// Application-level error taxonomy for the back office.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No signed-in user.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The signed-in user is not an administrator.
    #[error("not authorized")]
    NotAuthorized,

    /// A batch operation was submitted with no products selected.
    #[error("no products selected")]
    NoSelection,

    /// A backend call failed.
    #[error("backend call failed: {0}")]
    Backend(#[from] SupabaseError),
}

impl AdminError {
    /// The transient notification text for this error, in the shop's
    /// language.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Não autenticado".to_owned(),
            Self::NotAuthorized => "Acesso não autorizado".to_owned(),
            Self::NoSelection => "Selecione pelo menos um cupcake.".to_owned(),
            Self::Backend(err) => format!("Erro ao comunicar com o servidor: {err}"),
        }
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
