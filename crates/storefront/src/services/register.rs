//! Customer registration.
//!
//! Validates the registration form client-side - the same rules the
//! original sign-up form enforces - and then hands the account creation
//! to the backend, which owns credential storage and the profile-row
//! trigger.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use confeito_core::types::{Cpf, Email};
use confeito_supabase::{AuthUser, SignUpMetadata};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum length for first and last name.
const MIN_NAME_LENGTH: usize = 2;

/// The registration form as the view collects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
}

/// One field-level validation failure, with the message shown under the
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Form field the failure belongs to.
    pub field: &'static str,
    /// User-facing message.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_owned(),
        }
    }
}

/// Registration service.
pub struct RegistrationService {
    state: AppState,
}

impl RegistrationService {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Validate the form and create the account.
    ///
    /// On success the user is *not* signed in; the flow sends them to the
    /// login page, as the shop does.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] with every failing field when the form
    ///   is invalid (no backend call is made)
    /// - [`AppError::Backend`] when the backend refuses the sign-up
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: &RegisterForm) -> Result<AuthUser> {
        let (email, cpf) = validate(form).map_err(AppError::Validation)?;

        let metadata = SignUpMetadata {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: email.as_str().to_owned(),
            cpf: cpf.as_str().to_owned(),
        };

        let user = self
            .state
            .supabase()
            .sign_up(&email, &form.password, &metadata)
            .await?;

        Ok(user)
    }
}

/// Validate every field, collecting all failures rather than stopping at
/// the first, so the form can mark each field at once.
fn validate(form: &RegisterForm) -> std::result::Result<(Email, Cpf), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if form.first_name.chars().count() < MIN_NAME_LENGTH {
        errors.push(ValidationError::new(
            "first_name",
            "Nome deve ter pelo menos 2 caracteres",
        ));
    }

    if form.last_name.chars().count() < MIN_NAME_LENGTH {
        errors.push(ValidationError::new(
            "last_name",
            "Sobrenome deve ter pelo menos 2 caracteres",
        ));
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(ValidationError::new("email", "Email inválido"));
            None
        }
    };

    errors.extend(validate_password(&form.password));

    let cpf = match Cpf::parse(&form.cpf) {
        Ok(cpf) => Some(cpf),
        Err(_) => {
            errors.push(ValidationError::new("cpf", "CPF inválido"));
            None
        }
    };

    match (email, cpf) {
        (Some(email), Some(cpf)) if errors.is_empty() => Ok((email, cpf)),
        _ => Err(errors),
    }
}

/// Password policy: at least 8 characters with a lowercase letter, an
/// uppercase letter, a digit and a special character.
fn validate_password(password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(ValidationError::new(
            "password",
            "A senha deve ter pelo menos 8 caracteres",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(ValidationError::new(
            "password",
            "A senha deve conter pelo menos uma letra minúscula",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(ValidationError::new(
            "password",
            "A senha deve conter pelo menos uma letra maiúscula",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::new(
            "password",
            "A senha deve conter pelo menos um número",
        ));
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        errors.push(ValidationError::new(
            "password",
            "A senha deve conter pelo menos um caractere especial",
        ));
    }

    errors
}
