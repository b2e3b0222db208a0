//! Postal-code (CEP) lookup.
//!
//! Thin client for the ViaCEP web service, used only to prefill the
//! address form. The service signals an unknown code with a 200 response
//! whose body is `{"erro": true}`, so that sentinel - not the status -
//! decides between found and not found.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

/// Hard per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the postal-code lookup.
#[derive(Debug, Error)]
pub enum CepError {
    /// The code is not exactly 8 digits after stripping punctuation.
    #[error("CEP must have exactly 8 digits")]
    InvalidCode,

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service does not know this code.
    #[error("CEP not found")]
    NotFound,
}

impl CepError {
    /// The transient notification text for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound | Self::InvalidCode => {
                "CEP não encontrado. Verifique o CEP digitado e tente novamente.".to_owned()
            }
            Self::Http(_) | Self::Decode(_) => {
                "Não foi possível buscar o endereço.".to_owned()
            }
        }
    }
}

/// The street/neighborhood/city triple used to prefill address fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CepAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
}

/// Client for the ViaCEP lookup service.
#[derive(Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Create a client against `base_url` (e.g. `https://viacep.com.br`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Look up an 8-digit code. Punctuation in `code` is ignored
    /// ("80010-000" and "80010000" are the same code).
    ///
    /// # Errors
    ///
    /// - [`CepError::InvalidCode`] when the input is not 8 digits
    /// - [`CepError::NotFound`] when the service flags the code unknown
    /// - [`CepError::Http`] / [`CepError::Decode`] on transport or shape
    ///   failures
    #[instrument(skip(self))]
    pub async fn lookup(&self, code: &str) -> Result<CepAddress, CepError> {
        let digits = normalize_code(code).ok_or(CepError::InvalidCode)?;

        let url = format!("{}/ws/{digits}/json/", self.base_url);
        let body = self.http.get(url).send().await?.text().await?;
        let response: ViaCepResponse = serde_json::from_str(&body)?;

        if response.erro {
            return Err(CepError::NotFound);
        }

        Ok(CepAddress {
            street: response.logradouro,
            neighborhood: response.bairro,
            city: response.localidade,
        })
    }
}

/// Strip non-digits and require exactly 8 of them.
fn normalize_code(code: &str) -> Option<String> {
    let digits: String = code.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == 8).then_some(digits)
}
