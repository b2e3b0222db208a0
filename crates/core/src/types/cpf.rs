//! CPF (Brazilian taxpayer registry) number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cpf`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfError {
    /// The input does not contain exactly 11 digits.
    #[error("CPF must contain exactly 11 digits")]
    WrongLength,
    /// All 11 digits are identical (e.g. "111.111.111-11").
    #[error("CPF cannot consist of a single repeated digit")]
    RepeatedDigits,
    /// A verification digit does not match.
    #[error("CPF verification digits do not match")]
    InvalidCheckDigit,
}

/// A validated CPF, stored as its 11 digits without punctuation.
///
/// Parsing strips formatting characters ("529.982.247-25" and
/// "52998224725" are the same CPF) and verifies both check digits with
/// the standard modulo-11 algorithm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Parse a `Cpf` from a string, ignoring non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not contain exactly 11 digits,
    /// is a single repeated digit, or fails the check-digit verification.
    pub fn parse(s: &str) -> Result<Self, CpfError> {
        let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != 11 {
            return Err(CpfError::WrongLength);
        }

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(CpfError::RepeatedDigits);
        }

        if check_digit(&digits[..9], 10) != digits[9]
            || check_digit(&digits[..10], 11) != digits[10]
        {
            return Err(CpfError::InvalidCheckDigit);
        }

        Ok(Self(digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect()))
    }

    /// Returns the 11 digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Compute a CPF verification digit over `digits` with the given starting
/// weight (10 for the first check digit, 11 for the second).
fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=start_weight).rev())
        .map(|(d, weight)| d * weight)
        .sum();

    let digit = 11 - (sum % 11);
    if digit >= 10 { 0 } else { digit }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Cpf::parse("52998224725").is_ok());
    }

    #[test]
    fn test_parse_strips_formatting() {
        let cpf = Cpf::parse("529.982.247-25").unwrap();
        assert_eq!(cpf.as_str(), "52998224725");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(Cpf::parse("12345").unwrap_err(), CpfError::WrongLength);
        assert_eq!(Cpf::parse("").unwrap_err(), CpfError::WrongLength);
    }

    #[test]
    fn test_parse_repeated_digits() {
        assert_eq!(
            Cpf::parse("111.111.111-11").unwrap_err(),
            CpfError::RepeatedDigits
        );
    }

    #[test]
    fn test_parse_bad_check_digits() {
        // Last digit off by one
        assert_eq!(
            Cpf::parse("52998224726").unwrap_err(),
            CpfError::InvalidCheckDigit
        );
        // First check digit wrong
        assert_eq!(
            Cpf::parse("52998224735").unwrap_err(),
            CpfError::InvalidCheckDigit
        );
    }
}
