//! # CEP (Brazilian postal code)
//!
//! Newtype for a normalized 8-digit CEP. Parsing strips punctuation
//! ("01310-100" and "01310100" are the same code) and rejects anything
//! that is not exactly 8 digits. Validation happens at the edge, before
//! lookups or shipping estimation ever see the code.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// A normalized 8-digit Brazilian postal code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Parse a CEP from user input, stripping non-digit characters.
    ///
    /// # Errors
    /// `StoreError::InvalidCep` if the result is not exactly 8 digits.
    pub fn parse(input: &str) -> Result<Self, StoreError> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 8 {
            return Err(StoreError::InvalidCep {
                cep: input.to_string(),
            });
        }
        Ok(Self(digits))
    }

    /// The normalized 8-digit form, no separator
    pub fn as_digits(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cep {
    /// Conventional display form, "01310-100"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl std::str::FromStr for Cep {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cep {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.0
    }
}
