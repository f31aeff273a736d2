//! ICAO airport identifiers.

use serde::{Deserialize, Serialize};

use crate::error::{ChartsError, ChartsResult};

/// A four-letter ICAO airport code, always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IcaoCode(String);

impl IcaoCode {
    /// Parse and normalize a code. Accepts exactly four ASCII letters in any case.
    pub fn parse(s: &str) -> ChartsResult<Self> {
        let trimmed = s.trim();
        if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ChartsError::invalid(
                "icao_code",
                format!("'{}' is not a four-letter ICAO code", s),
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IcaoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IcaoCode {
    type Err = ChartsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IcaoCode {
    type Error = ChartsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IcaoCode> for String {
    fn from(code: IcaoCode) -> Self {
        code.0
    }
}

impl AsRef<str> for IcaoCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
