use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TICKER_LEN: usize = 15;

/// A normalized (trimmed, uppercase) ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(CoreError::invalid_input("ticker", "ticker must not be empty"));
        }

        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(CoreError::invalid_input(
                "ticker",
                format!("'{normalized}' is {len} characters, the maximum is {MAX_TICKER_LEN}"),
            ));
        }

        if !normalized.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(CoreError::invalid_input(
                "ticker",
                format!("'{normalized}' must start with a letter"),
            ));
        }

        if let Some(ch) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return Err(CoreError::invalid_input(
                "ticker",
                format!("'{normalized}' contains invalid character '{ch}'"),
            ));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}
