use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid bar on {0}: {1}")]
    InvalidBar(NaiveDate, String),
}

impl CoreError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput(field.to_string(), message.into())
    }
}
