use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    #[error("Series is not strictly ascending: {0} follows {1}")]
    UnorderedSeries(NaiveDate, NaiveDate),
}
