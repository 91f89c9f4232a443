use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("The market has no sell orders listed")]
    NoSellOrders,
    #[error("Invalid price value: {0}")]
    InvalidPrice(String),
}
