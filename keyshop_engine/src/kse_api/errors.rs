use thiserror::Error;

use crate::traits::StoreError;

#[derive(Debug, Clone, Error)]
pub enum SettlementError {
    #[error("The callback verification code is invalid")]
    InvalidChecksum,
    #[error("Invalid purchase amount: {0}")]
    InvalidPurchaseAmount(String),
    #[error("Invalid settlement amount: {0}")]
    InvalidSettlementAmount(String),
    #[error("Settled amount {settled} does not match the declared amount {declared}")]
    AmountMismatch { declared: i64, settled: i64 },
    #[error("Could not persist the settlement. {0}")]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Clone, Error)]
pub enum OrdersApiError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] StoreError),
}
