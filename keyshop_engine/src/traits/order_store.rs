use thiserror::Error;

use crate::db_types::{Order, Settlement};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid database configuration: {0}")]
    Configuration(String),
}

/// Read and settle orders in the document store.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Fetches every order, most recent `Data_id` first.
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn fetch_order_by_data_id(&self, data_id: &str) -> Result<Option<Order>, StoreError>;

    /// Writes the settled amount and processing timestamps onto the order whose `Data_id` matches.
    ///
    /// This is a single-document write. It is not guarded against concurrent duplicate callbacks.
    /// Returns the number of orders that matched, which is zero if the `Data_id` is unknown.
    async fn apply_settlement(&self, settlement: &Settlement) -> Result<u64, StoreError>;
}
