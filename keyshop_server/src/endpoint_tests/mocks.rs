use keyshop_engine::{
    db_types::{Order, Settlement},
    traits::{OrderStore, SourceError, StatusSources, StoreError},
};
use mockall::mock;

mock! {
    pub Store {}
    impl OrderStore for Store {
        async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;
        async fn fetch_order_by_data_id(&self, data_id: &str) -> Result<Option<Order>, StoreError>;
        async fn apply_settlement(&self, settlement: &Settlement) -> Result<u64, StoreError>;
    }
}

mock! {
    pub Sources {}
    impl StatusSources for Sources {
        async fn fetch_price(&self) -> Result<i64, SourceError>;
        async fn fetch_stock(&self) -> Result<i64, SourceError>;
        async fn fetch_order_count(&self) -> Result<i64, SourceError>;
        async fn fetch_market_price(&self) -> Result<i64, SourceError>;
        async fn fetch_transaction_total(&self) -> Result<i64, SourceError>;
    }
}
