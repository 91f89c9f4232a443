use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;

use super::{errors::OrdersApiError, order_objects::OrderView};
use crate::traits::OrderStore;

/// Read-only views of the payment gateway orders for administrators.
pub struct OrdersApi<B> {
    db: B,
}

impl<B> Debug for OrdersApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrdersApi")
    }
}

impl<B> OrdersApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> OrdersApi<B>
where B: OrderStore
{
    /// All orders, most recent `Data_id` first, with their status as of `now`.
    pub async fn orders(&self, now: DateTime<Utc>) -> Result<Vec<OrderView>, OrdersApiError> {
        let orders = self.db.fetch_orders().await?;
        trace!("📦️ Building views for {} orders", orders.len());
        Ok(orders.into_iter().map(|o| OrderView::from_order(o, now)).collect())
    }

    pub async fn order_by_id(&self, data_id: &str, now: DateTime<Utc>) -> Result<Option<OrderView>, OrdersApiError> {
        let order = self.db.fetch_order_by_data_id(data_id).await?;
        Ok(order.map(|o| OrderView::from_order(o, now)))
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        kse_api::order_objects::OrderLifecycle,
        test_utils::fakes::{sample_order, MemoryOrderStore},
    };

    fn api() -> OrdersApi<MemoryOrderStore> {
        let mut paid = sample_order("20240302090000", "76561198000000002", 250, "2024/03/03 23:59:59");
        paid.order_status.settled_amount = 250;
        let store = MemoryOrderStore::new(vec![
            sample_order("20240301123000", "76561198000000001", 104, "2024/03/04 23:59:59"),
            paid,
            sample_order("20240305080000", "76561198000000003", 52, "2024/03/08 23:59:59"),
        ]);
        OrdersApi::new(store)
    }

    #[tokio::test]
    async fn orders_are_newest_first_with_derived_status() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let views = api().orders(now).await.unwrap();
        let ids = views.iter().map(|v| v.order_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["20240305080000", "20240302090000", "20240301123000"]);
        let statuses = views.iter().map(|v| v.status).collect::<Vec<_>>();
        assert_eq!(statuses, vec![OrderLifecycle::Unpaid, OrderLifecycle::Paid, OrderLifecycle::Expired]);
    }

    #[tokio::test]
    async fn single_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let api = api();
        let view = api.order_by_id("20240302090000", now).await.unwrap().unwrap();
        assert_eq!(view.status, OrderLifecycle::Paid);
        assert_eq!(view.steam_id.as_str(), "76561198000000002");
        assert!(api.order_by_id("nope", now).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_store() {
        let api = OrdersApi::new(MemoryOrderStore::default());
        assert!(api.orders(Utc::now()).await.unwrap().is_empty());
    }
}
