//! In-memory stand-ins for the engine's backends.
use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use ksg_common::SteamId;

use crate::{
    db_types::{Order, OrderStatus, Settlement},
    traits::{OrderStore, SourceError, StatusSources, StoreError},
};

//--------------------------------------  FakeStatusSources   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default)]
struct FakeValues {
    price: Option<i64>,
    stock: Option<i64>,
    order_count: Option<i64>,
    market_price: Option<i64>,
    transaction_total: Option<i64>,
}

/// Status sources with settable values. A `None` value makes that fetch fail. Every fetch sleeps for the configured
/// delay first, and each fan-out is counted (via the price fetch).
#[derive(Debug, Default)]
pub struct FakeStatusSources {
    values: Mutex<FakeValues>,
    delay: Mutex<Duration>,
    fan_outs: AtomicUsize,
}

impl FakeStatusSources {
    pub fn new(price: i64, stock: i64, order_count: i64, market_price: i64, transaction_total: i64) -> Self {
        let values = FakeValues {
            price: Some(price),
            stock: Some(stock),
            order_count: Some(order_count),
            market_price: Some(market_price),
            transaction_total: Some(transaction_total),
        };
        Self { values: Mutex::new(values), ..Default::default() }
    }

    pub fn fan_outs(&self) -> usize {
        self.fan_outs.load(Ordering::SeqCst)
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn set_price(&self, value: Option<i64>) {
        self.values.lock().unwrap().price = value;
    }

    pub fn set_stock(&self, value: Option<i64>) {
        self.values.lock().unwrap().stock = value;
    }

    pub fn set_order_count(&self, value: Option<i64>) {
        self.values.lock().unwrap().order_count = value;
    }

    pub fn set_market_price(&self, value: Option<i64>) {
        self.values.lock().unwrap().market_price = value;
    }

    pub fn set_transaction_total(&self, value: Option<i64>) {
        self.values.lock().unwrap().transaction_total = value;
    }

    async fn fetch(&self, name: &str, select: impl Fn(&FakeValues) -> Option<i64>) -> Result<i64, SourceError> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let value = select(&self.values.lock().unwrap());
        value.ok_or_else(|| SourceError::Unavailable(format!("{name} is switched off")))
    }
}

impl StatusSources for FakeStatusSources {
    async fn fetch_price(&self) -> Result<i64, SourceError> {
        self.fan_outs.fetch_add(1, Ordering::SeqCst);
        self.fetch("price", |v| v.price).await
    }

    async fn fetch_stock(&self) -> Result<i64, SourceError> {
        self.fetch("stock", |v| v.stock).await
    }

    async fn fetch_order_count(&self) -> Result<i64, SourceError> {
        self.fetch("order count", |v| v.order_count).await
    }

    async fn fetch_market_price(&self) -> Result<i64, SourceError> {
        self.fetch("market price", |v| v.market_price).await
    }

    async fn fetch_transaction_total(&self) -> Result<i64, SourceError> {
        self.fetch("transaction total", |v| v.transaction_total).await
    }
}

//--------------------------------------   MemoryOrderStore    --------------------------------------------------------
/// An order store backed by a vector. Counts successful writes, and can be told to fail them.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryOrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders: Mutex::new(orders), ..Default::default() }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

impl OrderStore for MemoryOrderStore {
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.snapshot();
        orders.sort_by(|a, b| b.order_status.data_id.cmp(&a.order_status.data_id));
        Ok(orders)
    }

    async fn fetch_order_by_data_id(&self, data_id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.snapshot().into_iter().find(|o| o.order_status.data_id == data_id))
    }

    async fn apply_settlement(&self, settlement: &Settlement) -> Result<u64, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::DatabaseError("writes are switched off".into()));
        }
        let mut orders = self.orders.lock().unwrap();
        let matched = orders.iter_mut().find(|o| o.order_status.data_id == settlement.data_id);
        let count = match matched {
            Some(order) => {
                order.order_status.settled_amount = settlement.amount;
                order.order_status.process_date = settlement.process_date.clone();
                order.order_status.process_time = settlement.process_time.clone();
                1
            },
            None => 0,
        };
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(count)
    }
}

/// An unsettled order with the given id, declared amount and payment deadline.
pub fn sample_order(data_id: &str, steam_id: &str, declared_amount: i64, pay_end_date: &str) -> Order {
    Order {
        steam_id: steam_id.parse::<SteamId>().unwrap_or_default(),
        price: declared_amount,
        count: 1,
        order_status: OrderStatus {
            smilepay_no: format!("SP{data_id}"),
            data_id: data_id.to_string(),
            declared_amount,
            pay_end_date: pay_end_date.to_string(),
            pay_method: "ATM".to_string(),
            ..Default::default()
        },
    }
}
