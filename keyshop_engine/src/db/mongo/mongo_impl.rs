//! `MongoDatabase` is the production implementation of the engine's document-store traits.
use std::{fmt::Debug, time::Duration};

use log::*;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
    Database,
};

use super::{counters, orders};
use crate::{
    db_types::{Order, Settlement},
    traits::{OrderStore, SourceError, StatusCounters, StoreError},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Names of the collections the engine reads. The defaults match the collections the bot writes to.
#[derive(Clone, Debug)]
pub struct CollectionNames {
    /// Legacy orders, counted when their trade has completed.
    pub orders: String,
    /// Orders paid through the payment gateway.
    pub orders_v2: String,
    pub users: String,
    pub transactions: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            orders: "orders".to_string(),
            orders_v2: "orderv2".to_string(),
            users: "users".to_string(),
            // sic: this is the name the bot uses
            transactions: "transcations".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct MongoDatabase {
    db: Database,
    collections: CollectionNames,
}

impl Debug for MongoDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MongoDatabase ({})", self.db.name())
    }
}

impl MongoDatabase {
    /// Connects to the database named in the connection string and pings it.
    pub async fn new_with_url(url: &str, collections: CollectionNames) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);
        let client = Client::with_options(options)?;
        let db = client.default_database().ok_or_else(|| {
            StoreError::Configuration("The MongoDB connection string does not name a database".to_string())
        })?;
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("🗃️ Connected to MongoDB database {}", db.name());
        Ok(Self { db, collections })
    }
}

impl OrderStore for MongoDatabase {
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        orders::fetch_orders(&self.db, &self.collections.orders_v2).await
    }

    async fn fetch_order_by_data_id(&self, data_id: &str) -> Result<Option<Order>, StoreError> {
        orders::fetch_order_by_data_id(data_id, &self.db, &self.collections.orders_v2).await
    }

    async fn apply_settlement(&self, settlement: &Settlement) -> Result<u64, StoreError> {
        orders::apply_settlement(settlement, &self.db, &self.collections.orders_v2).await
    }
}

impl StatusCounters for MongoDatabase {
    async fn count_traded_orders(&self) -> Result<i64, SourceError> {
        counters::count_traded_orders(&self.db, &self.collections.orders).await
    }

    async fn count_settled_orders(&self) -> Result<i64, SourceError> {
        counters::count_settled_orders(&self.db, &self.collections.orders_v2).await
    }

    async fn sum_user_traded_counts(&self) -> Result<i64, SourceError> {
        counters::sum_user_traded_counts(&self.db, &self.collections.users).await
    }

    async fn sum_traded_transactions(&self) -> Result<i64, SourceError> {
        counters::sum_traded_transactions(&self.db, &self.collections.transactions).await
    }
}
