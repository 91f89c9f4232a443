//! Concrete backends for the engine's traits.
//!
//! * [`MongoDatabase`] is the document store holding orders, users and trade history. It implements
//!   [`crate::traits::OrderStore`] and [`crate::traits::StatusCounters`].
//! * [`RedisStore`] is the key-value store the trading bot publishes its price and stock to. It implements
//!   [`crate::traits::KeyValueStore`].
pub mod mongo;
mod redis_store;

pub use mongo::{CollectionNames, MongoDatabase};
pub use redis_store::RedisStore;
