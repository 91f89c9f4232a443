//! # Key shop engine public API
//!
//! * [`settlement_api`] authenticates payment gateway callbacks and writes the settlement onto the matching order.
//! * [`orders_api`] serves the admin order views, with the lifecycle status derived at read time.
//!
//! As with the backends, each API is created by handing it something that implements the relevant backend trait:
//!
//! ```rust,ignore
//! use keyshop_engine::{MongoDatabase, OrdersApi};
//! let db = MongoDatabase::new_with_url(url, CollectionNames::default()).await?;
//! let api = OrdersApi::new(db);
//! let orders = api.orders(Utc::now()).await?;
//! ```
pub mod errors;
pub mod order_objects;
pub mod orders_api;
pub mod settlement_api;
