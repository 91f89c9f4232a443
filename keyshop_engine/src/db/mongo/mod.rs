//! MongoDB backend for the storefront engine.
//!
//! The collections are shared with the trading bot and the checkout frontend, so this module only ever reads from
//! them, with the single exception of [`orders::apply_settlement`].
mod counters;
mod mongo_impl;
pub mod orders;

pub use mongo_impl::{CollectionNames, MongoDatabase};

use mongodb::bson::Bson;

use crate::traits::{SourceError, StoreError};

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

impl From<mongodb::error::Error> for SourceError {
    fn from(e: mongodb::error::Error) -> Self {
        SourceError::Unavailable(e.to_string())
    }
}

/// Reads a numeric document value as an integer. Doubles are accepted only if they hold a whole number.
pub(crate) fn bson_to_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        #[allow(clippy::cast_possible_truncation)]
        Bson::Double(v) if v.fract() == 0.0 => Some(*v as i64),
        _ => None,
    }
}

pub(crate) fn count_to_i64(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
