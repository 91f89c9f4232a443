use futures_util::TryStreamExt;
use log::*;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Database,
};

use crate::{
    db_types::{Order, Settlement},
    traits::StoreError,
};

pub(crate) fn order_filter(data_id: &str) -> Document {
    doc! { "OrderStatus.Data_id": data_id }
}

pub(crate) fn settlement_update(settlement: &Settlement) -> Document {
    doc! {
        "$set": {
            "OrderStatus.Process_date": settlement.process_date.as_str(),
            "OrderStatus.Process_time": settlement.process_time.as_str(),
            "OrderStatus.Amt": settlement.amount,
        }
    }
}

/// Returns every order in the collection, ordered by `Data_id`, most recent first.
pub async fn fetch_orders(db: &Database, collection: &str) -> Result<Vec<Order>, StoreError> {
    let options = FindOptions::builder().sort(doc! { "OrderStatus.Data_id": -1 }).build();
    let cursor = db.collection::<Order>(collection).find(None, options).await?;
    let orders = cursor.try_collect::<Vec<Order>>().await?;
    trace!("🗃️ Fetched {} orders from {collection}", orders.len());
    Ok(orders)
}

pub async fn fetch_order_by_data_id(
    data_id: &str,
    db: &Database,
    collection: &str,
) -> Result<Option<Order>, StoreError> {
    let order = db.collection::<Order>(collection).find_one(order_filter(data_id), None).await?;
    Ok(order)
}

/// Sets `Amt`, `Process_date` and `Process_time` on the order matching the settlement's `Data_id`.
/// Returns the number of matched documents.
pub async fn apply_settlement(settlement: &Settlement, db: &Database, collection: &str) -> Result<u64, StoreError> {
    let result = db
        .collection::<Document>(collection)
        .update_one(order_filter(&settlement.data_id), settlement_update(settlement), None)
        .await?;
    debug!(
        "🗃️ Settlement for [{}] matched {} and modified {} orders",
        settlement.data_id, result.matched_count, result.modified_count
    );
    Ok(result.matched_count)
}
