use futures_util::TryStreamExt;
use log::*;
use mongodb::{
    bson::{doc, Document},
    Database,
};

use super::{bson_to_i64, count_to_i64};
use crate::traits::SourceError;

pub(crate) fn traded_orders_filter() -> Document {
    doc! { "OrderStatus.TradeStatus": "1" }
}

pub(crate) fn settled_orders_filter() -> Document {
    doc! { "OrderStatus.Amt": { "$exists": true } }
}

pub(crate) fn user_traded_pipeline() -> Vec<Document> {
    vec![
        doc! { "$unwind": { "path": "$Transaction" } },
        doc! { "$match": { "Transaction.Traded": true } },
        doc! { "$group": { "_id": null, "total": { "$sum": "$Transaction.Count" } } },
    ]
}

pub(crate) fn traded_transactions_filter() -> Document {
    doc! { "traded": true }
}

pub async fn count_traded_orders(db: &Database, collection: &str) -> Result<i64, SourceError> {
    let count = db.collection::<Document>(collection).count_documents(traded_orders_filter(), None).await?;
    Ok(count_to_i64(count))
}

pub async fn count_settled_orders(db: &Database, collection: &str) -> Result<i64, SourceError> {
    let count = db.collection::<Document>(collection).count_documents(settled_orders_filter(), None).await?;
    Ok(count_to_i64(count))
}

/// Sums `Transaction.Count` over every traded entry in every user's `Transaction` array.
pub async fn sum_user_traded_counts(db: &Database, collection: &str) -> Result<i64, SourceError> {
    let mut cursor = db.collection::<Document>(collection).aggregate(user_traded_pipeline(), None).await?;
    let total = match cursor.try_next().await? {
        Some(row) => row
            .get("total")
            .and_then(bson_to_i64)
            .ok_or_else(|| SourceError::Parse(format!("Unexpected aggregation result: {row}")))?,
        None => 0,
    };
    Ok(total)
}

/// Sums `Count` over the traded entries in the transactions collection. Entries with an unreadable count are skipped.
pub async fn sum_traded_transactions(db: &Database, collection: &str) -> Result<i64, SourceError> {
    let mut cursor = db.collection::<Document>(collection).find(traded_transactions_filter(), None).await?;
    let mut total = 0i64;
    while let Some(entry) = cursor.try_next().await? {
        total = add_transaction_count(total, &entry);
    }
    Ok(total)
}

fn add_transaction_count(total: i64, entry: &Document) -> i64 {
    match entry.get("Count") {
        None => total,
        Some(value) => match bson_to_i64(value) {
            Some(count) => total.saturating_add(count),
            None => {
                warn!("🗃️ Skipping transaction with an unreadable Count: {entry}");
                total
            },
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order_filters() {
        assert_eq!(traded_orders_filter(), doc! { "OrderStatus.TradeStatus": "1" });
        assert_eq!(settled_orders_filter(), doc! { "OrderStatus.Amt": { "$exists": true } });
        assert_eq!(traded_transactions_filter(), doc! { "traded": true });
    }

    #[test]
    fn user_pipeline_sums_traded_entries() {
        let pipeline = user_traded_pipeline();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline[0], doc! { "$unwind": { "path": "$Transaction" } });
        assert_eq!(pipeline[1], doc! { "$match": { "Transaction.Traded": true } });
        assert_eq!(pipeline[2], doc! { "$group": { "_id": null, "total": { "$sum": "$Transaction.Count" } } });
    }

    #[test]
    fn transaction_counts() {
        assert_eq!(add_transaction_count(5, &doc! { "traded": true, "Count": 3 }), 8);
        assert_eq!(add_transaction_count(5, &doc! { "traded": true, "Count": 3i64 }), 8);
        assert_eq!(add_transaction_count(5, &doc! { "traded": true, "Count": 2.0 }), 7);
        assert_eq!(add_transaction_count(5, &doc! { "traded": true, "Count": "three" }), 5);
        assert_eq!(add_transaction_count(5, &doc! { "traded": true }), 5);
        assert_eq!(add_transaction_count(i64::MAX, &doc! { "Count": 1 }), i64::MAX);
    }
}
