use keyshop_engine::{order_objects::OrderView, StatusSnapshot};
use serde::{Deserialize, Serialize};

/// The storefront counters, as served to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub price: i64,
    pub stock: i64,
    pub orders: i64,
    #[serde(rename = "marketPrice")]
    pub market_price: i64,
    pub transactions: i64,
    /// Fields served from an earlier refresh because their source failed.
    pub stale: Vec<String>,
}

impl From<StatusSnapshot> for StatusResponse {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            price: snapshot.price.value,
            stock: snapshot.stock.value,
            orders: snapshot.order_count.value,
            market_price: snapshot.market_price.value,
            transactions: snapshot.transaction_total.value,
            stale: snapshot.stale_fields().iter().map(|f| f.as_str().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderView>,
}

/// The code echoed back to the payment gateway to acknowledge a callback.
#[derive(Debug, Clone, Default)]
pub struct CallbackAck(pub String);

impl CallbackAck {
    pub fn is_configured(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn body(&self) -> String {
        format!("<Roturlstatus>{}</Roturlstatus>", self.0)
    }
}

#[cfg(test)]
mod test {
    use keyshop_engine::status::Reading;

    use super::*;

    #[test]
    fn status_response_json() {
        let snapshot = StatusSnapshot {
            price: Reading::fresh(1250),
            stock: Reading { value: 42, fresh: false },
            order_count: Reading::fresh(17),
            market_price: Reading::fresh(1199),
            transaction_total: Reading::fresh(930),
            updated_at: 1_700_000_000,
        };
        let json = serde_json::to_string(&StatusResponse::from(snapshot)).unwrap();
        assert_eq!(
            json,
            r#"{"price":1250,"stock":42,"orders":17,"marketPrice":1199,"transactions":930,"stale":["stock"]}"#
        );
    }

    #[test]
    fn ack_body() {
        assert_eq!(CallbackAck("OK123".into()).body(), "<Roturlstatus>OK123</Roturlstatus>");
        assert!(!CallbackAck::default().is_configured());
    }
}
