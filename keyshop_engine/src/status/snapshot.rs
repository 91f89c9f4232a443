use std::fmt::Display;

/// A single counter value and whether it came from the most recent refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reading {
    pub value: i64,
    pub fresh: bool,
}

impl Reading {
    pub fn fresh(value: i64) -> Self {
        Self { value, fresh: true }
    }

    /// The reading that replaces `self` after a refresh. A failed fetch keeps the old value, marked stale.
    pub fn carry(self, fetched: Option<i64>) -> Self {
        match fetched {
            Some(value) => Self::fresh(value),
            None => Self { value: self.value, fresh: false },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Price,
    Stock,
    OrderCount,
    MarketPrice,
    TransactionTotal,
}

impl StatusField {
    pub const ALL: [StatusField; 5] =
        [Self::Price, Self::Stock, Self::OrderCount, Self::MarketPrice, Self::TransactionTotal];

    /// The field's name in the status response.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Stock => "stock",
            Self::OrderCount => "orders",
            Self::MarketPrice => "marketPrice",
            Self::TransactionTotal => "transactions",
        }
    }
}

impl Display for StatusField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storefront counters. Created zero-valued with `updated_at == 0` so that the first refresh always runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub price: Reading,
    pub stock: Reading,
    pub order_count: Reading,
    pub market_price: Reading,
    pub transaction_total: Reading,
    /// Unix time (seconds) of the last completed refresh.
    pub updated_at: i64,
}

impl StatusSnapshot {
    pub fn reading(&self, field: StatusField) -> Reading {
        match field {
            StatusField::Price => self.price,
            StatusField::Stock => self.stock,
            StatusField::OrderCount => self.order_count,
            StatusField::MarketPrice => self.market_price,
            StatusField::TransactionTotal => self.transaction_total,
        }
    }

    /// Fields whose value was not refreshed by the last fan-out.
    pub fn stale_fields(&self) -> Vec<StatusField> {
        StatusField::ALL.into_iter().filter(|f| !self.reading(*f).fresh).collect()
    }
}
