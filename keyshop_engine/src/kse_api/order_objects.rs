use std::fmt::Display;

use chrono::{DateTime, Utc};
use ksg_common::SteamId;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{Order, OrderStatus},
    helpers::{format_order_date, parse_pay_end_date},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderLifecycle {
    Unpaid,
    Paid,
    Expired,
}

impl Display for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderLifecycle::Unpaid => write!(f, "Unpaid"),
            OrderLifecycle::Paid => write!(f, "Paid"),
            OrderLifecycle::Expired => write!(f, "Expired"),
        }
    }
}

/// Derives an order's lifecycle from its stored amounts and payment deadline.
///
/// * `Paid` if the settled amount equals the declared amount,
/// * otherwise `Expired` if the deadline is strictly before `now`,
/// * otherwise `Unpaid`.
///
/// A malformed deadline reads as the zero timestamp and so as `Expired`, unless the order is paid.
///
/// The status is never stored. A settlement that lands after the deadline has passed turns an `Expired` order into a
/// `Paid` one on the next read, and a listing taken while a callback is in flight may show either state.
pub fn derive_status(status: &OrderStatus, now: DateTime<Utc>) -> OrderLifecycle {
    if status.settled_amount == status.declared_amount {
        return OrderLifecycle::Paid;
    }
    if parse_pay_end_date(&status.pay_end_date) < now {
        OrderLifecycle::Expired
    } else {
        OrderLifecycle::Unpaid
    }
}

/// An order as presented to the admin views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    #[serde(rename = "SteamID")]
    pub steam_id: SteamId,
    #[serde(rename = "Price")]
    pub price: i64,
    #[serde(rename = "Count")]
    pub count: i64,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "OrderId")]
    pub order_id: String,
    #[serde(rename = "OrderDate")]
    pub order_date: String,
    /// `Process_date Process_time`, only set once the order is paid.
    #[serde(rename = "PayDate", default, skip_serializing_if = "Option::is_none")]
    pub pay_date: Option<String>,
    #[serde(rename = "PayMethod")]
    pub pay_method: String,
    #[serde(rename = "Status")]
    pub status: OrderLifecycle,
}

impl OrderView {
    pub fn from_order(order: Order, now: DateTime<Utc>) -> Self {
        let status = derive_status(&order.order_status, now);
        let s = order.order_status;
        let pay_date = match status {
            OrderLifecycle::Paid => Some(format!("{} {}", s.process_date, s.process_time)),
            _ => None,
        };
        Self {
            steam_id: order.steam_id,
            price: order.price,
            count: order.count,
            amount: s.declared_amount,
            order_date: format_order_date(&s.data_id),
            order_id: s.data_id,
            pay_date,
            pay_method: s.pay_method,
            status,
        }
    }
}
