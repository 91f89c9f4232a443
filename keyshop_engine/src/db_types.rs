//! Types that mirror the documents held in the storefront's stores, plus the inbound gateway payload.
//!
//! Field names follow the document schema the bot and the checkout frontend already write, hence the `serde` renames.
use std::fmt::Display;

use ksg_common::SteamId;
use serde::{Deserialize, Serialize};

//--------------------------------------        Order         ---------------------------------------------------------
/// An order in the `orderv2` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(rename = "SteamID")]
    pub steam_id: SteamId,
    #[serde(rename = "Price")]
    pub price: i64,
    #[serde(rename = "Count")]
    pub count: i64,
    #[serde(rename = "OrderStatus")]
    pub order_status: OrderStatus,
}

//--------------------------------------     OrderStatus      ---------------------------------------------------------
/// Payment details for an order. The first block is written when the checkout is created; the `process_*` fields and
/// `settled_amount` are written by the gateway callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderStatus {
    #[serde(rename = "SmilePayNO")]
    pub smilepay_no: String,
    #[serde(rename = "Data_id")]
    pub data_id: String,
    /// The amount the customer was asked to pay.
    #[serde(rename = "Amount")]
    pub declared_amount: i64,
    /// Payment deadline, formatted `YYYY/MM/DD HH:mm:ss`.
    #[serde(rename = "PayEndDate")]
    pub pay_end_date: String,
    #[serde(rename = "PayMethod")]
    pub pay_method: String,
    #[serde(rename = "AtmBankNo")]
    pub atm_bank_no: String,
    #[serde(rename = "AtmNo")]
    pub atm_no: String,
    #[serde(rename = "IbonNo")]
    pub ibon_no: String,
    #[serde(rename = "FamiNO")]
    pub fami_no: String,
    #[serde(rename = "Process_date")]
    pub process_date: String,
    #[serde(rename = "Process_time")]
    pub process_time: String,
    /// The amount confirmed by the gateway. Zero until a settlement is applied.
    #[serde(rename = "Amt")]
    pub settled_amount: i64,
}

//--------------------------------------   PaymentCallback    ---------------------------------------------------------
/// The settlement notice posted by the payment gateway. Every field arrives as text; missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentCallback {
    #[serde(rename = "Data_id")]
    pub data_id: String,
    #[serde(rename = "Process_date")]
    pub process_date: String,
    #[serde(rename = "Process_time")]
    pub process_time: String,
    /// The purchase amount the gateway believes was declared for the order.
    #[serde(rename = "Purchamt")]
    pub purchase_amount: String,
    /// The amount actually received by the gateway.
    #[serde(rename = "Amount")]
    pub settlement_amount: String,
    #[serde(rename = "Mid_smilepay")]
    pub checksum: String,
    #[serde(rename = "Smseid")]
    pub transaction_suffix: String,
}

impl Display for PaymentCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "data_id={} purchamt={} amount={} smseid={} mid_smilepay={}",
            self.data_id, self.purchase_amount, self.settlement_amount, self.transaction_suffix, self.checksum
        )
    }
}

//--------------------------------------      Settlement      ---------------------------------------------------------
/// The part of a validated callback that is written onto the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub data_id: String,
    pub amount: i64,
    pub process_date: String,
    pub process_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The settlement was written onto a matching order.
    Applied,
    /// The write succeeded but no order carried the callback's `Data_id`.
    NoMatchingOrder,
}
