use std::fmt::Debug;

use ksg_common::Secret;
use log::*;

use super::errors::SettlementError;
use crate::{
    db_types::{PaymentCallback, Settlement, SettlementOutcome},
    helpers::verify_checksum,
    traits::OrderStore,
};

/// Applies payment gateway settlement notices to orders.
pub struct SettlementApi<B> {
    db: B,
    merchant_code: Secret<String>,
}

impl<B> Debug for SettlementApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SettlementApi")
    }
}

impl<B> SettlementApi<B> {
    pub fn new(db: B, merchant_code: Secret<String>) -> Self {
        Self { db, merchant_code }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> SettlementApi<B>
where B: OrderStore
{
    /// Validates a callback and, if it passes, writes the settlement onto the order with the same `Data_id`.
    ///
    /// The checks run in order: verification code, then both amounts must parse, then they must be equal. A rejected
    /// callback never reaches the store.
    ///
    /// A valid callback for an unknown `Data_id` is not an error; it returns [`SettlementOutcome::NoMatchingOrder`].
    pub async fn process_callback(&self, callback: &PaymentCallback) -> Result<SettlementOutcome, SettlementError> {
        if self.merchant_code.is_empty() {
            error!("💳️ No merchant verification code is configured. All payment callbacks will be rejected.");
        }
        let valid = verify_checksum(
            self.merchant_code.reveal(),
            &callback.purchase_amount,
            &callback.transaction_suffix,
            &callback.checksum,
        );
        if !valid {
            warn!("💳️ Rejecting callback with an invalid verification code. {callback}");
            return Err(SettlementError::InvalidChecksum);
        }
        let declared = callback
            .purchase_amount
            .parse::<i64>()
            .map_err(|_| SettlementError::InvalidPurchaseAmount(callback.purchase_amount.clone()))?;
        let settled = callback
            .settlement_amount
            .parse::<i64>()
            .map_err(|_| SettlementError::InvalidSettlementAmount(callback.settlement_amount.clone()))?;
        if declared != settled {
            warn!("💳️ Rejecting callback for [{}]: declared {declared}, settled {settled}", callback.data_id);
            return Err(SettlementError::AmountMismatch { declared, settled });
        }
        let settlement = Settlement {
            data_id: callback.data_id.clone(),
            amount: settled,
            process_date: callback.process_date.clone(),
            process_time: callback.process_time.clone(),
        };
        let matched = self.db.apply_settlement(&settlement).await?;
        if matched == 0 {
            warn!("💳️ Settlement of {settled} for [{}] did not match any order", settlement.data_id);
            Ok(SettlementOutcome::NoMatchingOrder)
        } else {
            info!("💳️ Order [{}] settled for {settled}", settlement.data_id);
            Ok(SettlementOutcome::Applied)
        }
    }
}
