use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use shopledger_core::{CustomerId, DomainError, ShopId};
use shopledger_credit::{
    CreditRecord, CreditStatus, CreditSummary, GrantRequest, apply_credit_payment, grant_credit,
    refresh_statuses, risk_score,
};

use crate::error::ServiceError;
use crate::store::LedgerStore;

/// Credit records (status refreshed) plus the summary over all of them.
///
/// The summary ignores the status filter applied to `records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditListing {
    pub records: Vec<CreditRecord>,
    pub summary: CreditSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRisk {
    pub record: CreditRecord,
    /// 0.0 (safe) to 1.0 (risky).
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct CreditService<S> {
    store: S,
    term_days: u32,
}

impl<S: LedgerStore> CreditService<S> {
    pub fn new(store: S, term_days: u32) -> Self {
        Self { store, term_days }
    }

    pub async fn list(
        &self,
        shop_id: ShopId,
        status: Option<CreditStatus>,
        now: DateTime<Utc>,
    ) -> Result<CreditListing, ServiceError> {
        let mut records = self.store.list_credit(shop_id).await?;
        refresh_statuses(&mut records, now);
        let summary = CreditSummary::from_records(&records, now.date_naive());
        if let Some(status) = status {
            records.retain(|r| r.status == status);
        }
        Ok(CreditListing { records, summary })
    }

    /// Grant credit to a known customer id, or open a new record.
    ///
    /// A supplied id that the shop has never seen opens a record under that id.
    pub async fn grant(
        &self,
        shop_id: ShopId,
        request: &GrantRequest,
        now: DateTime<Utc>,
    ) -> Result<CreditRecord, ServiceError> {
        let existing = match request.customer_id {
            Some(customer_id) => self.store.get_credit(shop_id, customer_id).await?,
            None => None,
        };
        let record = grant_credit(existing.as_ref(), request, now, self.term_days)?;
        let record = self.store.put_credit(shop_id, record).await?;

        info!(
            shop_id = %shop_id,
            customer_id = %record.customer_id,
            amount = %request.amount,
            outstanding = %record.outstanding_amount,
            status = ?record.status,
            "credit granted"
        );
        Ok(record)
    }

    pub async fn record_payment(
        &self,
        shop_id: ShopId,
        customer_id: CustomerId,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<CreditRecord, ServiceError> {
        let current = self.load(shop_id, customer_id).await?;
        let updated = apply_credit_payment(&current, amount, now)?;
        if amount > current.outstanding_amount {
            warn!(
                shop_id = %shop_id,
                customer_id = %customer_id,
                requested = %amount,
                outstanding = %current.outstanding_amount,
                "payment exceeds outstanding balance; clamped"
            );
        }
        let updated = self.store.put_credit(shop_id, updated).await?;

        info!(
            shop_id = %shop_id,
            customer_id = %customer_id,
            outstanding = %updated.outstanding_amount,
            status = ?updated.status,
            "credit payment recorded"
        );
        Ok(updated)
    }

    pub async fn risk(
        &self,
        shop_id: ShopId,
        customer_id: CustomerId,
        now: DateTime<Utc>,
    ) -> Result<CustomerRisk, ServiceError> {
        let mut record = self.load(shop_id, customer_id).await?;
        record.refresh(now);
        let score = risk_score(&record, now.date_naive());
        Ok(CustomerRisk { record, score })
    }

    async fn load(&self, shop_id: ShopId, customer_id: CustomerId) -> Result<CreditRecord, ServiceError> {
        self.store
            .get_credit(shop_id, customer_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::NotFound))
    }
}
