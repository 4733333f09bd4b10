//! Credit ledger aggregates over a snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{CreditRecord, CreditStatus};

/// Totals returned alongside a credit listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub total_outstanding: Decimal,
    pub total_customers: usize,
    pub overdue_count: usize,
}

impl CreditSummary {
    pub fn from_records(records: &[CreditRecord], today: NaiveDate) -> Self {
        Self {
            total_outstanding: total_outstanding(records),
            total_customers: records.len(),
            overdue_count: records.iter().filter(|r| r.is_overdue_at(today)).count(),
        }
    }
}

/// Sum of outstanding balances across every record, saturating at `Decimal::MAX`.
pub fn total_outstanding(records: &[CreditRecord]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |total, r| total.saturating_add(r.outstanding_amount))
}

/// Records that are overdue as of `today`, in snapshot order.
pub fn overdue_records(records: &[CreditRecord], today: NaiveDate) -> Vec<&CreditRecord> {
    records.iter().filter(|r| r.is_overdue_at(today)).collect()
}

/// Records whose derived status as of `today` is `status`.
pub fn filter_by_status(
    records: &[CreditRecord],
    status: CreditStatus,
    today: NaiveDate,
) -> Vec<&CreditRecord> {
    records.iter().filter(|r| r.status_at(today) == status).collect()
}
