//! Snapshot-level credit operations.
//!
//! These wrap the `CreditRecord` aggregate for callers holding store snapshots:
//! they never mutate their input and return the record to persist.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopledger_core::{Aggregate, CustomerId, DomainResult};

use crate::record::{CreditCommand, CreditRecord, GrantCredit, RecordPayment};

/// Days until a grant falls due when the caller gives no due date.
pub const DEFAULT_CREDIT_TERM_DAYS: u32 = 30;

/// A new credit grant as submitted by the shop.
///
/// Without `customer_id` a new customer record is always opened, even when
/// another record carries the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl GrantRequest {
    pub fn new(customer_name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            customer_id: None,
            customer_name: customer_name.into(),
            amount,
            due_date: None,
            items: Vec::new(),
        }
    }

    pub fn for_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    /// Due date, defaulting to `term_days` after `now`.
    pub fn resolved_due_date(&self, now: DateTime<Utc>, term_days: u32) -> NaiveDate {
        self.due_date.unwrap_or_else(|| {
            let today = now.date_naive();
            today
                .checked_add_days(Days::new(u64::from(term_days)))
                .unwrap_or(today)
        })
    }
}

/// Apply a grant to `existing` (same customer id) or to a newly opened record.
///
/// The id is taken from the request, then from `existing`, and allocated fresh
/// only when neither is present.
pub fn grant_credit(
    existing: Option<&CreditRecord>,
    request: &GrantRequest,
    now: DateTime<Utc>,
    term_days: u32,
) -> DomainResult<CreditRecord> {
    let customer_id = request
        .customer_id
        .or_else(|| existing.map(|r| r.customer_id))
        .unwrap_or_default();

    let mut record = match existing {
        Some(record) => record.clone(),
        None => CreditRecord::empty(customer_id),
    };

    record.execute(&CreditCommand::GrantCredit(GrantCredit {
        customer_id,
        customer_name: request.customer_name.clone(),
        amount: request.amount,
        due_date: request.resolved_due_date(now, term_days),
        items: request.items.clone(),
        transaction_id: Uuid::now_v7(),
        occurred_at: now,
    }))?;

    Ok(record)
}

/// Apply a payment to a copy of `record`.
///
/// The balance is reduced by at most the outstanding amount and never goes
/// negative; status is re-derived as of `now`.
pub fn apply_credit_payment(
    record: &CreditRecord,
    amount: Decimal,
    now: DateTime<Utc>,
) -> DomainResult<CreditRecord> {
    let mut updated = record.clone();
    updated.execute(&CreditCommand::RecordPayment(RecordPayment {
        customer_id: record.customer_id,
        amount,
        transaction_id: Uuid::now_v7(),
        occurred_at: now,
    }))?;
    Ok(updated)
}

/// Re-derive every stored status as of `now`.
pub fn refresh_statuses(records: &mut [CreditRecord], now: DateTime<Utc>) {
    for record in records.iter_mut() {
        record.refresh(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use shopledger_core::DomainError;

    use crate::record::CreditStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }

    fn yesterday() -> NaiveDate {
        now().date_naive() - Duration::days(1)
    }

    #[test]
    fn grant_without_id_opens_new_customer() {
        let request = GrantRequest::new("Sita", Decimal::new(250, 0));
        let a = grant_credit(None, &request, now(), DEFAULT_CREDIT_TERM_DAYS).unwrap();
        let b = grant_credit(None, &request, now(), DEFAULT_CREDIT_TERM_DAYS).unwrap();

        assert_ne!(a.customer_id, b.customer_id);
        assert_eq!(a.status, CreditStatus::Pending);
        assert_eq!(a.outstanding_amount, Decimal::new(250, 0));
        assert_eq!(a.last_updated, now());
    }

    #[test]
    fn grant_defaults_due_date_to_credit_term() {
        let record = grant_credit(
            None,
            &GrantRequest::new("Sita", Decimal::ONE),
            now(),
            DEFAULT_CREDIT_TERM_DAYS,
        )
        .unwrap();
        assert_eq!(
            record.due_date,
            NaiveDate::from_ymd_opt(2026, 11, 16).unwrap()
        );
    }

    #[test]
    fn grant_with_known_id_adds_to_balance() {
        let first = grant_credit(
            None,
            &GrantRequest::new("Sita", Decimal::new(100, 0)).with_items(vec!["oil".into()]),
            now(),
            30,
        )
        .unwrap();

        let request = GrantRequest::new("Sita", Decimal::new(60, 0))
            .for_customer(first.customer_id)
            .with_items(vec!["soap".into()]);
        let second = grant_credit(Some(&first), &request, now(), 30).unwrap();

        assert_eq!(second.customer_id, first.customer_id);
        assert_eq!(second.outstanding_amount, Decimal::new(160, 0));
        assert_eq!(second.items, vec!["oil".to_string(), "soap".to_string()]);
        assert_eq!(second.credit_count(), 2);
        // Input snapshot untouched.
        assert_eq!(first.outstanding_amount, Decimal::new(100, 0));
    }

    #[test]
    fn overdue_scenario_paid_in_full() {
        let record = grant_credit(
            None,
            &GrantRequest::new("Mohan", Decimal::new(1000, 0)).due_on(yesterday()),
            now() - Duration::days(40),
            30,
        )
        .unwrap();

        let mut snapshot = vec![record];
        refresh_statuses(&mut snapshot, now());
        assert_eq!(snapshot[0].status, CreditStatus::Overdue);

        let paid = apply_credit_payment(&snapshot[0], Decimal::new(1000, 0), now()).unwrap();
        assert_eq!(paid.outstanding_amount, Decimal::ZERO);
        assert_eq!(paid.status, CreditStatus::Paid);
        assert_eq!(paid.last_updated, now());
    }

    #[test]
    fn negative_payment_is_a_validation_error() {
        let record = grant_credit(None, &GrantRequest::new("Mohan", Decimal::TEN), now(), 30).unwrap();
        let err = apply_credit_payment(&record, Decimal::NEGATIVE_ONE, now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: payments never raise the balance, never take it below zero,
        /// and enough of them always reach zero.
        #[test]
        fn payments_are_monotonic_and_converge(
            granted in cents(),
            payments in prop::collection::vec(cents(), 1..20),
            due_offset in -60i64..60,
        ) {
            let due = now().date_naive() + Duration::days(due_offset);
            let mut record = grant_credit(
                None,
                &GrantRequest::new("Prop", granted).due_on(due),
                now(),
                30,
            ).unwrap();

            for amount in payments {
                let next = apply_credit_payment(&record, amount, now()).unwrap();
                prop_assert!(next.outstanding_amount <= record.outstanding_amount);
                prop_assert!(next.outstanding_amount >= Decimal::ZERO);
                record = next;
            }

            // An overpayment always settles the tab.
            let overpay = record.outstanding_amount + Decimal::new(1, 2);
            let settled = apply_credit_payment(&record, overpay, now()).unwrap();
            prop_assert_eq!(settled.outstanding_amount, Decimal::ZERO);
            prop_assert_eq!(settled.status, CreditStatus::Paid);
        }

        /// Property: PAID iff zero balance; OVERDUE iff positive balance past due.
        #[test]
        fn status_follows_balance_and_due_date(
            granted in cents(),
            paid in prop::option::of(cents()),
            due_offset in -60i64..60,
            read_offset in 0i64..90,
        ) {
            let due = now().date_naive() + Duration::days(due_offset);
            let mut record = grant_credit(
                None,
                &GrantRequest::new("Prop", granted).due_on(due),
                now(),
                30,
            ).unwrap();
            if let Some(amount) = paid {
                record = apply_credit_payment(&record, amount, now()).unwrap();
            }

            let read_at = now() + Duration::days(read_offset);
            record.refresh(read_at);
            let today = read_at.date_naive();

            prop_assert_eq!(
                record.status == CreditStatus::Paid,
                record.outstanding_amount == Decimal::ZERO
            );
            prop_assert_eq!(
                record.status == CreditStatus::Overdue,
                record.outstanding_amount > Decimal::ZERO && today > record.due_date
            );
        }
    }
}
