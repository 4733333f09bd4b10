//! Customer credit risk heuristic.
//!
//! Score in `[0, 1]`, higher is riskier:
//! - balance above 10000 adds 0.4, above 5000 adds 0.2
//! - being overdue adds 0.3
//! - fewer than one payment per two grants adds 0.3
//!
//! A record with no transaction history scores a neutral 0.5.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::record::CreditRecord;

const NEUTRAL_RISK: f64 = 0.5;

pub fn risk_score(record: &CreditRecord, today: NaiveDate) -> f64 {
    if record.transactions.is_empty() {
        return NEUTRAL_RISK;
    }

    let mut risk = 0.0;

    if record.outstanding_amount > Decimal::from(10_000) {
        risk += 0.4;
    } else if record.outstanding_amount > Decimal::from(5_000) {
        risk += 0.2;
    }

    if record.is_overdue_at(today) {
        risk += 0.3;
    }

    let credits = record.credit_count();
    if credits > 0 {
        let payment_ratio = record.payment_count() as f64 / credits as f64;
        if payment_ratio < 0.5 {
            risk += 0.3;
        }
    }

    f64::min(1.0, risk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use shopledger_core::CustomerId;

    use crate::ledger::{GrantRequest, apply_credit_payment, grant_credit};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_history_is_neutral() {
        let record = CreditRecord::empty(CustomerId::new());
        assert!(approx(risk_score(&record, now().date_naive()), 0.5));
    }

    #[test]
    fn large_overdue_unpaid_balance_is_capped_at_one() {
        let record = grant_credit(
            None,
            &GrantRequest::new("Big", Decimal::from(12_000)).due_on(now().date_naive() - Duration::days(2)),
            now() - Duration::days(30),
            30,
        )
        .unwrap();
        assert!(approx(risk_score(&record, now().date_naive()), 1.0));
    }

    #[test]
    fn regular_payer_with_moderate_balance() {
        let due = now().date_naive() + Duration::days(10);
        let record = grant_credit(
            None,
            &GrantRequest::new("Steady", Decimal::from(7_000)).due_on(due),
            now(),
            30,
        )
        .unwrap();
        let record = apply_credit_payment(&record, Decimal::from(500), now()).unwrap();
        // 6500 outstanding (+0.2), not overdue, one payment per grant.
        assert!(approx(risk_score(&record, now().date_naive()), 0.2));
    }
}
