//! Credit (udhaar) ledger domain module.
//!
//! A customer's running tab is an aggregate: grants and payments are facts
//! applied to it, and its status is re-derived from balance, due date and the
//! current day on every read and write.

pub mod ledger;
pub mod record;
pub mod risk;
pub mod summary;

pub use ledger::{DEFAULT_CREDIT_TERM_DAYS, GrantRequest, apply_credit_payment, grant_credit, refresh_statuses};
pub use record::{
    CreditCommand, CreditEvent, CreditGranted, CreditRecord, CreditStatus, CreditTransaction, GrantCredit,
    PaymentRecorded, RecordPayment, TransactionKind,
};
pub use risk::risk_score;
pub use summary::{CreditSummary, filter_by_status, overdue_records, total_outstanding};
