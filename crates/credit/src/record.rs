use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopledger_core::money::{clamp_non_negative, ensure_positive};
use shopledger_core::{Aggregate, AggregateRoot, CustomerId, DomainError, Entity};
use shopledger_events::Event;

/// Credit status lifecycle.
///
/// Never an independent source of truth: always derivable from
/// `outstanding_amount`, `due_date` and the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    Pending,
    Overdue,
    Paid,
}

impl CreditStatus {
    /// - zero balance → `Paid` (regardless of due date)
    /// - positive balance past the due date → `Overdue`
    /// - positive balance on or before the due date → `Pending`
    pub fn derive(outstanding: Decimal, due_date: NaiveDate, today: NaiveDate) -> Self {
        if outstanding <= Decimal::ZERO {
            CreditStatus::Paid
        } else if today > due_date {
            CreditStatus::Overdue
        } else {
            CreditStatus::Pending
        }
    }
}

/// Kind of ledger movement on a customer's tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Credit,
    Payment,
}

/// One entry in a customer's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditTransaction {
    pub transaction_id: Uuid,
    pub kind: TransactionKind,
    /// For payments, the amount actually applied after clamping.
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Aggregate root: a customer's credit record.
///
/// Fields are public because this is also the stored record shape; mutate it
/// only through `Aggregate::execute` so balance, status and history agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecord {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub outstanding_amount: Decimal,
    pub due_date: NaiveDate,
    pub status: CreditStatus,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub transactions: Vec<CreditTransaction>,
    /// Number of grants and payments applied; zero means not yet opened.
    pub version: u64,
}

impl CreditRecord {
    /// Create an empty, not-yet-opened record for a first grant.
    pub fn empty(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            customer_name: String::new(),
            outstanding_amount: Decimal::ZERO,
            due_date: NaiveDate::MIN,
            status: CreditStatus::Paid,
            last_updated: DateTime::<Utc>::MIN_UTC,
            items: Vec::new(),
            transactions: Vec::new(),
            version: 0,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.version > 0
    }

    /// Status as of `today`, derived from balance and due date.
    pub fn status_at(&self, today: NaiveDate) -> CreditStatus {
        CreditStatus::derive(self.outstanding_amount, self.due_date, today)
    }

    /// Re-derive the stored `status` field as of `now`.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.status = self.status_at(now.date_naive());
    }

    pub fn is_overdue_at(&self, today: NaiveDate) -> bool {
        self.status_at(today) == CreditStatus::Overdue
    }

    pub fn credit_count(&self) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Credit)
            .count()
    }

    pub fn payment_count(&self) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Payment)
            .count()
    }
}

impl Entity for CreditRecord {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.customer_id
    }
}

impl AggregateRoot for CreditRecord {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.customer_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: GrantCredit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantCredit {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub items: Vec<String>,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordPayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayment {
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditCommand {
    GrantCredit(GrantCredit),
    RecordPayment(RecordPayment),
}

/// Event: CreditGranted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditGranted {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub items: Vec<String>,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PaymentRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub customer_id: CustomerId,
    pub requested_amount: Decimal,
    /// `min(requested, outstanding)`; overpayment is not carried as credit.
    pub applied_amount: Decimal,
    pub transaction_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditEvent {
    CreditGranted(CreditGranted),
    PaymentRecorded(PaymentRecorded),
}

impl Event for CreditEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CreditEvent::CreditGranted(_) => "credit.record.granted",
            CreditEvent::PaymentRecorded(_) => "credit.record.payment_recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CreditEvent::CreditGranted(e) => e.occurred_at,
            CreditEvent::PaymentRecorded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for CreditRecord {
    type Command = CreditCommand;
    type Event = CreditEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CreditEvent::CreditGranted(e) => {
                self.customer_id = e.customer_id;
                self.customer_name = e.customer_name.clone();
                self.outstanding_amount = self.outstanding_amount.saturating_add(e.amount);
                self.due_date = e.due_date;
                self.items.extend(e.items.iter().cloned());
                self.transactions.push(CreditTransaction {
                    transaction_id: e.transaction_id,
                    kind: TransactionKind::Credit,
                    amount: e.amount,
                    items: e.items.clone(),
                    date: e.occurred_at,
                    due_date: Some(e.due_date),
                });
                self.last_updated = e.occurred_at;
            }
            CreditEvent::PaymentRecorded(e) => {
                self.outstanding_amount =
                    clamp_non_negative(self.outstanding_amount - e.applied_amount);
                self.transactions.push(CreditTransaction {
                    transaction_id: e.transaction_id,
                    kind: TransactionKind::Payment,
                    amount: e.applied_amount,
                    items: Vec::new(),
                    date: e.occurred_at,
                    due_date: None,
                });
                self.last_updated = e.occurred_at;
            }
        }

        self.refresh(event.occurred_at());

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CreditCommand::GrantCredit(cmd) => self.handle_grant(cmd),
            CreditCommand::RecordPayment(cmd) => self.handle_payment(cmd),
        }
    }
}

impl CreditRecord {
    fn ensure_customer_id(&self, customer_id: CustomerId) -> Result<(), DomainError> {
        if self.customer_id != customer_id {
            return Err(DomainError::invariant("customer_id mismatch"));
        }
        Ok(())
    }

    fn handle_grant(&self, cmd: &GrantCredit) -> Result<Vec<CreditEvent>, DomainError> {
        if self.is_opened() {
            self.ensure_customer_id(cmd.customer_id)?;
        }
        let customer_name = cmd.customer_name.trim();
        if customer_name.is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        ensure_positive(cmd.amount, "credit amount")?;
        if self.outstanding_amount.checked_add(cmd.amount).is_none() {
            return Err(DomainError::validation(
                "credit amount would overflow the outstanding balance",
            ));
        }

        Ok(vec![CreditEvent::CreditGranted(CreditGranted {
            customer_id: cmd.customer_id,
            customer_name: customer_name.to_string(),
            amount: cmd.amount,
            due_date: cmd.due_date,
            items: cmd.items.clone(),
            transaction_id: cmd.transaction_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_payment(&self, cmd: &RecordPayment) -> Result<Vec<CreditEvent>, DomainError> {
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }
        self.ensure_customer_id(cmd.customer_id)?;
        ensure_positive(cmd.amount, "payment amount")?;

        Ok(vec![CreditEvent::PaymentRecorded(PaymentRecorded {
            customer_id: cmd.customer_id,
            requested_amount: cmd.amount,
            applied_amount: cmd.amount.min(self.outstanding_amount),
            transaction_id: cmd.transaction_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
