//! Ledger facts.
//!
//! Grants and payments are recorded as events on the credit record; the record's
//! balance and transaction history are the fold of those events.

pub mod event;

pub use event::Event;
