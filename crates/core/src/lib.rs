//! `shopledger-core` - domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory and
//! credit ledgers (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::{Entity, find_by_id, remove_by_id, upsert_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, ItemId, ShopId};
