//! Application services: load a fresh snapshot, run the domain rule, persist
//! the result. Nothing is cached between calls.

mod credit;
mod inventory;

pub use credit::{CreditListing, CreditService, CustomerRisk};
pub use inventory::InventoryService;
