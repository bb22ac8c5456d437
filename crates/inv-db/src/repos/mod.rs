//! Repository modules implementing the inventory operations.
//!
//! Each module adds methods to `InventoryService` via `impl InventoryService`
//! blocks.

pub mod counterparty;
pub mod device;
pub mod ledger;
pub mod order;
pub mod part;
pub mod user;
pub mod workflow;
