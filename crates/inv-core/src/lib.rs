//! # inv-core
//!
//! Core types, ID prefixes, and error types for the device inventory system.
//!
//! This crate provides the foundational types shared across all inventory crates:
//! - Entity structs for devices, parts, orders, counterparties and ledger rows
//! - Status and classification enums
//! - Pure ledger derivation (device status changes, part quantity movements)
//! - IMEI validation and TAC extraction
//! - ID prefix constants
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod imei;
pub mod ledger;
