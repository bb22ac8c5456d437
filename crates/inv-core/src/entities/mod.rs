//! Entity structs for all inventory domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `inv-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema output.

mod counterparty;
mod device;
mod order;
mod part;
mod transaction;
mod user;

pub use counterparty::{Customer, Supplier};
pub use device::{Device, DeviceIdentifier};
pub use order::{PurchaseOrder, SalesOrder};
pub use part::{Part, PartHistoryEntry, PartTransaction};
pub use transaction::{DeviceHistoryEntry, DeviceTransaction};
pub use user::User;
