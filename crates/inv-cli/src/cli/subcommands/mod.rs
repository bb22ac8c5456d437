mod counterparty;
mod device;
mod order;
mod part;
mod user;

pub use counterparty::CounterpartyCommands;
pub use device::{DeviceCommands, DeviceUpdateArgs, IdentifierArgs, NewDeviceArgs};
pub use order::{PurchaseOrderCommands, SalesOrderCommands};
pub use part::{PartAdjustArgs, PartCommands};
pub use user::UserCommands;
