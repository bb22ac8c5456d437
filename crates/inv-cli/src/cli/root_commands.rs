use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CounterpartyCommands, DeviceCommands, PartCommands, PurchaseOrderCommands, SalesOrderCommands,
    UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users who perform inventory actions.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Suppliers devices are bought from.
    Supplier {
        #[command(subcommand)]
        action: CounterpartyCommands,
    },
    /// Customers devices are sold to.
    Customer {
        #[command(subcommand)]
        action: CounterpartyCommands,
    },
    /// Purchase orders.
    Po {
        #[command(subcommand)]
        action: PurchaseOrderCommands,
    },
    /// Sales orders.
    So {
        #[command(subcommand)]
        action: SalesOrderCommands,
    },
    /// Devices and their status ledger.
    Device {
        #[command(subcommand)]
        action: DeviceCommands,
    },
    /// Parts and their quantity ledger.
    Part {
        #[command(subcommand)]
        action: PartCommands,
    },
    /// Print the JSON Schema of an entity type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity type, e.g. device, device-transaction, part-transaction.
    pub type_name: String,
}
