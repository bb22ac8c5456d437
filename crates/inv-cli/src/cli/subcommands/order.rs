use clap::Subcommand;

/// Purchase order commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PurchaseOrderCommands {
    /// Open a purchase order. The supplier is created if it does not exist.
    Create {
        #[arg(long)]
        supplier: String,
        #[arg(long)]
        number: String,
    },
    /// Get a purchase order by ID.
    Get { id: String },
    /// Close a purchase order to further goods-in.
    Complete { id: String },
}

/// Sales order commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SalesOrderCommands {
    /// Open a sales order. The customer is created if it does not exist.
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        number: String,
    },
    /// Get a sales order by ID.
    Get { id: String },
    /// Close a sales order to further sales.
    Complete { id: String },
}
