use clap::{Args, Subcommand};

#[derive(Clone, Debug, Args)]
pub struct PartAdjustArgs {
    /// Movement kind: purchase, usage, adjustment, return-in.
    #[arg(long)]
    pub kind: String,
    /// Quantity on hand after the movement.
    #[arg(long)]
    pub quantity: i64,
    /// Size of the movement; checked against the actual difference when given.
    #[arg(long)]
    pub change: Option<i64>,
    /// Order, job or stocktake the movement belongs to (defaults to the part ID).
    #[arg(long)]
    pub reference: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

/// Part commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PartCommands {
    /// Create a part with an opening quantity.
    Add {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0)]
        quantity: i64,
    },
    /// Record a quantity movement.
    Adjust {
        id: String,
        #[command(flatten)]
        movement: PartAdjustArgs,
    },
    /// Get a part by ID or SKU.
    Get { id: String },
    /// List parts by SKU.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show the quantity ledger, newest first.
    History {
        id: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}
