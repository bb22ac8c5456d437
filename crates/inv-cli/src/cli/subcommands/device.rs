use clap::{Args, Subcommand};

/// IMEI or serial number; exactly one is required.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct IdentifierArgs {
    /// 15-digit IMEI with a valid check digit.
    #[arg(long)]
    pub imei: Option<String>,
    /// Manufacturer serial number.
    #[arg(long)]
    pub serial: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct NewDeviceArgs {
    #[command(flatten)]
    pub identifier: IdentifierArgs,
    #[arg(long)]
    pub manufacturer: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub storage: Option<String>,
    /// Condition grade A-F.
    #[arg(long)]
    pub grade: Option<String>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct DeviceUpdateArgs {
    #[arg(long)]
    pub manufacturer: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub storage: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// QC verdict: pass or fail.
    #[arg(long)]
    pub qc_status: Option<String>,
    #[arg(long)]
    pub qc_comments: Option<String>,
    /// Remove the QC verdict and comments.
    #[arg(long, conflicts_with_all = ["qc_status", "qc_comments"])]
    pub clear_qc: bool,
    #[arg(long)]
    pub repair_completed: Option<bool>,
}

/// Device commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DeviceCommands {
    /// Book a device into stock without an order.
    Add {
        #[command(flatten)]
        device: NewDeviceArgs,
        /// Initial status (default in_stock).
        #[arg(long)]
        status: Option<String>,
    },
    /// Book a device into stock against an open purchase order.
    Receive {
        #[arg(long)]
        po: String,
        #[command(flatten)]
        device: NewDeviceArgs,
    },
    /// Get a device by ID.
    Get { id: String },
    /// Look a device up by IMEI or serial number.
    Find {
        #[command(flatten)]
        identifier: IdentifierArgs,
    },
    /// List devices, most recently changed first.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Edit device fields. Status, QC and repair changes are ledgered.
    Update {
        id: String,
        #[command(flatten)]
        fields: DeviceUpdateArgs,
    },
    /// Show the status ledger, newest first.
    History {
        id: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Record a QC verdict.
    Qc {
        id: String,
        /// pass or fail.
        #[arg(long)]
        result: String,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Send a device to QC.
    RequireQc { id: String },
    /// Put a device into repair.
    RepairStart { id: String },
    /// Finish a repair; the device goes back to QC.
    RepairComplete { id: String },
    /// Sell a device on an open sales order.
    Sell {
        id: String,
        #[arg(long)]
        so: String,
    },
    /// Take a device back from a customer.
    Return {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
}
