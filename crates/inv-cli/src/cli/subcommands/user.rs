use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user.
    Add {
        /// Name shown in ledger history.
        display_name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Get a user by ID.
    Get { id: String },
    /// List users by name.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
}
