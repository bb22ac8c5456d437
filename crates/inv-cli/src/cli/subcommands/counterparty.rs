use clap::Subcommand;

/// Supplier and customer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CounterpartyCommands {
    /// Find by name (case-insensitive), creating it if missing.
    Add { name: String },
    /// Get by ID.
    Get { id: String },
}
