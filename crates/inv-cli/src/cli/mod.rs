use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `inv` binary.
#[derive(Debug, Parser)]
#[command(
    name = "inv",
    version,
    about = "Device and part inventory with an append-only status ledger"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Colour status cells in table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color_mode: ColorMode,

    /// Database file (overrides `database.path`; `:memory:` for a scratch run)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Acting user id recorded on ledger rows (overrides `general.default_actor`)
    #[arg(short, long, global = true)]
    pub actor: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color_mode: self.color_mode,
            db: self.db.clone(),
            actor: self.actor.clone(),
        }
    }
}
