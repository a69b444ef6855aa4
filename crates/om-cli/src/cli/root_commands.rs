use clap::{Args, Subcommand};

use om_core::enums::Origin;

use crate::cli::subcommands::LeadCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Resolve one lead to a directory organization and persist the result.
    Resolve(ResolveArgs),
    /// Seed and inspect leads.
    Lead {
        #[command(subcommand)]
        action: LeadCommands,
    },
    /// List leads stuck in `running` past the staleness threshold.
    Stale(StaleArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    pub lead_id: String,
    /// Lead origin: inbound, event, import
    #[arg(long)]
    pub origin: Origin,
}

#[derive(Clone, Debug, Args)]
pub struct StaleArgs {
    #[arg(long)]
    pub origin: Origin,
    /// Override `store.stale_after_mins`
    #[arg(long)]
    pub minutes: Option<u64>,
}
