use clap::Subcommand;

use om_core::enums::Origin;

/// Lead commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LeadCommands {
    /// Insert a lead into its origin table.
    Add {
        #[arg(long)]
        origin: Origin,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Show the persisted resolution state of a lead.
    Show {
        lead_id: String,
        #[arg(long)]
        origin: Origin,
    },
}
