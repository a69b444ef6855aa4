use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LeadCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct Created {
    lead_id: String,
}

/// Handle `orgmatch lead`.
pub async fn handle(action: &LeadCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        LeadCommands::Add {
            origin,
            email,
            company,
        } => {
            let lead_id = ctx
                .store
                .insert_lead(*origin, email.as_deref(), company.as_deref())
                .await?;
            output(&Created { lead_id }, flags.format)
        }
        LeadCommands::Show { lead_id, origin } => {
            let resolution = ctx.store.get_resolution(*origin, lead_id).await?;
            output(&resolution, flags.format)
        }
    }
}
