use anyhow::anyhow;
use chrono::TimeDelta;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StaleArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StaleLeads {
    origin: om_core::enums::Origin,
    older_than_mins: u64,
    lead_ids: Vec<String>,
}

/// Handle `orgmatch stale`.
pub async fn handle(args: &StaleArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let minutes = args.minutes.unwrap_or(ctx.config.store.stale_after_mins);
    let older_than = stale_window(minutes)?;

    let lead_ids = ctx.store.list_stale_running(args.origin, older_than).await?;
    output(
        &StaleLeads {
            origin: args.origin,
            older_than_mins: minutes,
            lead_ids,
        },
        flags.format,
    )
}

fn stale_window(minutes: u64) -> anyhow::Result<TimeDelta> {
    i64::try_from(minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .ok_or_else(|| anyhow!("--minutes {minutes} is out of range"))
}
