use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Resolve(args) => commands::resolve::handle(&args, ctx, flags).await,
        Commands::Lead { action } => commands::lead::handle(&action, ctx, flags).await,
        Commands::Stale(args) => commands::stale::handle(&args, ctx, flags).await,
    }
}
