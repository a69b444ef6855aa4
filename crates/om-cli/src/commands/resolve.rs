use anyhow::Context;
use tokio_util::sync::CancellationToken;

use om_resolve::Resolver;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `orgmatch resolve`. Ctrl-C cancels the in-flight resolution.
pub async fn handle(args: &ResolveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.config.require_directory()?;
    let resolver =
        Resolver::from_config(&ctx.config).context("failed to build directory client")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling resolution");
            on_interrupt.cancel();
        }
    });

    let outcome = resolver
        .resolve_lead(&ctx.store, args.origin, &args.lead_id, &cancel)
        .await;
    watcher.abort();

    output(&outcome, flags.format)
}
