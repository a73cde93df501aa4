pub mod check;
pub mod config;
pub mod export;
pub mod init;
pub mod new;
pub mod pause;
pub mod print;
pub mod report;
pub mod reset;
pub mod session;

use crate::Context;
use crate::core::resolve::resolve_client;
use crate::errors::AppResult;
use crate::models::client::{Client, ClientRegistry};

/// Resolve the client of this invocation and announce it, then run `f`.
pub(crate) fn with_client<F>(ctx: &Context, f: F) -> AppResult<()>
where
    F: FnOnce(&Client) -> AppResult<()>,
{
    resolved(ctx, true, f)
}

/// Like `with_client`, for output that must stay machine-readable.
pub(crate) fn with_client_quiet<F>(ctx: &Context, f: F) -> AppResult<()>
where
    F: FnOnce(&Client) -> AppResult<()>,
{
    resolved(ctx, false, f)
}

fn resolved<F>(ctx: &Context, announce: bool, f: F) -> AppResult<()>
where
    F: FnOnce(&Client) -> AppResult<()>,
{
    let registry: ClientRegistry = ctx.cfg.registry()?;
    let client = resolve_client(ctx.client.as_deref(), &ctx.cfg, &registry)?;
    if announce {
        println!("Client: {}", client.name);
    }
    f(client)
}
