use crate::Context;
use crate::cli::commands::with_client;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;

/// Handle `new` / `NEW`: create a header-only ledger for the client.
pub fn handle(ctx: &Context) -> AppResult<()> {
    with_client(ctx, |client| {
        let logic = SessionLogic::new(client, &ctx.financial_dir, ctx.clock());
        let path = logic.create()?;
        println!("Initializing new file: {}", path.display());
        Ok(())
    })
}
