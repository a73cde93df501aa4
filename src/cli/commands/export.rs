use crate::Context;
use crate::cli::commands::with_client;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        with_client(ctx, |client| {
            ExportLogic::export(client, &ctx.financial_dir, *format, file, *force)?;
            Ok(())
        })?;
    }
    Ok(())
}
