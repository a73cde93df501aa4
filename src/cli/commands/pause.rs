use crate::Context;
use crate::cli::commands::with_client;
use crate::cli::parser::Commands;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::utils::time::format_timestamp;

/// Handle `pause` and `unpause`.
pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    with_client(ctx, |client| {
        let logic = SessionLogic::new(client, &ctx.financial_dir, ctx.clock());

        match cmd {
            Commands::Pause => {
                let at = logic.pause()?;
                println!("Session paused at: {}", format_timestamp(&at));
            }
            Commands::Unpause => {
                let unpaused = logic.unpause()?;
                println!(
                    "Unpausing session at {}. Minutes elapsed: {}",
                    format_timestamp(&unpaused.at),
                    unpaused.paused_minutes
                );
                super::reset::describe(&unpaused.reset);
            }
            _ => {}
        }
        Ok(())
    })
}
