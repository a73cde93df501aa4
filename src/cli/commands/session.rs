use crate::Context;
use crate::cli::commands::with_client;
use crate::cli::parser::Commands;
use crate::core::session::{SessionInput, SessionLogic};
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::formatting::truncate_amount;
use crate::utils::time::format_timestamp;

/// Handle `start` and `end`.
pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    with_client(ctx, |client| {
        let logic = SessionLogic::new(client, &ctx.financial_dir, ctx.clock());

        match cmd {
            Commands::Start { session } => {
                let started = logic.start(&SessionInput::from(session))?;
                if started.removed_stale_marker {
                    warning(format!(
                        "Removed stale pause marker {}",
                        logic.marker().path().display()
                    ));
                }
                println!("Starting time: {}", format_timestamp(&started.record.start));
            }
            Commands::End { session } => {
                let ended = logic.end(&SessionInput::from(session))?;
                for w in &ended.warnings {
                    warning(w.message());
                }
                if let Some(end) = &ended.record.end {
                    println!("Ending time: {}", format_timestamp(end));
                }
                println!("Worked for {} minutes", ended.minutes);
                println!(
                    "Earned: {}{}",
                    truncate_amount(client.earnings(ended.minutes as f64)),
                    client.currency_symbol
                );
            }
            _ => {}
        }
        Ok(())
    })
}
