use crate::Context;
use crate::cli::commands::with_client;
use crate::cli::parser::Commands;
use crate::core::session::{ResetOutcome, SessionLogic};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Reset { minutes } = cmd {
        with_client(ctx, |client| {
            let outcome = SessionLogic::new(client, &ctx.financial_dir, ctx.clock()).reset(*minutes)?;
            describe(&outcome);
            Ok(())
        })?;
    }
    Ok(())
}

pub(crate) fn describe(outcome: &ResetOutcome) {
    println!("{}", describe_line(outcome));
}

fn describe_line(outcome: &ResetOutcome) -> String {
    match *outcome {
        ResetOutcome::StartShifted { delta, .. } if delta >= 0 => format!(
            "Subtracted {delta} minutes from begin of current billable session (session extended)."
        ),
        ResetOutcome::StartShifted { delta, .. } => format!(
            "Added {} minutes to begin of current billable session (session shortened).",
            -delta
        ),
        ResetOutcome::EndShifted { delta, minutes, .. } if delta >= 0 => format!(
            "Added {delta} minutes to the end of last billable session (session extended to {minutes} minutes)."
        ),
        ResetOutcome::EndShifted { delta, minutes, .. } => format!(
            "Subtracted {} minutes from the end of last billable session (session shortened to {minutes} minutes).",
            -delta
        ),
    }
}
