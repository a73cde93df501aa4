use crate::Context;
use crate::cli::commands::with_client;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle `check`: report closed records whose minutes are off.
pub fn handle(ctx: &Context) -> AppResult<()> {
    with_client(ctx, |client| {
        let report = SessionLogic::new(client, &ctx.financial_dir, ctx.clock()).check()?;

        for issue in &report.issues {
            println!("Problem found with record on line {}", issue.record_no);
            println!("Expected record minutes: {}", issue.expected);
            println!("Line values: {}", issue.line);
        }

        if report.is_healthy() {
            success(format!(
                "Got {} healthy lines out of {}.",
                report.records, report.records
            ));
        } else {
            let n = report.issues.len();
            warning(format!(
                "Counted {n} faulty line{} (out of {})",
                if n > 1 { "s" } else { "" },
                report.records
            ));
        }
        Ok(())
    })
}
