use crate::Context;
use crate::cli::commands::with_client;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::models::ledger::Ledger;
use crate::models::tags::{DEFAULT_TAG, TagSet};
use crate::utils::colors::{colorize_optional, colorize_start_end, colorize_tags, paint_state};
use crate::utils::mins2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_timestamp;

const DESCRIPTION_WIDTH: usize = 40;

/// Handle `print`: the ledger as a table, then the session state.
pub fn handle(ctx: &Context) -> AppResult<()> {
    with_client(ctx, |client| {
        let logic = SessionLogic::new(client, &ctx.financial_dir, ctx.clock());
        let (ledger, state) = logic.snapshot()?;

        println!("{}", logic.ledger_path().display());
        if ledger.is_empty() {
            println!("No sessions recorded.");
        } else {
            print!("{}", ledger_table(&ledger).render());
            println!(
                "\nTotal: {} minutes ({})",
                ledger.total_minutes(),
                mins2readable(ledger.total_minutes(), false, false)
            );
        }
        println!("State: {}", paint_state(state));
        Ok(())
    })
}

fn tags_cell(tags: &TagSet) -> String {
    tags.iter()
        .map(|t| colorize_tags(t, DEFAULT_TAG))
        .collect::<Vec<_>>()
        .join(",")
}

fn ledger_table(ledger: &Ledger) -> Table {
    let mut table = Table::new(vec![
        Column::new("#").right(),
        Column::new("Starting time"),
        Column::new("Labels"),
        Column::new("Projects"),
        Column::new("Description").wrap(DESCRIPTION_WIDTH),
        Column::new("Ending time"),
        Column::new("Minutes").right(),
    ]);

    for (idx, r) in ledger.records.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            colorize_start_end(&format_timestamp(&r.start), true),
            tags_cell(&r.labels),
            tags_cell(&r.projects),
            r.description.clone(),
            colorize_start_end(&r.end.as_ref().map(format_timestamp).unwrap_or_default(), false),
            colorize_optional(&r.minutes.map(|m| m.to_string()).unwrap_or_default()),
        ]);
    }
    table
}
