use crate::Context;
use crate::cli::commands::{with_client, with_client_quiet};
use crate::cli::parser::Commands;
use crate::core::report::{ClientReport, Report, ReportLogic, Share};
use crate::errors::AppResult;
use crate::models::client::Client;
use crate::ui::messages::{header, warning};
use crate::utils::formatting::{bold, hours_and_minutes, money};
use crate::utils::table::{Column, Table};
use crate::utils::time::DAY_FORMAT;

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Report { all, json } = cmd {
        let logic = ReportLogic::new(&ctx.cfg, ctx.financial_dir.clone(), ctx.clock());

        if *all {
            let registry = ctx.cfg.registry()?;
            let report = logic.build(registry.iter());
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        } else {
            let show = |client: &Client| -> AppResult<()> {
                let report = logic.client_report(client)?;
                if *json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_client(&report);
                }
                Ok(())
            };
            if *json {
                with_client_quiet(ctx, show)?;
            } else {
                with_client(ctx, show)?;
            }
        }
    }
    Ok(())
}

fn share_table(what: &str, shares: &[Share], symbol: &str) -> Table {
    let mut table = Table::new(vec![
        Column::new(what),
        Column::new("Minutes").right(),
        Column::new("%").right(),
        Column::new("Hours").right(),
        Column::new("Billing").right(),
    ]);
    for s in shares {
        table.add_row(vec![
            s.name.clone(),
            format!("{:.1}", s.minutes),
            format!("{:.1}", s.percent),
            format!("{:.2}", s.hours),
            money(symbol, s.billing),
        ]);
    }
    table
}

fn print_client(r: &ClientReport) {
    let symbol = r.currency_symbol.as_str();

    header(&r.client);
    println!(
        "Total: {} minutes ({})",
        r.total_minutes,
        hours_and_minutes(r.total_minutes)
    );

    println!("\n{}", bold(&r.title));
    print!("{}", share_table("Label", &r.labels, symbol).render());
    println!();
    print!("{}", share_table("Project", &r.projects, symbol).render());

    println!();
    if symbol == "€" {
        println!("Billing: {}", money(symbol, r.billing));
    } else {
        println!(
            "Billing: {} ({})",
            money(symbol, r.billing),
            money("€", r.billing_eur)
        );
    }

    println!(
        "Today: {} minutes, yesterday: {} minutes",
        r.daily.today, r.daily.yesterday
    );
    if let Some(first) = r.daily.first_day {
        println!(
            "Worked on {} day(s) since {}",
            r.daily.days_worked,
            first.format(DAY_FORMAT)
        );
    }
    println!("History ledgers: {}", r.history_files);

    match (r.days_past_due, r.expected_payout) {
        (Some(days), Some(payout)) => println!(
            "Expected payout: {} ({} days past due)",
            money(symbol, payout),
            days
        ),
        _ => println!("Expected payout: no payments yet"),
    }
}

fn print_report(report: &Report) {
    for r in &report.clients {
        print_client(r);
        println!();
    }

    for (client, reason) in &report.failures {
        warning(format!("{client}: {reason}"));
    }

    for (symbol, rate) in &report.conversions_used {
        println!("Conversion used: 1{symbol} = {rate}€");
    }

    match (report.total_eur, report.total_expected_payout_eur) {
        (Some(total), Some(payout)) => {
            println!("{}", bold(&format!("Total billing: {}", money("€", total))));
            println!("Total expected payout: {}", money("€", payout));
        }
        _ => warning("Totals skipped: not every client could be read."),
    }
}
