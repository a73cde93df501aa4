//! Formatting utilities used for CLI and report outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // e.g. +02:25 or -01:10
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // e.g. +02h 25m or -01h 10m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Money amounts are truncated, never rounded, to two decimals.
pub fn truncate_amount(amount: f64) -> String {
    let truncated = (amount * 100.0).trunc() / 100.0;
    format!("{:.2}", truncated)
}

/// `€12.50`: symbol first, as on invoices.
pub fn money(symbol: &str, amount: f64) -> String {
    format!("{}{}", symbol, truncate_amount(amount))
}

/// "N hours and M minutes" for report totals.
pub fn hours_and_minutes(mins: i64) -> String {
    format!("{} hours and {} minutes", mins / 60, mins % 60)
}
