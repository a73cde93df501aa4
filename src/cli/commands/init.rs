use crate::Context;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{field, info, success};
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file with one example client
///  - the ledger directory
pub fn handle(ctx: &Context) -> AppResult<()> {
    println!("⚙️  Initializing billings…");

    let written = Config::init_all(Some(&ctx.config_path), Some(&ctx.financial_dir))?;
    // `--dir` may point somewhere else than the file does.
    fs::create_dir_all(&ctx.financial_dir)?;

    field("Config file", ctx.config_path.display());
    field("Ledgers", ctx.financial_dir.display());

    if written {
        success("Configuration file written. Add your clients to it.");
    } else {
        info("Configuration file already exists, left untouched.");
    }
    Ok(())
}
