//! billings library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;
use utils::time::{Clock, FixedClock, SystemClock, parse_timestamp};

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub cfg: Config,
    pub config_path: PathBuf,
    pub financial_dir: PathBuf,
    /// Client given with `-n`, if any.
    pub client: Option<String>,
    clock: Box<dyn Clock>,
}

impl Context {
    pub fn new(cfg: Config, config_path: PathBuf, client: Option<String>, clock: Box<dyn Clock>) -> Self {
        let financial_dir = cfg.financial_dir();
        Self {
            cfg,
            config_path,
            financial_dir,
            client,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &Context) -> AppResult<()> {
    use crate::cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(ctx),
        Commands::Config { .. } => commands::config::handle(&cli.command, ctx),
        Commands::New => commands::new::handle(ctx),
        Commands::Start { .. } | Commands::End { .. } => {
            commands::session::handle(&cli.command, ctx)
        }
        Commands::Pause | Commands::Unpause => commands::pause::handle(&cli.command, ctx),
        Commands::Reset { .. } => commands::reset::handle(&cli.command, ctx),
        Commands::Check => commands::check::handle(ctx),
        Commands::Print => commands::print::handle(ctx),
        Commands::Report { .. } => commands::report::handle(&cli.command, ctx),
        Commands::Export { .. } => commands::export::handle(&cli.command, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    utils::logging::enable_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_file);
    let mut cfg = Config::load(Some(&config_path))?;

    if let Some(dir) = &cli.dir {
        cfg.financial_dir = dir.to_string_lossy().to_string();
    }

    let clock: Box<dyn Clock> = match &cli.now {
        Some(ts) => Box::new(FixedClock(parse_timestamp(ts)?)),
        None => Box::new(SystemClock),
    };

    let ctx = Context::new(cfg, config_path, cli.client.clone(), clock);
    dispatch(&cli, &ctx)
}
