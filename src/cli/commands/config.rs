use crate::Context;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::money;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = &ctx.config_path;

        if !(*print_config || *check || *edit_config) {
            info(format!("Configuration file: {}", path.display()));
            info("Use --print, --check or --edit.");
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(&ctx.cfg)?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let registry = ctx.cfg.check()?;
            for client in registry.iter() {
                println!(
                    "{:<20} {}/h  lang {}  due day {}",
                    client.name,
                    money(&client.currency_symbol, client.hourly_wage),
                    client.language.code(),
                    client.due_day
                );
            }
            if let Some(default) = &ctx.cfg.default_client {
                println!("Default client: {default}");
            }
            success(format!(
                "Configuration is valid ({} client(s)).",
                registry.names().len()
            ));
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });
            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            let mut edited = run_editor(&editor_to_use, path);
            if !edited && editor_to_use != default_editor {
                warning(format!(
                    "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                ));
                edited = run_editor(&default_editor, path);
            }

            if edited {
                success(format!("Configuration file {} edited.", path.display()));
            } else {
                warning(format!("Could not edit {}", path.display()));
            }
        }
    }

    Ok(())
}

fn run_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
