//! Developer CLI for PanelKit: validate and inspect app configs, and an
//! interactive shell for exercising the store and page runtime.

mod shell;

use clap::{Parser, Subcommand};
use panelkit::prelude::*;
use panelkit_schema::{load_from_path, validate};
use std::{path::PathBuf, process::ExitCode};

///
/// Cli
///

#[derive(Parser)]
#[command(name = "panelkit", about = "PanelKit developer tools", version)]
struct Cli {
    /// Path to the app config JSON document.
    #[arg(long, env = "PANELKIT_CONFIG", default_value = "app.config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

///
/// Command
///

#[derive(Subcommand)]
enum Command {
    /// Parse the config and report structural issues.
    Validate,
    /// Summarize the app: resources, pages, roles, seed counts.
    Inspect,
    /// Interactive shell against the in-memory store.
    Shell {
        /// Session role used for permission checks and page access.
        #[arg(long)]
        role: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_from_path(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Validate => {
            let issues = validate(&config);
            if issues.is_empty() {
                println!("ok: {} parses clean", cli.config.display());
                return ExitCode::SUCCESS;
            }

            for issue in &issues {
                println!("{issue}");
            }
            println!("{} issue(s)", issues.len());
            ExitCode::FAILURE
        }
        Command::Inspect => {
            inspect(&config);
            ExitCode::SUCCESS
        }
        Command::Shell { role } => {
            let runtime = match Runtime::new(config) {
                Ok(runtime) => runtime,
                Err(err) => {
                    eprintln!("cannot seed store: {err}");
                    return ExitCode::FAILURE;
                }
            };

            match shell::run(runtime, role) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("shell error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn inspect(config: &AppConfig) {
    println!(
        "{} v{}",
        if config.app.name.is_empty() {
            "(unnamed app)"
        } else {
            &config.app.name
        },
        config.app.version
    );
    if let Some(description) = &config.app.description {
        println!("  {description}");
    }

    println!("roles: {}", config.auth.roles.join(", "));

    println!("resources:");
    for (name, resource) in &config.resources {
        println!(
            "  {name}: {} field(s), {} seed record(s)",
            resource.fields.len(),
            resource.data.len()
        );
    }

    println!("pages:");
    for page in &config.pages {
        let components: usize = page.zones.iter().map(|zone| zone.components.len()).sum();
        println!(
            "  {} ({}): {} zone(s), {components} component(s)",
            page.title, page.path,
            page.zones.len()
        );
    }
}
