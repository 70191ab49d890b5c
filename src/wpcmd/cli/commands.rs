//! # CLI Layer
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the site directory and builds the dispatcher
//! - `handle_*()`: One handler per subcommand
//!
//! Handlers return `Ok(false)` when the outcome should end the process with a
//! non-zero status but nothing went wrong while reading or writing the site.

use super::print::{print_commands, print_error, print_message, print_setting};
use super::setup::{Cli, Commands};
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wpcmd::api::{DispatchResult, Dispatcher};
use wpcmd::catalog::CommandKey;
use wpcmd::config::{Settings, SettingsFile};
use wpcmd::error::{Result, WpcmdError};
use wpcmd::store::fs::FileSite;

const PROMPT: &str = "wp> ";

struct AppContext {
    dispatcher: Dispatcher<FileSite, SettingsFile>,
}

pub fn run() -> Result<bool> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Run { words } => handle_run(&mut ctx, &words.join(" ")),
        Commands::Shell => handle_shell(&mut ctx),
        Commands::List => handle_list(&ctx),
        Commands::Enable { key } => handle_toggle(&ctx, &key.join(" "), true),
        Commands::Disable { key } => handle_toggle(&ctx, &key.join(" "), false),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Init => handle_init(&ctx),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = site_dir(cli.site.clone())?;
    tracing::debug!(site = %root.display(), "Using site directory");

    let site = FileSite::new(root.clone());
    let settings = SettingsFile::new(root);
    Ok(AppContext {
        dispatcher: Dispatcher::new(site, settings),
    })
}

fn site_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    directories::ProjectDirs::from("org", "wpcmd", "wpcmd")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            WpcmdError::Config(
                "Could not determine a site directory; pass --site or set WPCMD_HOME".to_string(),
            )
        })
}

fn handle_run(ctx: &mut AppContext, line: &str) -> Result<bool> {
    let message = ctx.dispatcher.execute(line)?;
    print_message(&message);
    Ok(DispatchResult::from(&message).ok)
}

/// Dispatch each stdin line. The exit status reflects the last command run.
fn handle_shell(ctx: &mut AppContext) -> Result<bool> {
    let interactive = std::io::stdin().is_terminal();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut ok = true;

    loop {
        if interactive {
            print!("{}", PROMPT);
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }
        ok = handle_run(ctx, trimmed)?;
    }

    tracing::info!(handled = ctx.dispatcher.handled(), "Shell finished");
    Ok(ok)
}

fn handle_list(ctx: &AppContext) -> Result<bool> {
    let settings = ctx.dispatcher.activation().load()?;
    print_commands(&settings.activation().effective());
    Ok(true)
}

fn handle_toggle(ctx: &AppContext, key: &str, active: bool) -> Result<bool> {
    let key: CommandKey = key.parse().map_err(WpcmdError::Config)?;
    ctx.dispatcher
        .activation()
        .update(|settings| settings.set_command_active(key, active))?;

    tracing::info!(command = %key, active, "Command activation saved");
    let state = if active { "activated" } else { "deactivated" };
    println!("Command '{}' {}.", key, state);
    Ok(true)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<bool> {
    let source = ctx.dispatcher.activation();
    let mut settings = source.load()?;

    let Some(key) = key else {
        for name in Settings::keys() {
            if let Some(current) = settings.get(name) {
                print_setting(name, &current);
            }
        }
        return Ok(true);
    };

    match value {
        None => match settings.get(&key) {
            Some(current) => {
                print_setting(&key, &current);
                Ok(true)
            }
            None => {
                print_error(&format!("Unknown config key: {}", key));
                Ok(false)
            }
        },
        Some(value) => match settings.set(&key, &value) {
            Ok(()) => {
                source.save(&settings)?;
                if let Some(current) = settings.get(&key) {
                    print_setting(&key, &current);
                }
                Ok(true)
            }
            Err(reason) => {
                print_error(&reason);
                Ok(false)
            }
        },
    }
}

fn handle_init(ctx: &AppContext) -> Result<bool> {
    let site = ctx.dispatcher.site();
    if site.init()? {
        println!("Created site at {}", site.site_path().display());
    } else {
        println!("Site already exists at {}", site.site_path().display());
    }
    Ok(true)
}
