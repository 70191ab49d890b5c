//! # Wpcmd CLI
//!
//! The binary is intentionally thin: everything lives in `cli/`, and this file only
//! calls `cli::run()` and turns its outcome into an exit status.
//!
//! - `cli/setup.rs`: clap definitions and the version string
//! - `cli/commands.rs`: context wiring and one handler per subcommand
//! - `cli/print.rs`: terminal output
//!
//! A dispatched command whose result is an error exits with status 1, as does any
//! failure to read the site or its settings.

mod cli;

fn main() {
    match cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
