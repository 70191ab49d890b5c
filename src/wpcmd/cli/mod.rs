//! # CLI Behavior
//!
//! This is **one possible UI client** for wpcmd. It is the only place that knows
//! about terminal I/O, exit codes, and colours.
//!
//! ## Site Directory
//!
//! Every subcommand works on one site directory holding `site.json` and
//! `settings.json`. It is resolved in this order:
//!
//! 1. `--site <DIR>`
//! 2. `WPCMD_HOME`
//! 3. The platform data directory
//!
//! ## Running Commands
//!
//! - `wpcmd run plugin list --status=active` joins the words into one line and
//!   dispatches it.
//! - `wpcmd shell` dispatches each line read from stdin.
//!
//! Output is the dispatcher's text, unchanged. On a terminal it is coloured by level.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-subcommand handlers
//! - `print`: Output formatting
//! - `setup`: Argument parsing via clap

mod commands;
mod print;
pub mod setup;

pub use commands::run;
