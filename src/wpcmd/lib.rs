//! # Wpcmd Architecture
//!
//! Wpcmd runs site administration commands typed as plain text lines, such as
//! `plugin activate akismet/akismet.php` or `option get siteurl`. It is a library
//! first: the CLI in `cli/` is one client, and anything that can hand over a line of
//! text and show a line of text back can be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Dispatcher: blank check → recognize → activation gate    │
//! │  - Builds arguments per command and routes to a handler     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One handler per catalog key                              │
//! │  - Returns a tagged CmdMessage, never prefixed strings      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Site Layer (store/)                                        │
//! │  - SiteBackend trait                                        │
//! │  - FileSite (production), InMemorySite (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Results Are Text With a Level
//!
//! Every dispatch ends in exactly one [`commands::CmdMessage`]. The level decides
//! the rendered prefix (`Error:`, `Notice:`, `Success:` or none) and whether the
//! call counts as a failure. Only `Error` fails: a notice such as "already active"
//! is a successful call.
//!
//! ## Activation
//!
//! Administrators can switch commands off ([`activation`]). The dispatcher reads
//! the state through an [`activation::ActivationSource`] on every call and rejects
//! inactive commands before any handler runs.
//!
//! ## Module Overview
//!
//! - [`api`]: The dispatcher facade
//! - [`catalog`]: The closed set of commands
//! - [`recognize`]: Raw text to catalog key
//! - [`args`]: `--name=value` parsing and per-command argument shapes
//! - [`activation`]: Which commands may run
//! - [`commands`]: Handlers and the tagged message type
//! - [`store`]: Site backend abstraction and implementations
//! - [`model`]: Site entities (users, pages, plugins, themes)
//! - [`config`]: Settings persisted next to the site
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod activation;
pub mod api;
pub mod args;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod recognize;
pub mod store;
