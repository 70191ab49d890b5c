use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "wpcmd", bin_name = "wpcmd", version = get_version())]
#[command(about = "Run site administration commands from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site directory holding site.json and settings.json
    #[arg(long, global = true, env = "WPCMD_HOME", value_name = "DIR", help_heading = "Options")]
    pub site: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one command, e.g. `wpcmd run option get siteurl`
    #[command(display_order = 1)]
    Run {
        /// Command words (joined with spaces)
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        words: Vec<String>,
    },

    /// Read commands from stdin, one per line
    #[command(display_order = 2)]
    Shell,

    /// List commands and whether each one is active
    #[command(name = "commands", alias = "ls", display_order = 3)]
    List,

    /// Allow a command to run
    #[command(display_order = 4)]
    Enable {
        /// Command key, e.g. `plugin activate`
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },

    /// Block a command from running
    #[command(display_order = 5)]
    Disable {
        /// Command key, e.g. `plugin activate`
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },

    /// Get or set configuration
    #[command(display_order = 6)]
    Config {
        /// Configuration key (enable-toggle, keyboard-shortcut)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create a demo site if none exists
    #[command(display_order = 7)]
    Init,
}
