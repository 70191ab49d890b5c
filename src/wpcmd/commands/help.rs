use crate::args::ParsedArguments;
use crate::catalog::CATALOG;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::store::SiteBackend;

const HEADER: &str = "\
WP Command Line Interface
-------------------------
Run site administration commands directly against the site.
Type a command and hit enter. For commands that take arguments, include them after the command (e.g., 'option get siteurl').";

const FOOTER: &str =
    "For more details on command arguments and usage, please refer to the README.md file.";

/// Lists every catalog command, whether or not it is currently active.
pub fn run<B: SiteBackend>(_site: &mut B, _args: &ParsedArguments) -> Result<CmdMessage> {
    Ok(CmdMessage::info(render()))
}

pub fn render() -> String {
    let mut out = format!("{}\n\nAvailable commands:\n", HEADER);
    for descriptor in CATALOG {
        out.push_str(&format!("- {}: {}\n", descriptor.key, descriptor.description));
    }
    out.push('\n');
    out.push_str(FOOTER);
    out
}
