use crate::args::ParsedArguments;
use crate::catalog::CommandKey;
use crate::error::Result;
use crate::store::SiteBackend;
use std::fmt;

pub mod core;
pub mod help;
pub mod option;
pub mod page;
pub mod plugin;
pub mod theme;
pub mod user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Notice,
    Error,
}

impl MessageLevel {
    /// The prefix used when the message is rendered as plain text.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            MessageLevel::Info => None,
            MessageLevel::Success => Some("Success"),
            MessageLevel::Notice => Some("Notice"),
            MessageLevel::Error => Some("Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn notice(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Notice,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }

    /// `Error: ...`, `Notice: ...`, `Success: ...`, or the bare content for info.
    pub fn to_text(&self) -> String {
        match self.level.prefix() {
            Some(prefix) => format!("{}: {}", prefix, self.content),
            None => self.content.clone(),
        }
    }
}

impl fmt::Display for CmdMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

pub type Handler<B> = fn(&mut B, &ParsedArguments) -> Result<CmdMessage>;

/// The handler for a catalog key. The match is exhaustive, so a key cannot exist
/// without one.
pub fn handler_for<B: SiteBackend>(key: CommandKey) -> Handler<B> {
    match key {
        CommandKey::Help => help::run,
        CommandKey::CoreVersion => core::version,
        CommandKey::OptionGet => option::get,
        CommandKey::OptionUpdate => option::update,
        CommandKey::PageCreate => page::create,
        CommandKey::PluginList => plugin::list,
        CommandKey::PluginActivate => plugin::activate,
        CommandKey::PluginDeactivate => plugin::deactivate,
        CommandKey::ThemeList => theme::list,
        CommandKey::ThemeActivate => theme::activate,
        CommandKey::UserList => user::list,
        CommandKey::UserGet => user::get,
    }
}

/// Status filter shared by the plugin and theme listings. Only `active` and
/// `inactive` filter; any other value lists everything.
pub(crate) fn requested_status(args: &ParsedArguments) -> Option<String> {
    args.text("status")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

pub(crate) fn status_passes(requested: Option<&str>, active: bool) -> bool {
    match requested {
        Some("active") => active,
        Some("inactive") => !active,
        _ => true,
    }
}

pub(crate) fn no_match_message(kind: &str, requested: Option<&str>) -> String {
    match requested {
        Some(status) => format!("No {} found matching criteria (status: {}).", kind, status),
        None => format!("No {} found matching criteria.", kind),
    }
}

pub(crate) fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Join listing blocks, each followed by a `---` separator line.
pub(crate) fn render_blocks(blocks: &[Vec<String>]) -> String {
    blocks
        .iter()
        .map(|lines| format!("{}\n---", lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::store::memory::fixtures::SiteFixture;
    use crate::store::memory::InMemorySite;

    #[test]
    fn prefixes_render_at_the_boundary() {
        assert_eq!(CmdMessage::error("boom").to_text(), "Error: boom");
        assert_eq!(CmdMessage::notice("hm").to_text(), "Notice: hm");
        assert_eq!(CmdMessage::success("yay").to_text(), "Success: yay");
        assert_eq!(CmdMessage::info("plain").to_text(), "plain");
    }

    #[test]
    fn every_key_has_a_handler() {
        let mut site = SiteFixture::new().build();
        for key in catalog::keys() {
            let handler: Handler<InMemorySite> = handler_for(key);
            // Each handler copes with empty arguments without failing hard.
            assert!(handler(&mut site, &ParsedArguments::default()).is_ok(), "{}", key);
        }
    }

    #[test]
    fn blocks_end_with_separator() {
        let blocks = vec![
            vec!["Name: A".to_string()],
            vec!["Name: B".to_string(), "Status: Active".to_string()],
        ];
        assert_eq!(
            render_blocks(&blocks),
            "Name: A\n---\nName: B\nStatus: Active\n---"
        );
    }
}
