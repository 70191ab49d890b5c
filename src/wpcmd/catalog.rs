//! # Command Catalog
//!
//! The closed set of commands the dispatcher understands. [`CATALOG`] is the single
//! source of truth: recognition, activation, help output, and handler routing all
//! read it, so adding a command means adding one [`CommandKey`] variant, one
//! descriptor, and one handler.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CommandKey {
    Help,
    CoreVersion,
    OptionGet,
    OptionUpdate,
    PageCreate,
    PluginList,
    PluginActivate,
    PluginDeactivate,
    ThemeList,
    ThemeActivate,
    UserList,
    UserGet,
}

impl CommandKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKey::Help => "help",
            CommandKey::CoreVersion => "core version",
            CommandKey::OptionGet => "option get",
            CommandKey::OptionUpdate => "option update",
            CommandKey::PageCreate => "page create",
            CommandKey::PluginList => "plugin list",
            CommandKey::PluginActivate => "plugin activate",
            CommandKey::PluginDeactivate => "plugin deactivate",
            CommandKey::ThemeList => "theme list",
            CommandKey::ThemeActivate => "theme activate",
            CommandKey::UserList => "user list",
            CommandKey::UserGet => "user get",
        }
    }

    pub fn descriptor(&self) -> &'static CommandDescriptor {
        CATALOG
            .iter()
            .find(|d| d.key == *self)
            .unwrap_or_else(|| unreachable!("every CommandKey has a catalog entry"))
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .map(|d| d.key)
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

impl From<CommandKey> for String {
    fn from(key: CommandKey) -> Self {
        key.as_str().to_string()
    }
}

impl TryFrom<String> for CommandKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How the text after `group action` is turned into arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// Takes nothing.
    Nothing,
    /// `--name[=value]` options only.
    Named,
    /// The whole remainder is one identifier (it may contain spaces).
    Single,
    /// Whitespace-separated words.
    Words,
    /// A first word, then everything after it as a raw value.
    NameValue,
}

#[derive(Debug)]
pub struct CommandDescriptor {
    pub key: CommandKey,
    pub description: &'static str,
    pub args: ArgShape,
}

impl CommandDescriptor {
    /// `(group, action)` for two-word keys, `None` for `help`.
    pub fn group_action(&self) -> Option<(&'static str, &'static str)> {
        self.key.as_str().split_once(' ')
    }
}

pub static CATALOG: &[CommandDescriptor] = &[
    CommandDescriptor {
        key: CommandKey::Help,
        description: "Show this help message and the list of available commands.",
        args: ArgShape::Nothing,
    },
    CommandDescriptor {
        key: CommandKey::CoreVersion,
        description: "Show the WordPress version. Add --extra for database revision, locale and URLs.",
        args: ArgShape::Named,
    },
    CommandDescriptor {
        key: CommandKey::OptionGet,
        description: "Show the value of a site option. Usage: option get <option_name>",
        args: ArgShape::Words,
    },
    CommandDescriptor {
        key: CommandKey::OptionUpdate,
        description: "Set a site option. Usage: option update <option_name> <value>",
        args: ArgShape::NameValue,
    },
    CommandDescriptor {
        key: CommandKey::PageCreate,
        description: "Create a page. Usage: page create --title=\"...\" [--content=...] [--status=...] [--author=...] [--date=...] [--slug=...]",
        args: ArgShape::Named,
    },
    CommandDescriptor {
        key: CommandKey::PluginList,
        description: "List installed plugins. Filter with --status=active|inactive.",
        args: ArgShape::Named,
    },
    CommandDescriptor {
        key: CommandKey::PluginActivate,
        description: "Activate a plugin. Usage: plugin activate <plugin-file>",
        args: ArgShape::Single,
    },
    CommandDescriptor {
        key: CommandKey::PluginDeactivate,
        description: "Deactivate a plugin. Usage: plugin deactivate <plugin-file>",
        args: ArgShape::Single,
    },
    CommandDescriptor {
        key: CommandKey::ThemeList,
        description: "List installed themes. Filter with --status=active|inactive.",
        args: ArgShape::Named,
    },
    CommandDescriptor {
        key: CommandKey::ThemeActivate,
        description: "Switch to another theme. Usage: theme activate <stylesheet>",
        args: ArgShape::Single,
    },
    CommandDescriptor {
        key: CommandKey::UserList,
        description: "List users. Options: --role, --number, --orderby, --order, --search.",
        args: ArgShape::Named,
    },
    CommandDescriptor {
        key: CommandKey::UserGet,
        description: "Show a user by ID, login, slug or email. Usage: user get <identifier>",
        args: ArgShape::Single,
    },
];

static BY_GROUP_ACTION: Lazy<HashMap<(&'static str, &'static str), CommandKey>> =
    Lazy::new(|| {
        CATALOG
            .iter()
            .filter_map(|d| d.group_action().map(|ga| (ga, d.key)))
            .collect()
    });

/// Look up a command by its lower-cased group and action words.
pub fn lookup(group: &str, action: &str) -> Option<CommandKey> {
    BY_GROUP_ACTION.get(&(group, action)).copied()
}

pub fn keys() -> impl Iterator<Item = CommandKey> {
    CATALOG.iter().map(|d| d.key)
}
