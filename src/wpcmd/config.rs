use crate::activation::{ActivationSource, ActivationState};
use crate::catalog::CommandKey;
use crate::error::{Result, WpcmdError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";
const DEFAULT_SHORTCUT: &str = "ctrl+i";
const MODIFIERS: &[&str] = &["ctrl", "alt", "shift"];

/// Site settings, stored in `<site>/settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// `None` until an administrator first saves the command list.
    #[serde(default)]
    pub active_commands: Option<BTreeMap<String, bool>>,

    /// Whether the command-line toggle button is shown.
    #[serde(default = "default_enable_toggle")]
    pub enable_toggle: bool,

    #[serde(default = "default_shortcut")]
    pub keyboard_shortcut: String,
}

fn default_enable_toggle() -> bool {
    true
}

fn default_shortcut() -> String {
    DEFAULT_SHORTCUT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active_commands: None,
            enable_toggle: default_enable_toggle(),
            keyboard_shortcut: default_shortcut(),
        }
    }
}

impl Settings {
    /// Load settings from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(SETTINGS_FILENAME);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(WpcmdError::Io)?;
        let settings: Settings = serde_json::from_str(&content).map_err(WpcmdError::Serialization)?;
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(WpcmdError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(WpcmdError::Serialization)?;
        fs::write(dir.join(SETTINGS_FILENAME), content).map_err(WpcmdError::Io)?;
        Ok(())
    }

    pub fn activation(&self) -> ActivationState {
        ActivationState::from(self.active_commands.clone())
    }

    /// Switch one command on or off. The saved map always ends up covering the
    /// whole catalog.
    pub fn set_command_active(&mut self, key: CommandKey, active: bool) {
        self.active_commands = self.activation().with_command(key, active).into_option();
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "enable-toggle" => Some(self.enable_toggle.to_string()),
            "keyboard-shortcut" => Some(self.keyboard_shortcut.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "enable-toggle" => {
                self.enable_toggle = parse_bool(value)
                    .ok_or_else(|| format!("Invalid value for enable-toggle: {}", value))?;
                Ok(())
            }
            "keyboard-shortcut" => {
                self.keyboard_shortcut = normalize_shortcut(value)?;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["enable-toggle", "keyboard-shortcut"]
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validate a shortcut like `ctrl+shift+k` and return it lowercased.
pub fn normalize_shortcut(raw: &str) -> std::result::Result<String, String> {
    let shortcut = raw.trim().to_lowercase();
    let parts: Vec<&str> = shortcut.split('+').map(str::trim).collect();
    let Some((key, modifiers)) = parts.split_last() else {
        return Err("Shortcut cannot be empty".to_string());
    };

    let mut seen = Vec::new();
    for modifier in modifiers {
        if !MODIFIERS.contains(modifier) {
            return Err(format!(
                "Unknown modifier '{}' (use ctrl, alt or shift)",
                modifier
            ));
        }
        if seen.contains(modifier) {
            return Err(format!("Modifier '{}' is repeated", modifier));
        }
        seen.push(*modifier);
    }

    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        _ => {
            return Err(format!(
                "Shortcut must end in a single letter or digit, got '{}'",
                key
            ))
        }
    }

    Ok(parts.join("+"))
}

/// Reads the activation state from `settings.json` on every call.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    dir: PathBuf,
}

impl SettingsFile {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn load(&self) -> Result<Settings> {
        Settings::load(&self.dir)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.save(&self.dir)
    }

    /// Load, apply `f`, and save.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut settings = self.load()?;
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

impl ActivationSource for SettingsFile {
    fn activation_state(&self) -> Result<ActivationState> {
        Ok(self.load()?.activation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.active_commands, None);
        assert!(settings.enable_toggle);
        assert_eq!(settings.keyboard_shortcut, "ctrl+i");
        assert_eq!(settings.activation(), ActivationState::Unset);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join("missing")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.set_command_active(CommandKey::ThemeActivate, false);
        settings.set("keyboard-shortcut", "Alt+Shift+K").unwrap();
        settings.save(dir.path()).unwrap();

        let loaded = Settings::load(dir.path()).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.keyboard_shortcut, "alt+shift+k");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{"active_commands": {"help": true}}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert!(settings.enable_toggle);
        assert!(settings.activation().is_active(CommandKey::Help));
        assert!(!settings.activation().is_active(CommandKey::UserGet));
    }

    #[test]
    fn setting_one_command_writes_every_key() {
        let mut settings = Settings::default();
        settings.set_command_active(CommandKey::UserList, false);
        let map = settings.active_commands.as_ref().unwrap();
        assert_eq!(map.len(), catalog::CATALOG.len());
        assert_eq!(map.get("user list"), Some(&false));
        assert_eq!(map.get("user get"), Some(&true));
    }

    #[test]
    fn get_and_set_by_name() {
        let mut settings = Settings::default();
        settings.set("enable-toggle", "off").unwrap();
        assert_eq!(settings.get("enable-toggle").as_deref(), Some("false"));
        assert!(settings.set("enable-toggle", "maybe").is_err());
        assert!(settings.set("colour", "red").is_err());
        assert_eq!(settings.get("colour"), None);
    }

    #[test]
    fn shortcut_validation() {
        assert_eq!(normalize_shortcut("ctrl+i").unwrap(), "ctrl+i");
        assert_eq!(normalize_shortcut(" CTRL + 7 ").unwrap(), "ctrl+7");
        assert_eq!(normalize_shortcut("k").unwrap(), "k");
        assert!(normalize_shortcut("").is_err());
        assert!(normalize_shortcut("ctrl+").is_err());
        assert!(normalize_shortcut("ctrl+ctrl+i").is_err());
        assert!(normalize_shortcut("meta+i").is_err());
        assert!(normalize_shortcut("ctrl+enter").is_err());
    }

    #[test]
    fn settings_file_rereads_between_calls() {
        let dir = TempDir::new().unwrap();
        let source = SettingsFile::new(dir.path().to_path_buf());
        assert_eq!(source.activation_state().unwrap(), ActivationState::Unset);

        source
            .update(|s| s.set_command_active(CommandKey::OptionUpdate, false))
            .unwrap();
        let state = source.activation_state().unwrap();
        assert!(!state.is_active(CommandKey::OptionUpdate));
        assert!(state.is_active(CommandKey::OptionGet));
    }
}
