use crate::args::ParsedArguments;
use crate::commands::{
    no_match_message, render_blocks, requested_status, status_label, status_passes, CmdMessage,
};
use crate::error::{Result, WpcmdError};
use crate::store::SiteBackend;

pub fn list<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let plugins = site.plugins()?;
    if plugins.is_empty() {
        return Ok(CmdMessage::info("No plugins installed."));
    }

    let requested = requested_status(args);
    let mut blocks = Vec::new();
    for plugin in plugins {
        let active = site.is_plugin_active(&plugin.file)?;
        if !status_passes(requested.as_deref(), active) {
            continue;
        }
        blocks.push(vec![
            format!("Name: {}", plugin.name),
            format!("Status: {}", status_label(active)),
            format!("Version: {}", plugin.version),
            format!("Plugin File: {}", plugin.file),
        ]);
    }

    if blocks.is_empty() {
        return Ok(CmdMessage::info(no_match_message(
            "plugins",
            requested.as_deref(),
        )));
    }
    Ok(CmdMessage::info(render_blocks(&blocks)))
}

pub fn activate<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let file = match args.positional(0).map(str::trim) {
        Some(file) if !file.is_empty() => file,
        _ => {
            return Ok(CmdMessage::error(
                "Plugin slug/file (e.g., 'akismet/akismet.php') required for activation.",
            ))
        }
    };

    if site.is_plugin_active(file)? {
        return Ok(CmdMessage::notice(format!(
            "Plugin '{}' is already active.",
            file
        )));
    }

    match site.activate_plugin(file) {
        Ok(()) => {}
        Err(WpcmdError::Backend(reason)) => {
            return Ok(CmdMessage::error(format!(
                "Failed to activate plugin '{}'. {}",
                file, reason
            )))
        }
        Err(e) => return Err(e),
    }

    if site.is_plugin_active(file)? {
        tracing::info!(plugin = file, "plugin activated");
        Ok(CmdMessage::success(format!("Plugin '{}' activated.", file)))
    } else {
        Ok(CmdMessage::error(format!(
            "Failed to activate plugin '{}'. The plugin did not activate as expected.",
            file
        )))
    }
}

pub fn deactivate<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let file = match args.positional(0).map(str::trim) {
        Some(file) if !file.is_empty() => file,
        _ => {
            return Ok(CmdMessage::error(
                "Plugin slug/file (e.g., 'akismet/akismet.php') required for deactivation.",
            ))
        }
    };

    if !site.is_plugin_active(file)? {
        return Ok(CmdMessage::notice(format!(
            "Plugin '{}' was already inactive.",
            file
        )));
    }

    match site.deactivate_plugin(file) {
        Ok(()) => {}
        Err(WpcmdError::Backend(reason)) => {
            return Ok(CmdMessage::error(format!(
                "Failed to deactivate plugin '{}'. {}",
                file, reason
            )))
        }
        Err(e) => return Err(e),
    }

    if site.is_plugin_active(file)? {
        Ok(CmdMessage::error(format!(
            "Failed to deactivate plugin '{}'. The plugin might still be active.",
            file
        )))
    } else {
        tracing::info!(plugin = file, "plugin deactivated");
        Ok(CmdMessage::success(format!("Plugin '{}' deactivated.", file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::SiteFixture;
    use crate::store::memory::InMemorySite;

    fn site() -> InMemorySite {
        SiteFixture::new()
            .with_plugin("akismet/akismet.php", "Akismet", true)
            .with_plugin("hello.php", "Hello Dolly", false)
            .build()
    }

    fn one(file: &str) -> ParsedArguments {
        ParsedArguments::with_positional([file])
    }

    #[test]
    fn list_shows_every_plugin() {
        let mut site = site();
        let msg = list(&mut site, &ParsedArguments::default()).unwrap();
        assert_eq!(
            msg.content,
            "Name: Akismet\nStatus: Active\nVersion: 1.0.0\nPlugin File: akismet/akismet.php\n---\n\
             Name: Hello Dolly\nStatus: Inactive\nVersion: 1.0.0\nPlugin File: hello.php\n---"
        );
    }

    #[test]
    fn list_filters_by_status() {
        let mut site = site();
        let msg = list(&mut site, &args::parse("--status=Inactive")).unwrap();
        assert!(msg.content.contains("Hello Dolly"));
        assert!(!msg.content.contains("Akismet"));

        let msg = list(&mut site, &args::parse("--status=bogus")).unwrap();
        assert_eq!(msg.content.matches("---").count(), 2);
    }

    #[test]
    fn list_empty_messages() {
        let mut empty = SiteFixture::new().build();
        let msg = list(&mut empty, &ParsedArguments::default()).unwrap();
        assert_eq!(msg.content, "No plugins installed.");

        let mut site = SiteFixture::new().with_plugin("a.php", "A", false).build();
        let msg = list(&mut site, &args::parse("--status=active")).unwrap();
        assert_eq!(
            msg.content,
            "No plugins found matching criteria (status: active)."
        );
    }

    #[test]
    fn activate_then_already_active() {
        let mut site = site();
        let msg = activate(&mut site, &one("hello.php")).unwrap();
        assert_eq!(msg.to_text(), "Success: Plugin 'hello.php' activated.");
        assert!(site.is_plugin_active("hello.php").unwrap());

        let msg = activate(&mut site, &one("hello.php")).unwrap();
        assert_eq!(msg.to_text(), "Notice: Plugin 'hello.php' is already active.");
    }

    #[test]
    fn activate_missing_plugin_reports_backend_reason() {
        let mut site = site();
        let msg = activate(&mut site, &one("nope/nope.php")).unwrap();
        assert_eq!(
            msg.to_text(),
            "Error: Failed to activate plugin 'nope/nope.php'. Plugin file does not exist."
        );
    }

    #[test]
    fn activate_that_does_not_stick_is_an_error() {
        let mut site = SiteFixture::new()
            .with_plugin("stuck.php", "Stuck", false)
            .with_frozen("stuck.php")
            .build();
        let msg = activate(&mut site, &one("stuck.php")).unwrap();
        assert!(msg.is_error());
        assert!(msg.content.ends_with("The plugin did not activate as expected."));
    }

    #[test]
    fn activate_requires_identifier() {
        let mut site = site();
        let msg = activate(&mut site, &ParsedArguments::default()).unwrap();
        assert!(msg.is_error());
        assert!(msg.content.starts_with("Plugin slug/file"));
    }

    #[test]
    fn deactivate_flow() {
        let mut site = site();
        let msg = deactivate(&mut site, &one("akismet/akismet.php")).unwrap();
        assert_eq!(
            msg.to_text(),
            "Success: Plugin 'akismet/akismet.php' deactivated."
        );
        let msg = deactivate(&mut site, &one("akismet/akismet.php")).unwrap();
        assert_eq!(msg.level, MessageLevel::Notice);
        assert!(msg.content.ends_with("was already inactive."));
    }

    #[test]
    fn deactivate_that_does_not_stick_is_an_error() {
        let mut site = SiteFixture::new()
            .with_plugin("sticky.php", "Sticky", true)
            .with_frozen("sticky.php")
            .build();
        let msg = deactivate(&mut site, &one("sticky.php")).unwrap();
        assert_eq!(
            msg.to_text(),
            "Error: Failed to deactivate plugin 'sticky.php'. The plugin might still be active."
        );
    }
}
