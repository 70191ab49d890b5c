use crate::args::ParsedArguments;
use crate::commands::{
    no_match_message, render_blocks, requested_status, status_label, status_passes, CmdMessage,
};
use crate::error::{Result, WpcmdError};
use crate::store::SiteBackend;

pub fn list<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let themes = site.themes()?;
    if themes.is_empty() {
        return Ok(CmdMessage::info("No themes installed."));
    }

    let current = site.active_stylesheet()?;
    let requested = requested_status(args);
    let blocks: Vec<Vec<String>> = themes
        .into_iter()
        .filter(|t| status_passes(requested.as_deref(), t.stylesheet == current))
        .map(|t| {
            vec![
                format!("Name: {}", t.name),
                format!("Slug: {}", t.stylesheet),
                format!("Status: {}", status_label(t.stylesheet == current)),
                format!("Version: {}", t.version),
            ]
        })
        .collect();

    if blocks.is_empty() {
        return Ok(CmdMessage::info(no_match_message(
            "themes",
            requested.as_deref(),
        )));
    }
    Ok(CmdMessage::info(render_blocks(&blocks)))
}

pub fn activate<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let slug = match args.positional(0).map(str::trim) {
        Some(slug) if !slug.is_empty() => slug,
        _ => {
            return Ok(CmdMessage::error(
                "Theme stylesheet (slug) required for activation.",
            ))
        }
    };

    let Some(theme) = site.theme(slug)? else {
        return Ok(CmdMessage::error(format!(
            "Theme '{}' does not exist.",
            slug
        )));
    };
    if !theme.allowed {
        return Ok(CmdMessage::error(format!(
            "Theme '{}' is not allowed for activation (possibly broken or not network-enabled).",
            slug
        )));
    }
    if site.active_stylesheet()? == slug {
        return Ok(CmdMessage::notice(format!(
            "Theme '{}' is already active.",
            slug
        )));
    }

    match site.switch_theme(slug) {
        Ok(()) => {}
        Err(WpcmdError::Backend(reason)) => {
            return Ok(CmdMessage::error(format!(
                "Failed to activate theme '{}'. {}",
                slug, reason
            )))
        }
        Err(e) => return Err(e),
    }

    let current = site.active_stylesheet()?;
    if current == slug {
        tracing::info!(theme = slug, "theme activated");
        Ok(CmdMessage::success(format!("Theme '{}' activated.", slug)))
    } else {
        Ok(CmdMessage::error(format!(
            "Failed to activate theme '{}'. Current active theme is still '{}'. Check for errors during theme switching.",
            slug, current
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::commands::MessageLevel;
    use crate::model::Theme;
    use crate::store::memory::fixtures::SiteFixture;
    use crate::store::memory::InMemorySite;

    fn site() -> InMemorySite {
        SiteFixture::new()
            .with_theme(Theme::new("twentytwentyfour", "Twenty Twenty-Four", "1.1"), true)
            .with_theme(Theme::new("classic", "Classic", "2.0"), false)
            .with_theme(Theme::new("broken", "Broken", "0.1").disallowed(), false)
            .build()
    }

    fn one(slug: &str) -> ParsedArguments {
        ParsedArguments::with_positional([slug])
    }

    #[test]
    fn list_marks_the_active_theme() {
        let mut site = site();
        let msg = list(&mut site, &args::parse("--status=active")).unwrap();
        assert_eq!(
            msg.content,
            "Name: Twenty Twenty-Four\nSlug: twentytwentyfour\nStatus: Active\nVersion: 1.1\n---"
        );
        let msg = list(&mut site, &args::parse("--status=inactive")).unwrap();
        assert_eq!(msg.content.matches("Status: Inactive").count(), 2);
    }

    #[test]
    fn list_empty_messages() {
        let mut site = SiteFixture::new().build();
        let msg = list(&mut site, &ParsedArguments::default()).unwrap();
        assert_eq!(msg.content, "No themes installed.");

        let mut site = SiteFixture::new()
            .with_theme(Theme::new("only", "Only", "1.0"), true)
            .build();
        let msg = list(&mut site, &args::parse("--status=inactive")).unwrap();
        assert_eq!(msg.content, "No themes found matching criteria (status: inactive).");
    }

    #[test]
    fn activate_switches_theme() {
        let mut site = site();
        let msg = activate(&mut site, &one("classic")).unwrap();
        assert_eq!(msg.to_text(), "Success: Theme 'classic' activated.");
        assert_eq!(site.active_stylesheet().unwrap(), "classic");
    }

    #[test]
    fn activate_current_theme_is_a_notice() {
        let mut site = site();
        let msg = activate(&mut site, &one("twentytwentyfour")).unwrap();
        assert_eq!(msg.level, MessageLevel::Notice);
    }

    #[test]
    fn activate_unknown_or_disallowed_theme() {
        let mut site = site();
        let msg = activate(&mut site, &one("ghost")).unwrap();
        assert_eq!(msg.to_text(), "Error: Theme 'ghost' does not exist.");

        let msg = activate(&mut site, &one("broken")).unwrap();
        assert!(msg.is_error());
        assert!(msg.content.contains("is not allowed for activation"));
        assert_eq!(site.active_stylesheet().unwrap(), "twentytwentyfour");
    }

    #[test]
    fn activate_that_does_not_stick_names_current_theme() {
        let mut site = SiteFixture::new()
            .with_theme(Theme::new("a", "A", "1"), true)
            .with_theme(Theme::new("b", "B", "1"), false)
            .with_frozen("b")
            .build();
        let msg = activate(&mut site, &one("b")).unwrap();
        assert_eq!(
            msg.to_text(),
            "Error: Failed to activate theme 'b'. Current active theme is still 'a'. Check for errors during theme switching."
        );
    }

    #[test]
    fn activate_requires_slug() {
        let mut site = site();
        let msg = activate(&mut site, &one("  ")).unwrap();
        assert_eq!(
            msg.to_text(),
            "Error: Theme stylesheet (slug) required for activation."
        );
    }
}
