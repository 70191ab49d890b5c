use crate::args::ParsedArguments;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::store::SiteBackend;

/// The platform version, or a short site summary with `--extra`.
pub fn version<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let info = site.site_info()?;
    if !args.contains("extra") {
        return Ok(CmdMessage::info(info.version));
    }

    let lines = [
        format!("WordPress version: {}", info.version),
        format!("Database revision: {}", info.db_revision),
        format!("Site language: {}", info.locale),
        format!("Site URL: {}", info.site_url),
        format!("Home URL: {}", info.home_url),
    ];
    Ok(CmdMessage::info(lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::store::memory::fixtures::SiteFixture;

    #[test]
    fn plain_version() {
        let mut site = SiteFixture::new().build();
        let msg = version(&mut site, &ParsedArguments::default()).unwrap();
        assert_eq!(msg, CmdMessage::info("6.5.2"));
    }

    #[test]
    fn extra_adds_site_details() {
        let mut site = SiteFixture::new()
            .with_home_url("https://example.org")
            .build();
        let msg = version(&mut site, &args::parse("--extra")).unwrap();
        assert_eq!(
            msg.content,
            "WordPress version: 6.5.2\n\
             Database revision: 57155\n\
             Site language: en_US\n\
             Site URL: https://example.org\n\
             Home URL: https://example.org"
        );
    }

    #[test]
    fn extra_with_a_value_still_counts() {
        let mut site = SiteFixture::new().build();
        let msg = version(&mut site, &args::parse("--extra=yes")).unwrap();
        assert!(msg.content.starts_with("WordPress version: "));
    }
}
