use crate::args::ParsedArguments;
use crate::commands::{render_blocks, CmdMessage};
use crate::error::Result;
use crate::model::User;
use crate::store::{SearchPattern, SiteBackend, UserLookup, UserQuery};

const DEFAULT_NUMBER: i64 = 10;

pub fn list<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let query = build_query(args);
    tracing::debug!(?query, "querying users");
    let users = site.query_users(&query)?;
    if users.is_empty() {
        return Ok(CmdMessage::info("No users found matching criteria."));
    }

    let blocks: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                format!("ID: {}", u.id),
                format!("Login: {}", u.login),
                format!("Display Name: {}", u.display_name),
                format!("Email: {}", u.email),
                format!("Roles: {}", roles(u)),
            ]
        })
        .collect();
    Ok(CmdMessage::info(render_blocks(&blocks)))
}

/// Unsupported `orderby` and `order` values are ignored rather than rejected.
fn build_query(args: &ParsedArguments) -> UserQuery {
    UserQuery {
        role: args
            .text("role")
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string),
        number: args.text("number").and_then(parse_number).unwrap_or(DEFAULT_NUMBER),
        orderby: args
            .text("orderby")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        order: args
            .text("order")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        search: args.text("search").map(SearchPattern::anywhere),
    }
}

/// Accepts integers and decimals (truncated toward zero).
fn parse_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

pub fn get<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let identifier = match args.positional(0).map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Ok(CmdMessage::error(
                "User ID, login, slug, or email required for 'user get'.",
            ))
        }
    };

    let Some(user) = find_by_identifier(site, identifier)? else {
        return Ok(CmdMessage::error(format!(
            "User '{}' not found.",
            identifier
        )));
    };

    let lines = [
        format!("ID: {}", user.id),
        format!("Login: {}", user.login),
        format!("Display Name: {}", user.display_name),
        format!("Nice Name (Slug): {}", user.nicename),
        format!("Email: {}", user.email),
        format!(
            "Registered Date: {}",
            user.registered.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("Roles: {}", roles(&user)),
        format!("Website: {}", user.url),
    ];
    Ok(CmdMessage::info(lines.join("\n")))
}

/// Tries ID (when numeric), then login, slug and email, first hit wins.
fn find_by_identifier<B: SiteBackend>(site: &B, identifier: &str) -> Result<Option<User>> {
    let mut lookups = Vec::with_capacity(4);
    if let Ok(id) = identifier.parse::<u64>() {
        lookups.push(UserLookup::Id(id));
    }
    lookups.push(UserLookup::Login(identifier.to_string()));
    lookups.push(UserLookup::Slug(identifier.to_string()));
    lookups.push(UserLookup::Email(identifier.to_string()));

    for lookup in &lookups {
        if let Some(user) = site.find_user(lookup)? {
            return Ok(Some(user));
        }
    }
    Ok(None)
}

fn roles(user: &User) -> String {
    if user.roles.is_empty() {
        "(none)".to_string()
    } else {
        user.roles.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::store::memory::fixtures::SiteFixture;
    use crate::store::memory::InMemorySite;
    use crate::store::{SortOrder, UserOrderBy};
    use chrono::{TimeZone, Utc};

    fn site() -> InMemorySite {
        SiteFixture::new()
            .with_user(
                User::new(2, "zoe")
                    .with_email("zoe@example.org")
                    .with_roles(["editor"]),
            )
            .with_user(
                User::new(3, "bob")
                    .with_email("bob@example.com")
                    .with_nicename("bobby")
                    .with_url("https://bob.example")
                    .with_registered(Utc.with_ymd_and_hms(2023, 5, 6, 7, 8, 9).unwrap()),
            )
            .build()
    }

    fn one(id: &str) -> ParsedArguments {
        ParsedArguments::with_positional([id])
    }

    fn logins(text: &str) -> Vec<&str> {
        text.lines()
            .filter_map(|l| l.strip_prefix("Login: "))
            .collect()
    }

    #[test]
    fn query_defaults() {
        let query = build_query(&ParsedArguments::default());
        assert_eq!(query, UserQuery::default());
        assert_eq!(query.number, 10);
    }

    #[test]
    fn query_ignores_unsupported_values() {
        let query = build_query(&args::parse("--orderby=password --order=up --number=lots"));
        assert_eq!(query.orderby, UserOrderBy::Login);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.number, 10);
    }

    #[test]
    fn blank_role_does_not_filter() {
        assert_eq!(build_query(&args::parse("--role=")).role, None);
        assert_eq!(build_query(&args::parse(r#"--role="  ""#)).role, None);
        assert_eq!(
            build_query(&args::parse("--role=editor")).role.as_deref(),
            Some("editor")
        );
    }

    #[test]
    fn query_accepts_decimal_numbers() {
        assert_eq!(build_query(&args::parse("--number=2.9")).number, 2);
        assert_eq!(build_query(&args::parse("--number=-1")).number, -1);
    }

    #[test]
    fn list_sorted_by_login() {
        let mut site = site();
        let msg = list(&mut site, &ParsedArguments::default()).unwrap();
        assert_eq!(logins(&msg.content), ["admin", "bob", "zoe"]);
        assert!(msg.content.contains("Roles: (none)"));
        assert!(msg.content.contains("Roles: administrator"));
    }

    #[test]
    fn list_with_filters_and_ordering() {
        let mut site = site();
        let msg = list(&mut site, &args::parse("--orderby=ID --order=desc --number=2")).unwrap();
        assert_eq!(logins(&msg.content), ["bob", "zoe"]);

        let msg = list(&mut site, &args::parse("--role=editor")).unwrap();
        assert_eq!(logins(&msg.content), ["zoe"]);

        let msg = list(&mut site, &args::parse("--search=*EXAMPLE.ORG")).unwrap();
        assert_eq!(logins(&msg.content), ["zoe"]);
    }

    #[test]
    fn list_nothing_found() {
        let mut site = site();
        let msg = list(&mut site, &args::parse("--role=author")).unwrap();
        assert_eq!(msg, CmdMessage::info("No users found matching criteria."));
    }

    #[test]
    fn get_by_each_identifier_kind() {
        let mut site = site();
        for identifier in ["3", "bob", "bobby", "BOB@example.com"] {
            let msg = get(&mut site, &one(identifier)).unwrap();
            assert!(msg.content.starts_with("ID: 3\nLogin: bob\n"), "{}", identifier);
        }
    }

    #[test]
    fn get_renders_details() {
        let mut site = site();
        let msg = get(&mut site, &one("bob")).unwrap();
        assert_eq!(
            msg.content,
            "ID: 3\nLogin: bob\nDisplay Name: bob\nNice Name (Slug): bobby\n\
             Email: bob@example.com\nRegistered Date: 2023-05-06 07:08:09\n\
             Roles: (none)\nWebsite: https://bob.example"
        );
    }

    #[test]
    fn get_unknown_user_is_an_error() {
        let mut site = site();
        let msg = get(&mut site, &one("nobody")).unwrap();
        assert_eq!(msg.to_text(), "Error: User 'nobody' not found.");
    }

    #[test]
    fn get_requires_identifier() {
        let mut site = site();
        let msg = get(&mut site, &ParsedArguments::default()).unwrap();
        assert!(msg.is_error());
    }
}
