use crate::args::{ArgValue, ParsedArguments};
use crate::commands::CmdMessage;
use crate::error::{Result, WpcmdError};
use crate::model::{NewPage, PageStatus};
use crate::store::{SiteBackend, UserLookup};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

pub fn create<B: SiteBackend>(site: &mut B, args: &ParsedArguments) -> Result<CmdMessage> {
    let title = match args.text("title").map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            return Ok(CmdMessage::error(
                "--title is required and cannot be empty for page creation.",
            ))
        }
    };

    let content = args.text("content").unwrap_or_default().to_string();
    let status = args
        .text("status")
        .and_then(|s| s.parse::<PageStatus>().ok())
        .unwrap_or(PageStatus::Draft);

    let author = match args.get("author") {
        Some(ArgValue::Text(author)) => match resolve_author(site, author)? {
            Ok(id) => id,
            Err(msg) => return Ok(msg),
        },
        // A bare `--author` means the caller.
        Some(ArgValue::Flag) | None => site.current_user_id()?,
    };

    let date = match args.text("date") {
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(date),
            None => {
                return Ok(CmdMessage::error(
                    "Invalid date format for --date. Please use a recognizable date/time string.",
                ))
            }
        },
        None => None,
    };

    let page = NewPage {
        title,
        content,
        status,
        author,
        date,
        slug: args.text("slug").map(str::to_string),
    };

    let id = match site.insert_page(page) {
        Ok(id) => id,
        Err(WpcmdError::Backend(reason)) => {
            return Ok(CmdMessage::error(format!(
                "Failed to create page. {}",
                reason
            )))
        }
        Err(e) => return Err(e),
    };
    let link = site.permalink(id)?;
    tracing::info!(id, status = %status, "page created");

    Ok(CmdMessage::success(format!(
        "Page created with ID {}. Link: {}",
        id, link
    )))
}

/// A numeric author is looked up by ID, anything else by login then email.
fn resolve_author<B: SiteBackend>(
    site: &B,
    author: &str,
) -> Result<std::result::Result<u64, CmdMessage>> {
    if let Ok(id) = author.trim().parse::<i64>() {
        let user = match u64::try_from(id) {
            Ok(id) => site.find_user(&UserLookup::Id(id))?,
            Err(_) => None,
        };
        return Ok(match user {
            Some(user) => Ok(user.id),
            None => Err(CmdMessage::error(format!(
                "Author ID '{}' not found.",
                author
            ))),
        });
    }

    let user = match site.find_user(&UserLookup::Login(author.to_string()))? {
        Some(user) => Some(user),
        None => site.find_user(&UserLookup::Email(author.to_string()))?,
    };
    Ok(user.map(|u| u.id).ok_or_else(|| {
        CmdMessage::error(format!("Author login/email '{}' not found.", author))
    }))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y", "%B %d %Y"];

/// Parse a human-entered date. Times without a zone are taken as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let now = Utc::now();
    let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    match input.to_ascii_lowercase().as_str() {
        "now" => return Some(now),
        "today" => return midnight(now.date_naive()),
        "tomorrow" => return midnight(now.date_naive() + Duration::days(1)),
        "yesterday" => return midnight(now.date_naive() - Duration::days(1)),
        _ => {}
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.and_utc());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .and_then(midnight)
}
