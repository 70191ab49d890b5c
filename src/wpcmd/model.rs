use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteInfo {
    pub version: String,
    pub db_revision: u64,
    pub locale: String,
    pub site_url: String,
    pub home_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            version: "6.5.2".to_string(),
            db_revision: 57155,
            locale: "en_US".to_string(),
            site_url: "http://localhost".to_string(),
            home_url: "http://localhost".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub login: String,
    /// URL-safe slug, derived from the login by default.
    pub nicename: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub url: String,
    pub registered: DateTime<Utc>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: u64, login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            id,
            nicename: sanitize_slug(&login),
            display_name: login.clone(),
            email: String::new(),
            url: String::new(),
            registered: Utc::now(),
            roles: Vec::new(),
            login,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_nicename(mut self, nicename: impl Into<String>) -> Self {
        self.nicename = nicename.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_roles<I, T>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_registered(mut self, registered: DateTime<Utc>) -> Self {
        self.registered = registered;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Publish,
    Draft,
    Pending,
    Private,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Publish => "publish",
            PageStatus::Draft => "draft",
            PageStatus::Pending => "pending",
            PageStatus::Private => "private",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "publish" => Ok(PageStatus::Publish),
            "draft" => Ok(PageStatus::Draft),
            "pending" => Ok(PageStatus::Pending),
            "private" => Ok(PageStatus::Private),
            other => Err(format!("Unknown page status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: PageStatus,
    pub author: u64,
    pub date: DateTime<Utc>,
    pub slug: String,
}

/// Input for creating a page. `date` and `slug` fall back to now and the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub title: String,
    pub content: String,
    pub status: PageStatus,
    pub author: u64,
    pub date: Option<DateTime<Utc>>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plugin {
    /// Path relative to the plugins directory, e.g. `akismet/akismet.php`.
    pub file: String,
    pub name: String,
    pub version: String,
}

impl Plugin {
    pub fn new(file: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    pub stylesheet: String,
    pub name: String,
    pub version: String,
    /// False for broken themes or themes not enabled on the network.
    #[serde(default = "default_allowed")]
    pub allowed: bool,
}

fn default_allowed() -> bool {
    true
}

impl Theme {
    pub fn new(
        stylesheet: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            stylesheet: stylesheet.into(),
            name: name.into(),
            version: version.into(),
            allowed: true,
        }
    }

    pub fn disallowed(mut self) -> Self {
        self.allowed = false;
        self
    }
}

/// Reduce arbitrary text to a URL-safe slug: lowercase ASCII letters, digits and
/// single hyphens, without leading or trailing hyphens.
pub fn sanitize_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/') {
            pending_hyphen = true;
        }
    }

    slug
}
