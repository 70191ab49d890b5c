//! # Site Backend
//!
//! Handlers never touch site data directly. They go through the [`SiteBackend`]
//! trait, which models the content-management data layer as plain in-process calls:
//! options, users, pages, plugins and themes.
//!
//! ## Implementations
//!
//! - [`fs::FileSite`]: a site snapshot kept in `site.json`, re-read on every call.
//! - [`memory::InMemorySite`]: no persistence, for tests.
//!
//! Both share their query and mutation rules through [`data::SiteData`], so the two
//! backends cannot drift apart.
//!
//! ## Write Semantics
//!
//! Writes report refusal through `Err(WpcmdError::Backend)` with a message fit for
//! the user (e.g. `Plugin file does not exist.`). A write that returns `Ok` may still
//! not have taken effect; handlers re-read the state to confirm.

use crate::error::Result;
use crate::model::{NewPage, Page, Plugin, SiteInfo, Theme, User};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub mod data;
pub mod fs;
pub mod memory;

pub trait SiteBackend {
    fn site_info(&self) -> Result<SiteInfo>;

    /// `None` when the option does not exist (distinct from a stored `null`).
    fn get_option(&self, name: &str) -> Result<Option<Value>>;

    /// Returns `false` when nothing was written, either because the value was
    /// already stored or because the option refused the write.
    fn update_option(&mut self, name: &str, value: Value) -> Result<bool>;

    fn query_users(&self, query: &UserQuery) -> Result<Vec<User>>;

    fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>>;

    /// The user on whose behalf commands run.
    fn current_user_id(&self) -> Result<u64>;

    fn insert_page(&mut self, page: NewPage) -> Result<u64>;

    fn get_page(&self, id: u64) -> Result<Option<Page>>;

    fn permalink(&self, id: u64) -> Result<String>;

    fn plugins(&self) -> Result<Vec<Plugin>>;

    fn is_plugin_active(&self, file: &str) -> Result<bool>;

    fn activate_plugin(&mut self, file: &str) -> Result<()>;

    fn deactivate_plugin(&mut self, file: &str) -> Result<()>;

    fn themes(&self) -> Result<Vec<Theme>>;

    fn theme(&self, stylesheet: &str) -> Result<Option<Theme>>;

    fn active_stylesheet(&self) -> Result<String>;

    fn switch_theme(&mut self, stylesheet: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(u64),
    Login(String),
    Slug(String),
    Email(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrderBy {
    Id,
    #[default]
    Login,
    Nicename,
    Email,
    Url,
    Registered,
    DisplayName,
    PostCount,
    MetaValue,
}

impl FromStr for UserOrderBy {
    type Err = String;

    /// Only the exact field names of the sortable allow-list are accepted.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ID" => Ok(UserOrderBy::Id),
            "login" => Ok(UserOrderBy::Login),
            "nicename" => Ok(UserOrderBy::Nicename),
            "email" => Ok(UserOrderBy::Email),
            "url" => Ok(UserOrderBy::Url),
            "registered" => Ok(UserOrderBy::Registered),
            "display_name" => Ok(UserOrderBy::DisplayName),
            "post_count" => Ok(UserOrderBy::PostCount),
            "meta_value" => Ok(UserOrderBy::MetaValue),
            other => Err(format!("Unsupported orderby field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("Unsupported sort order: {}", other)),
        }
    }
}

/// A case-insensitive search term matched anywhere in a field, as `*term*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    term: String,
}

impl SearchPattern {
    /// Any `*` the caller typed at the ends is dropped; the term always matches
    /// anywhere.
    pub fn anywhere(term: &str) -> Self {
        Self {
            term: term.trim_matches('*').to_lowercase(),
        }
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.term)
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*{}*", self.term)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub role: Option<String>,
    /// Maximum number of users; zero or negative means no limit.
    pub number: i64,
    pub orderby: UserOrderBy,
    pub order: SortOrder,
    /// Matched against login, email, url, nicename and display name.
    pub search: Option<SearchPattern>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            role: None,
            number: 10,
            orderby: UserOrderBy::default(),
            order: SortOrder::default(),
            search: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_anywhere_wraps_term() {
        let pattern = SearchPattern::anywhere("**adm*");
        assert_eq!(pattern.to_string(), "*adm*");
        assert!(pattern.matches("The ADMIN"));
        assert!(!pattern.matches("editor"));
    }

    #[test]
    fn orderby_allow_list_is_exact() {
        assert_eq!("ID".parse::<UserOrderBy>(), Ok(UserOrderBy::Id));
        assert_eq!(
            "display_name".parse::<UserOrderBy>(),
            Ok(UserOrderBy::DisplayName)
        );
        assert!("id".parse::<UserOrderBy>().is_err());
        assert!("password".parse::<UserOrderBy>().is_err());
    }

    #[test]
    fn order_is_case_insensitive() {
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
