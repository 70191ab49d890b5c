use super::{SortOrder, UserLookup, UserOrderBy, UserQuery};
use crate::error::{Result, WpcmdError};
use crate::model::{sanitize_slug, NewPage, Page, PageStatus, Plugin, SiteInfo, Theme, User};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Complete state of one site. Both backends apply the same rules through it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    #[serde(default)]
    pub info: SiteInfo,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub plugins: Vec<Plugin>,
    #[serde(default)]
    pub active_plugins: Vec<String>,
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub stylesheet: String,
    #[serde(default)]
    pub current_user: u64,
    /// Option names, plugin files and theme stylesheets whose writes are silently
    /// dropped. Simulates extensions that fail while changing state.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub frozen: BTreeSet<String>,
}

/// Equality that treats `5` and `5.0` as the same stored value.
pub fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

impl SiteData {
    pub fn get_option(&self, name: &str) -> Option<Value> {
        self.options.get(name).cloned()
    }

    pub fn update_option(&mut self, name: &str, value: Value) -> bool {
        if self.frozen.contains(name) {
            return false;
        }
        if let Some(existing) = self.options.get(name) {
            if values_match(existing, &value) {
                return false;
            }
        }
        self.options.insert(name.to_string(), value);
        true
    }

    pub fn query_users(&self, query: &UserQuery) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| {
                query
                    .role
                    .as_ref()
                    .map_or(true, |role| u.roles.iter().any(|r| r == role))
            })
            .filter(|u| {
                query.search.as_ref().map_or(true, |pattern| {
                    [&u.login, &u.email, &u.url, &u.nicename, &u.display_name]
                        .iter()
                        .any(|field| pattern.matches(field))
                })
            })
            .cloned()
            .collect();

        users.sort_by(|a, b| {
            let ordering = self.compare_users(a, b, query.orderby);
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        if query.number > 0 {
            users.truncate(query.number as usize);
        }
        users
    }

    fn compare_users(&self, a: &User, b: &User, orderby: UserOrderBy) -> Ordering {
        match orderby {
            UserOrderBy::Id => a.id.cmp(&b.id),
            // No user meta is modelled, so meta ordering falls back to login.
            UserOrderBy::Login | UserOrderBy::MetaValue => a.login.cmp(&b.login),
            UserOrderBy::Nicename => a.nicename.cmp(&b.nicename),
            UserOrderBy::Email => a.email.cmp(&b.email),
            UserOrderBy::Url => a.url.cmp(&b.url),
            UserOrderBy::Registered => a.registered.cmp(&b.registered),
            UserOrderBy::DisplayName => a.display_name.cmp(&b.display_name),
            UserOrderBy::PostCount => self
                .post_count(a.id)
                .cmp(&self.post_count(b.id))
                .then_with(|| a.login.cmp(&b.login)),
        }
    }

    fn post_count(&self, author: u64) -> usize {
        self.pages.iter().filter(|p| p.author == author).count()
    }

    pub fn find_user(&self, lookup: &UserLookup) -> Option<User> {
        self.users
            .iter()
            .find(|u| match lookup {
                UserLookup::Id(id) => u.id == *id,
                UserLookup::Login(login) => &u.login == login,
                UserLookup::Slug(slug) => &u.nicename == slug,
                UserLookup::Email(email) => u.email.eq_ignore_ascii_case(email),
            })
            .cloned()
    }

    pub fn insert_page(&mut self, page: NewPage) -> Result<u64> {
        if page.title.trim().is_empty() && page.content.trim().is_empty() {
            return Err(WpcmdError::Backend(
                "Content, title, and excerpt are empty.".to_string(),
            ));
        }
        if !self.users.iter().any(|u| u.id == page.author) {
            return Err(WpcmdError::Backend(format!(
                "Author {} does not exist.",
                page.author
            )));
        }

        let id = self.pages.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let base = page
            .slug
            .as_deref()
            .map(sanitize_slug)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| sanitize_slug(&page.title));
        let base = if base.is_empty() { id.to_string() } else { base };
        let slug = self.unique_slug(&base);

        self.pages.push(Page {
            id,
            title: page.title,
            content: page.content,
            status: page.status,
            author: page.author,
            date: page.date.unwrap_or_else(Utc::now),
            slug,
        });
        Ok(id)
    }

    fn unique_slug(&self, base: &str) -> String {
        let taken = |s: &str| self.pages.iter().any(|p| p.slug == s);
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn get_page(&self, id: u64) -> Option<Page> {
        self.pages.iter().find(|p| p.id == id).cloned()
    }

    pub fn permalink(&self, id: u64) -> Result<String> {
        let page = self
            .pages
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| WpcmdError::Backend(format!("Page {} not found.", id)))?;
        let home = self.info.home_url.trim_end_matches('/');
        Ok(match page.status {
            PageStatus::Publish | PageStatus::Private => format!("{}/{}/", home, page.slug),
            PageStatus::Draft | PageStatus::Pending => format!("{}/?page_id={}", home, page.id),
        })
    }

    pub fn is_plugin_active(&self, file: &str) -> bool {
        self.active_plugins.iter().any(|f| f == file)
    }

    pub fn activate_plugin(&mut self, file: &str) -> Result<()> {
        if !self.plugins.iter().any(|p| p.file == file) {
            return Err(WpcmdError::Backend("Plugin file does not exist.".to_string()));
        }
        if self.frozen.contains(file) || self.is_plugin_active(file) {
            return Ok(());
        }
        self.active_plugins.push(file.to_string());
        Ok(())
    }

    pub fn deactivate_plugin(&mut self, file: &str) {
        if self.frozen.contains(file) {
            return;
        }
        self.active_plugins.retain(|f| f != file);
    }

    pub fn theme(&self, stylesheet: &str) -> Option<Theme> {
        self.themes
            .iter()
            .find(|t| t.stylesheet == stylesheet)
            .cloned()
    }

    pub fn switch_theme(&mut self, stylesheet: &str) -> Result<()> {
        if self.theme(stylesheet).is_none() {
            return Err(WpcmdError::Backend(format!(
                "Theme '{}' does not exist.",
                stylesheet
            )));
        }
        if !self.frozen.contains(stylesheet) {
            self.stylesheet = stylesheet.to_string();
        }
        Ok(())
    }
}
