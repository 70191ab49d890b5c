use super::data::SiteData;
use super::{SiteBackend, UserLookup, UserQuery};
use crate::error::Result;
use crate::model::{NewPage, Page, Plugin, SiteInfo, Theme, User};
use serde_json::Value;

/// In-memory site for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemorySite {
    data: SiteData,
}

impl InMemorySite {
    pub fn from_data(data: SiteData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &SiteData {
        &self.data
    }
}

impl SiteBackend for InMemorySite {
    fn site_info(&self) -> Result<SiteInfo> {
        Ok(self.data.info.clone())
    }

    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.data.get_option(name))
    }

    fn update_option(&mut self, name: &str, value: Value) -> Result<bool> {
        Ok(self.data.update_option(name, value))
    }

    fn query_users(&self, query: &UserQuery) -> Result<Vec<User>> {
        Ok(self.data.query_users(query))
    }

    fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>> {
        Ok(self.data.find_user(lookup))
    }

    fn current_user_id(&self) -> Result<u64> {
        Ok(self.data.current_user)
    }

    fn insert_page(&mut self, page: NewPage) -> Result<u64> {
        self.data.insert_page(page)
    }

    fn get_page(&self, id: u64) -> Result<Option<Page>> {
        Ok(self.data.get_page(id))
    }

    fn permalink(&self, id: u64) -> Result<String> {
        self.data.permalink(id)
    }

    fn plugins(&self) -> Result<Vec<Plugin>> {
        Ok(self.data.plugins.clone())
    }

    fn is_plugin_active(&self, file: &str) -> Result<bool> {
        Ok(self.data.is_plugin_active(file))
    }

    fn activate_plugin(&mut self, file: &str) -> Result<()> {
        self.data.activate_plugin(file)
    }

    fn deactivate_plugin(&mut self, file: &str) -> Result<()> {
        self.data.deactivate_plugin(file);
        Ok(())
    }

    fn themes(&self) -> Result<Vec<Theme>> {
        Ok(self.data.themes.clone())
    }

    fn theme(&self, stylesheet: &str) -> Result<Option<Theme>> {
        Ok(self.data.theme(stylesheet))
    }

    fn active_stylesheet(&self) -> Result<String> {
        Ok(self.data.stylesheet.clone())
    }

    fn switch_theme(&mut self, stylesheet: &str) -> Result<()> {
        self.data.switch_theme(stylesheet)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::json;

    pub struct SiteFixture {
        pub data: SiteData,
    }

    impl Default for SiteFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SiteFixture {
        /// A site with a single administrator who is also the current user.
        pub fn new() -> Self {
            let mut data = SiteData::default();
            data.users.push(
                User::new(1, "admin")
                    .with_email("admin@example.com")
                    .with_display_name("Site Admin")
                    .with_roles(["administrator"]),
            );
            data.current_user = 1;
            data.options.insert("blogname".into(), json!("Test Site"));
            Self { data }
        }

        pub fn with_user(mut self, user: User) -> Self {
            self.data.users.push(user);
            self
        }

        pub fn with_plugin(mut self, file: &str, name: &str, active: bool) -> Self {
            self.data.plugins.push(Plugin::new(file, name, "1.0.0"));
            if active {
                self.data.active_plugins.push(file.to_string());
            }
            self
        }

        pub fn with_theme(mut self, theme: Theme, active: bool) -> Self {
            if active {
                self.data.stylesheet = theme.stylesheet.clone();
            }
            self.data.themes.push(theme);
            self
        }

        /// Writes to `name` (option, plugin file or stylesheet) are silently dropped.
        pub fn with_frozen(mut self, name: &str) -> Self {
            self.data.frozen.insert(name.to_string());
            self
        }

        pub fn with_home_url(mut self, url: &str) -> Self {
            self.data.info.home_url = url.to_string();
            self.data.info.site_url = url.to_string();
            self
        }

        pub fn build(self) -> InMemorySite {
            InMemorySite::from_data(self.data)
        }
    }
}
