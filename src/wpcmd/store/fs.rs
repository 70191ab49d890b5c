use super::data::SiteData;
use super::{SiteBackend, UserLookup, UserQuery};
use crate::error::{Result, WpcmdError};
use crate::model::{NewPage, Page, PageStatus, Plugin, SiteInfo, Theme, User};
use chrono::Utc;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

const SITE_FILENAME: &str = "site.json";

/// A site snapshot stored as pretty JSON in `<root>/site.json`.
///
/// Every call re-reads the file, so edits made by other processes between
/// commands are picked up. Writes go through a temp file and a rename.
pub struct FileSite {
    root: PathBuf,
}

impl FileSite {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn site_path(&self) -> PathBuf {
        self.root.join(SITE_FILENAME)
    }

    pub fn exists(&self) -> bool {
        self.site_path().exists()
    }

    /// Write the sample site if no site exists yet. Returns whether a file was written.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&sample_site())?;
        Ok(true)
    }

    fn load(&self) -> Result<SiteData> {
        let path = self.site_path();
        if !path.exists() {
            return Err(WpcmdError::Store(format!(
                "No site found at {} (run `wpcmd init` first)",
                path.display()
            )));
        }
        let content = fs::read_to_string(&path).map_err(WpcmdError::Io)?;
        let data = serde_json::from_str(&content).map_err(WpcmdError::Serialization)?;
        Ok(data)
    }

    fn save(&self, data: &SiteData) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WpcmdError::Io)?;
        }
        let path = self.site_path();
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(data).map_err(WpcmdError::Serialization)?;
        fs::write(&tmp, content).map_err(WpcmdError::Io)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(WpcmdError::Io(e));
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&SiteData) -> T) -> Result<T> {
        let data = self.load()?;
        Ok(f(&data))
    }

    fn write<T>(&mut self, f: impl FnOnce(&mut SiteData) -> Result<T>) -> Result<T> {
        let mut data = self.load()?;
        let before = data.clone();
        let out = f(&mut data)?;
        if data != before {
            self.save(&data)?;
        }
        Ok(out)
    }
}

impl SiteBackend for FileSite {
    fn site_info(&self) -> Result<SiteInfo> {
        self.read(|d| d.info.clone())
    }

    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        self.read(|d| d.get_option(name))
    }

    fn update_option(&mut self, name: &str, value: Value) -> Result<bool> {
        self.write(|d| Ok(d.update_option(name, value)))
    }

    fn query_users(&self, query: &UserQuery) -> Result<Vec<User>> {
        self.read(|d| d.query_users(query))
    }

    fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>> {
        self.read(|d| d.find_user(lookup))
    }

    fn current_user_id(&self) -> Result<u64> {
        self.read(|d| d.current_user)
    }

    fn insert_page(&mut self, page: NewPage) -> Result<u64> {
        self.write(|d| d.insert_page(page))
    }

    fn get_page(&self, id: u64) -> Result<Option<Page>> {
        self.read(|d| d.get_page(id))
    }

    fn permalink(&self, id: u64) -> Result<String> {
        self.load()?.permalink(id)
    }

    fn plugins(&self) -> Result<Vec<Plugin>> {
        self.read(|d| d.plugins.clone())
    }

    fn is_plugin_active(&self, file: &str) -> Result<bool> {
        self.read(|d| d.is_plugin_active(file))
    }

    fn activate_plugin(&mut self, file: &str) -> Result<()> {
        self.write(|d| d.activate_plugin(file))
    }

    fn deactivate_plugin(&mut self, file: &str) -> Result<()> {
        self.write(|d| {
            d.deactivate_plugin(file);
            Ok(())
        })
    }

    fn themes(&self) -> Result<Vec<Theme>> {
        self.read(|d| d.themes.clone())
    }

    fn theme(&self, stylesheet: &str) -> Result<Option<Theme>> {
        self.read(|d| d.theme(stylesheet))
    }

    fn active_stylesheet(&self) -> Result<String> {
        self.read(|d| d.stylesheet.clone())
    }

    fn switch_theme(&mut self, stylesheet: &str) -> Result<()> {
        self.write(|d| d.switch_theme(stylesheet))
    }
}

/// The site written by `wpcmd init`.
pub fn sample_site() -> SiteData {
    let mut data = SiteData::default();
    data.users = vec![
        User::new(1, "admin")
            .with_email("admin@example.com")
            .with_display_name("Site Admin")
            .with_url("http://localhost")
            .with_roles(["administrator"]),
        User::new(2, "editor")
            .with_email("editor@example.com")
            .with_display_name("Eddie Editor")
            .with_roles(["editor"]),
    ];
    data.current_user = 1;
    data.options.insert("blogname".into(), json!("My Site"));
    data.options.insert(
        "blogdescription".into(),
        json!("Just another WordPress site"),
    );
    data.options.insert("siteurl".into(), json!(data.info.site_url));
    data.options.insert("home".into(), json!(data.info.home_url));
    data.options.insert("posts_per_page".into(), json!(10));
    data.plugins = vec![
        Plugin::new("akismet/akismet.php", "Akismet Anti-spam", "5.3.1"),
        Plugin::new("hello.php", "Hello Dolly", "1.7.2"),
    ];
    data.active_plugins = vec!["akismet/akismet.php".to_string()];
    data.themes = vec![
        Theme::new("twentytwentyfour", "Twenty Twenty-Four", "1.1"),
        Theme::new("twentytwentythree", "Twenty Twenty-Three", "1.4"),
    ];
    data.stylesheet = "twentytwentyfour".to_string();
    data.pages.push(Page {
        id: 1,
        title: "Sample Page".to_string(),
        content: "This is an example page.".to_string(),
        status: PageStatus::Publish,
        author: 1,
        date: Utc::now(),
        slug: "sample-page".to_string(),
    });
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, FileSite) {
        let dir = TempDir::new().unwrap();
        let site = FileSite::new(dir.path().to_path_buf());
        site.init().unwrap();
        (dir, site)
    }

    #[test]
    fn missing_site_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        let site = FileSite::new(dir.path().join("nowhere"));
        assert!(matches!(site.site_info(), Err(WpcmdError::Store(_))));
    }

    #[test]
    fn init_only_writes_once() {
        let (_dir, site) = site();
        assert!(!site.init().unwrap());
        assert_eq!(site.active_stylesheet().unwrap(), "twentytwentyfour");
    }

    #[test]
    fn writes_persist_across_instances() {
        let (dir, mut site) = site();
        site.activate_plugin("hello.php").unwrap();
        site.update_option("blogname", json!("Renamed")).unwrap();

        let reopened = FileSite::new(dir.path().to_path_buf());
        assert!(reopened.is_plugin_active("hello.php").unwrap());
        assert_eq!(
            reopened.get_option("blogname").unwrap(),
            Some(json!("Renamed"))
        );
    }

    #[test]
    fn failed_write_leaves_file_untouched() {
        let (_dir, mut site) = site();
        let before = fs::read_to_string(site.site_path()).unwrap();
        assert!(site.switch_theme("missing").is_err());
        assert_eq!(fs::read_to_string(site.site_path()).unwrap(), before);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let site = FileSite::new(dir.path().to_path_buf());
        fs::create_dir(site.site_path()).unwrap();
        fs::write(site.site_path().join("keep"), "x").unwrap();

        assert!(matches!(site.save(&sample_site()), Err(WpcmdError::Io(_))));
        assert!(!site.site_path().with_extension("json.tmp").exists());
    }

    #[test]
    fn no_temp_files_left_behind() {
        let (dir, mut site) = site();
        site.update_option("x", json!(1)).unwrap();
        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }
    }

    #[test]
    fn pages_get_permalinks() {
        let (_dir, mut site) = site();
        let id = site
            .insert_page(NewPage {
                title: "Contact".into(),
                content: String::new(),
                status: PageStatus::Publish,
                author: 1,
                date: None,
                slug: None,
            })
            .unwrap();
        assert_eq!(id, 2);
        assert_eq!(site.permalink(id).unwrap(), "http://localhost/contact/");
    }
}
