//! Static snapshot export.
//!
//! Renders every view state a visitor can reach into its own HTML file. Each
//! page is produced by booting a fresh [`Site`] and driving it to the state,
//! the same way a visitor would get there, so snapshots go through the same
//! transition and fallback paths as a live session.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                      # Home
//! ├── collection/index.html           # Bento grid
//! ├── blog/
//! │   ├── index.html                  # Journal overview
//! │   ├── engineering/
//! │   │   ├── index.html              # Category list (or empty placeholder)
//! │   │   └── 3/index.html            # Article
//! │   └── ...
//! └── routes.json                     # Every generated page
//! ```
//!
//! Stylesheets are inlined, so the directory has no other assets.

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::route::Route;
use crate::site::Site;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One generated page, as listed in `routes.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEntry {
    /// Path of the HTML file relative to the output directory.
    pub file: String,
    /// Fragment the page's site was booted at.
    pub fragment: String,
    /// View path the site settled on, e.g. `Blog/Article(3)`.
    pub view: String,
    /// Transitions it took to get there.
    pub transitions: usize,
}

#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub pages: Vec<PageEntry>,
}

/// The steps a visitor takes from the journal overview to reach a page.
#[derive(Debug, Clone)]
enum JournalPath<'a> {
    Overview,
    Category(&'a str),
    Article(&'a str, &'a str),
}

fn drive_journal(site: &mut Site, path: &JournalPath<'_>) {
    let exit_ms = site.config().transition.exit_ms;
    match path {
        JournalPath::Overview => {}
        JournalPath::Category(category) => {
            site.select_category(category);
            site.advance(exit_ms);
        }
        JournalPath::Article(category, post) => {
            site.select_category(category);
            site.advance(exit_ms);
            site.select_post(post);
            site.advance(exit_ms);
        }
    }
}

fn write_page(
    output_dir: &Path,
    file: &str,
    site: &Site,
    fragment: &str,
) -> Result<PageEntry, GenerateError> {
    let path = output_dir.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, site.render().into_string())?;
    debug!(file, view = %site.view_path(), "wrote page");
    Ok(PageEntry {
        file: file.to_string(),
        fragment: fragment.to_string(),
        view: site.view_path(),
        transitions: site.transitions_started(),
    })
}

/// Render every reachable view state into `output_dir`.
pub fn build(
    store: &ContentStore,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let mut pages = Vec::new();

    for route in [Route::Home, Route::Collection] {
        let fragment = route.fragment();
        let mut site = Site::new(store.clone(), config.clone(), fragment);
        let file = match route {
            Route::Home => "index.html".to_string(),
            _ => format!("{fragment}/index.html"),
        };
        pages.push(write_page(output_dir, &file, &site, fragment)?);
        site.shutdown();
    }

    let blog = Route::Blog.fragment();
    let mut journal = vec![("blog/index.html".to_string(), JournalPath::Overview)];
    for category in &store.categories {
        journal.push((
            format!("blog/{}/index.html", category.id),
            JournalPath::Category(&category.id),
        ));
        for post in store.posts_in(&category.id) {
            journal.push((
                format!("blog/{}/{}/index.html", category.id, post.id),
                JournalPath::Article(&category.id, &post.id),
            ));
        }
    }

    for (file, path) in &journal {
        let mut site = Site::new(store.clone(), config.clone(), blog);
        drive_journal(&mut site, path);
        pages.push(write_page(output_dir, file, &site, blog)?);
        site.shutdown();
    }

    let routes = serde_json::to_string_pretty(&pages)?;
    fs::write(output_dir.join("routes.json"), routes)?;

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{seeded_config, store_with_empty_category};
    use tempfile::TempDir;

    #[test]
    fn build_writes_every_page() {
        let tmp = TempDir::new().unwrap();
        let report = build(&ContentStore::stock(), &seeded_config(), tmp.path()).unwrap();

        // home + collection + overview + 3 categories + 4 posts
        assert_eq!(report.pages.len(), 10);
        for page in &report.pages {
            assert!(tmp.path().join(&page.file).exists(), "{}", page.file);
        }
        assert!(tmp.path().join("blog/engineering/3/index.html").exists());
        assert!(tmp.path().join("routes.json").exists());
    }

    #[test]
    fn pages_record_settled_view() {
        let tmp = TempDir::new().unwrap();
        let report = build(&ContentStore::stock(), &seeded_config(), tmp.path()).unwrap();
        let article = report
            .pages
            .iter()
            .find(|p| p.file == "blog/engineering/3/index.html")
            .unwrap();
        assert_eq!(article.view, "Blog/Article(3)");
        assert_eq!(article.transitions, 2);
        assert_eq!(report.pages[0].view, "Home");
        assert_eq!(report.pages[1].file, "collection/index.html");
    }

    #[test]
    fn article_page_contains_post() {
        let tmp = TempDir::new().unwrap();
        build(&ContentStore::stock(), &seeded_config(), tmp.path()).unwrap();
        let html = fs::read_to_string(tmp.path().join("blog/philosophy/1/index.html")).unwrap();
        assert!(html.contains("Thanks for reading."));
        assert!(html.contains(r#"class="journal-view animate-enter""#));
    }

    #[test]
    fn empty_category_page_has_placeholder() {
        let tmp = TempDir::new().unwrap();
        build(&store_with_empty_category(), &seeded_config(), tmp.path()).unwrap();
        let html = fs::read_to_string(tmp.path().join("blog/drafts/index.html")).unwrap();
        assert!(html.contains("No fragments found in this sector."));
    }

    #[test]
    fn routes_json_lists_pages() {
        let tmp = TempDir::new().unwrap();
        build(&ContentStore::stock(), &seeded_config(), tmp.path()).unwrap();
        let json = fs::read_to_string(tmp.path().join("routes.json")).unwrap();
        let routes: serde_json::Value = serde_json::from_str(&json).unwrap();
        let routes = routes.as_array().unwrap();
        assert_eq!(routes.len(), 10);
        assert_eq!(routes[2]["file"], "blog/index.html");
        assert_eq!(routes[2]["view"], "Blog/Overview");
    }
}
