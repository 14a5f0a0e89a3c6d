//! Static content store: journal categories, posts, and collection tiles.
//!
//! The store is read-only once built. [`ContentStore::stock`] carries the
//! site's own content; [`ContentStore::load`] reads the same shape from a
//! `content.toml`:
//!
//! ```toml
//! [[categories]]
//! id = "engineering"
//! title = "Engineering"
//! description = "Code structure, state management, and the craft of software."
//! accent = "from-cyan-500/20 via-teal-500/5 to-transparent"
//!
//! [[posts]]
//! id = "3"
//! category_id = "engineering"
//! title = "Aetherial State Management"
//! date = "Aug 15, 2024"
//! read_time = "8 min read"
//! excerpt = "..."
//! tags = ["Engineering", "Code"]
//! content = { markdown = "The server is no longer the source of truth." }
//!
//! [[tiles]]
//! id = "1"
//! kind = "text"
//! content = "Simplicity is the ultimate sophistication."
//! sub_content = "Leonardo da Vinci"
//! col_span = 2
//! ```
//!
//! Validation runs once, when a store is loaded. Rendering code assumes a
//! valid store and never rechecks it; lookups of unknown ids return `None`.

use pulldown_cmark::{Parser, html as md_html};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

/// A journal category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Gradient classes for the card's holographic sheen.
    pub accent: String,
}

/// Article body.
///
/// Bodies are trusted site content. HTML is injected verbatim; markdown is
/// converted at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RichText {
    Html(String),
    Markdown(String),
}

impl RichText {
    pub fn to_html(&self) -> String {
        match self {
            RichText::Html(html) => html.clone(),
            RichText::Markdown(md) => {
                let mut html = String::new();
                md_html::push_html(&mut html, Parser::new(md));
                html
            }
        }
    }
}

/// A journal post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub date: String,
    pub read_time: String,
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: RichText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// `content` is a quote, `sub_content` its author.
    Text,
    /// `content` is an image URL, `sub_content` its caption.
    Image,
    /// `content` is a label, `sub_content` a scheme-less URL.
    Link,
}

/// A cell of the collection bento grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionTile {
    pub id: String,
    pub kind: TileKind,
    pub content: String,
    #[serde(default)]
    pub sub_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentStore {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub tiles: Vec<CollectionTile>,
}

impl ContentStore {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Posts filed under `category_id`, in store order.
    pub fn posts_in(&self, category_id: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    /// Check the store's invariants: unique ids per collection, category and
    /// post ids usable as path segments, every post filed under an existing
    /// category, spans in {1, 2}.
    pub fn validate(&self) -> Result<(), ContentError> {
        check_unique("category", self.categories.iter().map(|c| c.id.as_str()))?;
        check_unique("post", self.posts.iter().map(|p| p.id.as_str()))?;
        check_unique("tile", self.tiles.iter().map(|t| t.id.as_str()))?;
        check_slugs("category", self.categories.iter().map(|c| c.id.as_str()))?;
        check_slugs("post", self.posts.iter().map(|p| p.id.as_str()))?;

        for post in &self.posts {
            if self.category(&post.category_id).is_none() {
                return Err(ContentError::Validation(format!(
                    "post '{}' references unknown category '{}'",
                    post.id, post.category_id
                )));
            }
        }

        for tile in &self.tiles {
            for (axis, span) in [("col_span", tile.col_span), ("row_span", tile.row_span)] {
                if let Some(n) = span.filter(|n| !(1..=2).contains(n)) {
                    return Err(ContentError::Validation(format!(
                        "tile '{}' has {axis} = {n}; spans must be 1 or 2",
                        tile.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a store from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        let store: ContentStore = toml::from_str(text)?;
        store.validate()?;
        Ok(store)
    }

    /// Load and validate a store from a `content.toml`.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The site's own content.
    pub fn stock() -> Self {
        Self {
            categories: stock_categories(),
            posts: stock_posts(),
            tiles: stock_tiles(),
        }
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::Validation(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

/// Snapshot pages live at `blog/<category>/<post>/`, so these ids must be
/// plain path segments.
fn check_slugs<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), ContentError> {
    for id in ids {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ContentError::Validation(format!(
                "{kind} id '{id}' must be non-empty and use only letters, digits, '-' or '_'"
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Stock content
// ============================================================================

fn stock_categories() -> Vec<Category> {
    let category = |id: &str, title: &str, description: &str, accent: &str| Category {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        accent: accent.to_string(),
    };
    vec![
        category(
            "philosophy",
            "Philosophy & Design",
            "Explorations of aesthetics, interfaces, and the digital void.",
            "from-purple-500/20 via-fuchsia-500/5 to-transparent",
        ),
        category(
            "engineering",
            "Engineering",
            "Code structure, state management, and the craft of software.",
            "from-cyan-500/20 via-teal-500/5 to-transparent",
        ),
        category(
            "observations",
            "Observations",
            "Fragments of the analog world observed through a digital lens.",
            "from-zinc-200/10 via-zinc-500/5 to-transparent",
        ),
    ]
}

fn stock_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            category_id: "philosophy".to_string(),
            title: "The Silence of Interfaces".to_string(),
            date: "Oct 12, 2024".to_string(),
            read_time: "4 min read".to_string(),
            excerpt: "Why the most effective digital experiences are the ones that disappear \
                      completely, leaving only the user and their intent."
                .to_string(),
            tags: vec!["Design".to_string(), "Philosophy".to_string()],
            content: RichText::Html(include_str!("../static/posts/silence-of-interfaces.html").to_string()),
        },
        Post {
            id: "2".to_string(),
            category_id: "philosophy".to_string(),
            title: "Digital Brutalism & The New Web".to_string(),
            date: "Sep 28, 2024".to_string(),
            read_time: "6 min read".to_string(),
            excerpt: "Exploring the resurgence of raw, unpolished aesthetics in a world \
                      dominated by corporate memphis and sterile gradients."
                .to_string(),
            tags: vec!["Culture".to_string(), "Trends".to_string()],
            content: RichText::Html(include_str!("../static/posts/digital-brutalism.html").to_string()),
        },
        Post {
            id: "3".to_string(),
            category_id: "engineering".to_string(),
            title: "Aetherial State Management".to_string(),
            date: "Aug 15, 2024".to_string(),
            read_time: "8 min read".to_string(),
            excerpt: "Rethinking how we handle application state in a world where local-first \
                      software is becoming the new standard."
                .to_string(),
            tags: vec!["Engineering".to_string(), "Code".to_string()],
            content: RichText::Html(include_str!("../static/posts/aetherial-state.html").to_string()),
        },
        Post {
            id: "4".to_string(),
            category_id: "observations".to_string(),
            title: "Notes on Light and Shadow".to_string(),
            date: "Jul 02, 2024".to_string(),
            read_time: "3 min read".to_string(),
            excerpt: "A collection of observations on how natural light interacts with modern \
                      architecture, and what UI designers can learn from it."
                .to_string(),
            tags: vec!["Photography".to_string(), "Study".to_string()],
            content: RichText::Html(include_str!("../static/posts/light-and-shadow.html").to_string()),
        },
    ]
}

fn stock_tiles() -> Vec<CollectionTile> {
    let tile = |id: &str, kind: TileKind, content: &str, sub: &str, col: Option<u8>, row: Option<u8>| {
        CollectionTile {
            id: id.to_string(),
            kind,
            content: content.to_string(),
            sub_content: sub.to_string(),
            col_span: col,
            row_span: row,
        }
    };
    vec![
        tile(
            "1",
            TileKind::Text,
            "Design is not just what it looks like and feels like. Design is how it works.",
            "Steve Jobs",
            Some(2),
            Some(1),
        ),
        tile(
            "2",
            TileKind::Image,
            "https://picsum.photos/id/26/600/800",
            "Found Objects",
            None,
            Some(2),
        ),
        tile(
            "3",
            TileKind::Link,
            "Read my latest essay on spatial computing.",
            "medium.com/@user",
            Some(1),
            None,
        ),
        tile(
            "4",
            TileKind::Text,
            "Simplicity is the ultimate sophistication.",
            "Leonardo da Vinci",
            None,
            None,
        ),
        tile(
            "5",
            TileKind::Image,
            "https://picsum.photos/id/48/600/600",
            "Architecture Study",
            Some(2),
            Some(2),
        ),
        tile("6", TileKind::Link, "Twitter / X", "@aesthetic_dev", None, None),
        tile(
            "7",
            TileKind::Text,
            "Entropy requires no maintenance.",
            "Robert Anton Wilson",
            Some(1),
            None,
        ),
        tile(
            "8",
            TileKind::Image,
            "https://picsum.photos/id/56/600/400",
            "Morning Light",
            Some(2),
            None,
        ),
    ]
}
